#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod io;
mod model;
mod service;
mod ui;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::service::{LocalFileStore, SubmissionTracker, TransferWorker};

fn main() -> eframe::Result<()> {
    init_tracing();

    let paths = io::AppPaths::discover();
    let config = io::load_settings_or_default(&paths.settings);
    let board = match io::load_board_or_sample(&paths.seed) {
        Ok(board) => board,
        Err(e) => {
            error!(path = %paths.seed.display(), error = %e, "seed rejected, using built-in sample");
            model::Board::sample()
        }
    };

    let limits = config.upload_limits();
    let store = LocalFileStore::new(paths.store_root.clone(), limits.clone());
    if let Err(e) = store.ensure_placeholders(&board.referenced_files()) {
        warn!(root = %store.root().display(), error = %e, "could not prepare stored files");
    }

    let worker = match TransferWorker::new(Arc::new(store), config.simulated_latency(), limits) {
        Ok(worker) => Some(worker),
        Err(e) => {
            error!(error = %e, "transfer worker failed to start, running offline");
            None
        }
    };

    info!(
        weeks = board.submissions.len(),
        documents = board.documents.len(),
        "starting student submissions"
    );
    let tracker = SubmissionTracker::new(board.submissions, config);
    let documents = board.documents;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Student Submissions"),
        ..Default::default()
    };

    eframe::run_native(
        "Student Submissions",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::SubmissionsApp::new(
                cc, tracker, documents, worker, paths,
            )))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("failed to initialize tracing: {err}");
    }
}

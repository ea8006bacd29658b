use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::io::AppPaths;
use crate::model::SupervisorDocument;
use crate::service::error::SubmissionError;
use crate::service::tracker::TransferOutcome;
use crate::service::{FileSelection, Job, JobOutcome, SubmissionTracker, TransferWorker};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Submit,
    Edit,
}

/// State of the open submit/edit dialog.
#[derive(Debug, Clone)]
pub struct SubmissionDialog {
    pub week: u32,
    pub mode: DialogMode,
    pub file: Option<FileSelection>,
    pub comment: String,
    /// Inline validation or conflict message.
    pub error: Option<String>,
}

impl SubmissionDialog {
    fn new(week: u32, mode: DialogMode) -> Self {
        Self {
            week,
            mode,
            file: None,
            comment: String::new(),
            error: None,
        }
    }
}

/// Main application state.
pub struct SubmissionsApp {
    pub tracker: SubmissionTracker,
    pub documents: Vec<SupervisorDocument>,
    pub paths: AppPaths,
    /// `None` when the background runtime could not start; transitions then apply locally.
    worker: Option<TransferWorker>,

    // Dialog state
    pub dialog: Option<SubmissionDialog>,
    pub show_about: bool,

    // Status message
    pub status_message: String,
}

impl SubmissionsApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        tracker: SubmissionTracker,
        documents: Vec<SupervisorDocument>,
        worker: Option<TransferWorker>,
        paths: AppPaths,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let status_message = if worker.is_some() {
            "Ready".to_string()
        } else {
            "Ready (offline: uploads are recorded locally only)".to_string()
        };

        Self {
            tracker,
            documents,
            paths,
            worker,
            dialog: None,
            show_about: false,
            status_message,
        }
    }

    // --- Dialog operations ---

    pub fn open_submit_dialog(&mut self, week: u32) {
        self.dialog = Some(SubmissionDialog::new(week, DialogMode::Submit));
    }

    pub fn open_edit_dialog(&mut self, week: u32) {
        self.dialog = Some(SubmissionDialog::new(week, DialogMode::Edit));
    }

    pub fn pick_file(&mut self) {
        let formats = self.tracker.config().allowed_extensions.clone();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Documents", formats.as_slice())
            .pick_file()
        else {
            return;
        };
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match FileSelection::from_path(&path) {
            Ok(selection) => {
                dialog.file = Some(selection);
                dialog.error = None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read selected file");
                dialog.error = Some(format!("Cannot read {}: {e}", path.display()));
            }
        }
    }

    /// Validate the dialog contents and start the transition.
    pub fn confirm_dialog(&mut self) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let week = dialog.week;
        let comment = dialog.comment.trim().to_string();
        let new_comment = Some(comment.as_str()).filter(|c| !c.is_empty());
        let now = Instant::now();

        let Some(worker) = &self.worker else {
            let applied = match dialog.mode {
                DialogMode::Submit => self.tracker.submit(week, dialog.file.as_ref(), &comment, now),
                DialogMode::Edit => {
                    self.tracker
                        .edit_submission(week, dialog.file.as_ref(), new_comment, now)
                }
            };
            match applied {
                Ok(()) => {
                    self.dialog = None;
                    self.status_message = format!("Week {week} saved locally");
                }
                Err(e) => self.report_refusal(week, e),
            }
            return;
        };

        let started = match dialog.mode {
            DialogMode::Submit => self.tracker.begin_submit(week, dialog.file.as_ref(), &comment),
            DialogMode::Edit => self.tracker.begin_edit(week, dialog.file.as_ref(), new_comment),
        };
        match started {
            Ok(request) => {
                dialog.error = None;
                worker.dispatch(Job::Transfer(request));
                self.status_message = format!("Uploading week {week}...");
            }
            Err(e) => self.report_refusal(week, e),
        }
    }

    /// Inline errors go to the dialog, anything else to the banner.
    fn report_refusal(&mut self, week: u32, err: SubmissionError) {
        if err.is_inline() {
            info!(week, error = %err, "transition refused");
            if let Some(dialog) = self.dialog.as_mut() {
                dialog.error = Some(err.to_string());
            }
        } else {
            warn!(week, error = %err, "transition failed to start");
            self.tracker.notify_error(err.to_string(), Instant::now());
        }
    }

    // --- File delivery ---

    /// Hand a stored file to the worker for download, then open it.
    /// `week` names the folder to look in first.
    pub fn request_download(&mut self, file_name: String, week: Option<u32>) {
        info!(file = %file_name, ?week, "download requested");
        match &self.worker {
            Some(worker) => {
                worker.dispatch(Job::Download {
                    file_name: file_name.clone(),
                    week,
                    destination: self.paths.downloads.clone(),
                });
                self.status_message = format!("Downloading {file_name}...");
            }
            None => {
                self.tracker
                    .notify_error(format!("Cannot download {file_name}: file service unavailable"), Instant::now());
            }
        }
    }

    pub fn open_folder(&mut self, dir: PathBuf) {
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
            warn!(path = %dir.display(), error = %e, "cannot open folder");
            self.status_message = format!("Cannot open {}: {e}", dir.display());
        }
    }

    // --- Outcomes ---

    fn process_outcomes(&mut self) {
        let outcomes = match self.worker.as_mut() {
            Some(worker) => worker.poll(),
            None => return,
        };
        for outcome in outcomes {
            match outcome {
                JobOutcome::Transfer(outcome) => self.apply_transfer(outcome),
                JobOutcome::Downloaded { file_name, result } => match result {
                    Ok(path) => {
                        self.status_message = format!("Saved {}", path.display());
                        if let Err(e) = open::that(&path) {
                            warn!(path = %path.display(), error = %e, "no viewer for file");
                        }
                    }
                    Err(e) => {
                        error!(file = %file_name, error = %e, "download failed");
                        self.tracker
                            .notify_error(format!("Could not download {file_name}: {e}"), Instant::now());
                        self.status_message = "Download failed".to_string();
                    }
                },
            }
        }
    }

    fn apply_transfer(&mut self, outcome: TransferOutcome) {
        let week = outcome.request.week;
        match self.tracker.finish(outcome, Instant::now()) {
            Ok(()) => {
                if self.dialog.as_ref().is_some_and(|d| d.week == week) {
                    self.dialog = None;
                }
                self.status_message = format!("Week {week} saved");
            }
            Err(e) => {
                if let Some(dialog) = self.dialog.as_mut().filter(|d| d.week == week) {
                    dialog.error = Some(e.to_string());
                }
                self.status_message = format!("Week {week} not saved");
            }
        }
    }

    /// Cancel in-flight work. Called on teardown.
    fn shutdown(&mut self) {
        if let Some(worker) = &self.worker {
            worker.shutdown();
        }
        self.tracker.cancel_all();
    }
}

impl Drop for SubmissionsApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl eframe::App for SubmissionsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        self.process_outcomes();
        let now = Instant::now();
        self.tracker.expire_notifications(now);

        // Keep frames coming while work is in flight or a banner is counting down
        if self.tracker.any_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        if let Some(left) = self.tracker.time_until_expiry(now) {
            ctx.request_repaint_after(left);
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let tasks = self.tracker.tasks();
                        let submitted = tasks.iter().filter(|t| t.is_submitted()).count();
                        ui.label(
                            egui::RichText::new(format!("Submitted: {}/{}", submitted, tasks.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let mut list_action = ui::submission_list::SubmissionListAction::None;
        let mut doc_download: Option<String> = None;
        let mut dismissed = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_max_width(ui::theme::CONTENT_MAX_WIDTH);
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("Documents").strong().size(26.0));
                    ui.label(
                        egui::RichText::new("Manage your submissions and supervisor documents")
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.add_space(12.0);

                    if let Some(n) = self.tracker.notification() {
                        dismissed = ui::notification::show_notification(n, ui);
                    }

                    doc_download = ui::documents_panel::show_documents_panel(&self.documents, ui);
                    ui.add_space(14.0);

                    list_action = ui::submission_list::show_submission_list(&self.tracker, ui);
                });
        });

        if dismissed {
            self.tracker.dismiss_notification();
        }
        if let Some(file_name) = doc_download {
            self.request_download(file_name, None);
        }
        match list_action {
            ui::submission_list::SubmissionListAction::Submit(week) => self.open_submit_dialog(week),
            ui::submission_list::SubmissionListAction::Edit(week) => self.open_edit_dialog(week),
            ui::submission_list::SubmissionListAction::Download { file_name, week } => {
                self.request_download(file_name, Some(week))
            }
            ui::submission_list::SubmissionListAction::None => {}
        }

        // Dialogs
        if self.dialog.is_some() {
            ui::dialogs::show_submission_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

//! Runs file-store requests off the UI thread.
//!
//! The worker owns a small tokio runtime. Outcomes come back over a channel the
//! UI drains once per frame. Dropping the worker cancels every job still in
//! flight; a cancelled job never reports an outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::UploadLimits;
use super::error::{Result, SubmissionError};
use super::store::{FileStore, UploadReceipt};
use super::tracker::{TransferOutcome, TransferRequest};

/// Work the UI can hand to the worker.
#[derive(Debug, Clone)]
pub enum Job {
    Transfer(TransferRequest),
    /// Copy a stored file into `destination` (a directory). Never overwrites.
    Download {
        file_name: String,
        week: Option<u32>,
        destination: PathBuf,
    },
}

#[derive(Debug)]
pub enum JobOutcome {
    Transfer(TransferOutcome),
    Downloaded {
        file_name: String,
        result: Result<PathBuf>,
    },
}

pub struct TransferWorker {
    runtime: tokio::runtime::Runtime,
    store: Arc<dyn FileStore>,
    latency: Duration,
    limits: UploadLimits,
    shutdown: CancellationToken,
    tx: UnboundedSender<JobOutcome>,
    rx: UnboundedReceiver<JobOutcome>,
}

impl TransferWorker {
    pub fn new(
        store: Arc<dyn FileStore>,
        latency: Duration,
        limits: UploadLimits,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("transfer-worker")
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            runtime,
            store,
            latency,
            limits,
            shutdown: CancellationToken::new(),
            tx,
            rx,
        })
    }

    pub fn dispatch(&self, job: Job) {
        let store = Arc::clone(&self.store);
        let latency = self.latency;
        let limits = self.limits.clone();
        let token = self.shutdown.clone();
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let work = run_job(store, latency, &limits, job);
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("job dropped on shutdown");
                }
                outcome = work => {
                    if token.is_cancelled() {
                        return;
                    }
                    if tx.send(outcome).is_err() {
                        warn!("outcome receiver gone");
                    }
                }
            }
        });
    }

    /// Drain every outcome that has arrived since the last call.
    pub fn poll(&mut self) -> Vec<JobOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Cancel all in-flight jobs. Later dispatches are dropped as well.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            info!("transfer worker shutting down");
            self.shutdown.cancel();
        }
    }
}

impl Drop for TransferWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_job(
    store: Arc<dyn FileStore>,
    latency: Duration,
    limits: &UploadLimits,
    job: Job,
) -> JobOutcome {
    match job {
        Job::Transfer(request) => {
            let result = transfer(store.as_ref(), latency, limits, &request).await;
            JobOutcome::Transfer(TransferOutcome { request, result })
        }
        Job::Download {
            file_name,
            week,
            destination,
        } => {
            let result = download(store.as_ref(), &file_name, week, &destination).await;
            JobOutcome::Downloaded { file_name, result }
        }
    }
}

async fn transfer(
    store: &dyn FileStore,
    latency: Duration,
    limits: &UploadLimits,
    request: &TransferRequest,
) -> Result<Option<UploadReceipt>> {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    let Some(upload) = &request.upload else {
        return Ok(None);
    };
    let bytes = tokio::fs::read(&upload.source).await.map_err(|e| {
        SubmissionError::Transport(format!("cannot read {}: {e}", upload.source.display()))
    })?;
    // The file may have changed since it was picked.
    limits.check(&upload.file_name, bytes.len() as u64)?;
    let receipt = store
        .upload(
            request.week,
            &upload.file_name,
            bytes,
            request.comment.as_deref(),
        )
        .await?;
    Ok(Some(receipt))
}

async fn download(
    store: &dyn FileStore,
    file_name: &str,
    week: Option<u32>,
    destination: &Path,
) -> Result<PathBuf> {
    let bytes = store.download(file_name, week).await?;
    tokio::fs::create_dir_all(destination).await?;
    let (target, mut file) = create_unique(destination, file_name).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;
    info!(file = file_name, path = %target.display(), "download saved");
    Ok(target)
}

/// Create `name` in `dir`, or `stem (n).ext` when that name is taken.
async fn create_unique(dir: &Path, name: &str) -> Result<(PathBuf, tokio::fs::File)> {
    let original = Path::new(name);
    let stem = original
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let ext = original.extension().and_then(|e| e.to_str());

    for n in 0..1000u32 {
        let candidate = match (n, ext) {
            (0, _) => name.to_string(),
            (n, Some(ext)) => format!("{stem} ({n}).{ext}"),
            (n, None) => format!("{stem} ({n})"),
        };
        let path = dir.join(candidate);
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(SubmissionError::Transport(format!(
        "too many copies of {name} in {}",
        dir.display()
    )))
}

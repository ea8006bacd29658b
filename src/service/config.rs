use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{Result, SubmissionError};

/// Named defaults and constants for the submission tracker.
///
/// Persisted as `settings.json` in the OS config directory. Every field has a
/// default so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Comment stored when a submission is made without one.
    pub default_comment: String,
    /// Name used when a selected file has no usable name. `{week}` is replaced.
    pub fallback_file_name: String,
    /// How long a success notification stays visible.
    pub notification_ttl_ms: u64,
    /// Artificial latency applied before each upload reaches the store.
    pub simulated_latency_ms: u64,
    /// Lower-case extensions accepted for upload.
    pub allowed_extensions: Vec<String>,
    pub max_upload_bytes: u64,
    /// Reject submit and edit on CLOSED weeks.
    pub enforce_task_window: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_comment: "Submission received".into(),
            fallback_file_name: "Week{week}_Submission.pdf".into(),
            notification_ttl_ms: 3_000,
            simulated_latency_ms: 1_000,
            allowed_extensions: vec!["pdf".into(), "docx".into()],
            max_upload_bytes: 20 * 1024 * 1024,
            enforce_task_window: false,
        }
    }
}

impl TrackerConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn fallback_name_for(&self, week: u32) -> String {
        self.fallback_file_name.replace("{week}", &week.to_string())
    }

    /// Human-readable list of accepted formats, e.g. "PDF, DOCX".
    pub fn accepted_formats(&self) -> String {
        self.upload_limits().accepted_formats()
    }

    pub fn upload_limits(&self) -> UploadLimits {
        UploadLimits {
            allowed_extensions: self.allowed_extensions.clone(),
            max_bytes: self.max_upload_bytes,
        }
    }
}

/// Type and size rules every upload must pass, wherever it is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLimits {
    pub allowed_extensions: Vec<String>,
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        TrackerConfig::default().upload_limits()
    }
}

impl UploadLimits {
    pub fn accepted_formats(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(|e| e.to_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn accepts_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.').to_lowercase();
        self.allowed_extensions.iter().any(|a| *a == ext)
    }

    /// Reject a file whose extension is not allowed or whose size is over the limit.
    pub fn check(&self, file_name: &str, size: u64) -> Result<()> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if !self.accepts_extension(ext) {
            return Err(SubmissionError::Validation(format!(
                "'{file_name}' is not an accepted format ({})",
                self.accepted_formats()
            )));
        }
        if size > self.max_bytes {
            return Err(SubmissionError::Validation(format!(
                "'{file_name}' is {size} bytes, the limit is {} bytes",
                self.max_bytes
            )));
        }
        Ok(())
    }
}

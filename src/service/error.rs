use thiserror::Error;

/// Why a submission operation was refused or failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The request itself is unacceptable (no file, wrong type, too large).
    #[error("{0}")]
    Validation(String),

    /// The task is not in a state that allows the operation.
    #[error("Week {week}: {reason}")]
    Conflict { week: u32, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// The file store could not complete the transfer.
    #[error("Transfer failed: {0}")]
    Transport(String),
}

impl SubmissionError {
    pub fn conflict(week: u32, reason: impl Into<String>) -> Self {
        Self::Conflict {
            week,
            reason: reason.into(),
        }
    }

    pub fn unknown_week(week: u32) -> Self {
        Self::NotFound(format!("week {week}"))
    }

    /// Validation and conflict errors are shown inline; the rest become notifications.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Conflict { .. })
    }
}

impl From<std::io::Error> for SubmissionError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::Transport(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubmissionError>;

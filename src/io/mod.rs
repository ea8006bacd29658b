pub mod seed;
pub mod settings;

use thiserror::Error;

use crate::model::BoardError;

pub use seed::load_board_or_sample;
pub use settings::{load_settings_or_default, AppPaths};

/// Failure reading a seed or settings file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid seed: {0}")]
    Invalid(#[from] BoardError),
}

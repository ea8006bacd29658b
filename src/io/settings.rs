use std::path::{Path, PathBuf};

use tracing::warn;

use super::LoadError;
use crate::service::TrackerConfig;

/// Where the app keeps its settings, seed, and stored files.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub settings: PathBuf,
    pub seed: PathBuf,
    pub store_root: PathBuf,
    pub downloads: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Self {
        let downloads = directories::UserDirs::new()
            .and_then(|u| u.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("downloads"));

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "StudentSubmissions") {
            let config = proj_dirs.config_dir().to_path_buf();
            Self {
                settings: config.join("settings.json"),
                seed: config.join("seed.json"),
                store_root: proj_dirs.data_dir().join("files"),
                downloads,
            }
        } else {
            // Fallback
            let dir = PathBuf::from(".");
            Self {
                settings: dir.join("settings.json"),
                seed: dir.join("seed.json"),
                store_root: dir.join("files"),
                downloads,
            }
        }
    }
}

/// Read the tracker settings. A missing file yields defaults.
pub fn load_settings(path: &Path) -> Result<TrackerConfig, LoadError> {
    if !path.is_file() {
        return Ok(TrackerConfig::default());
    }
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Like [`load_settings`], but falls back to defaults with a warning, and writes
/// a default file on first run so users have something to edit.
pub fn load_settings_or_default(path: &Path) -> TrackerConfig {
    let config = match load_settings(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
            return TrackerConfig::default();
        }
    };
    if !path.exists() {
        if let Err(e) = save_settings(&config, path) {
            warn!(path = %path.display(), error = %e, "could not write default settings");
        }
    }
    config
}

pub fn save_settings(config: &TrackerConfig, path: &Path) -> Result<(), LoadError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

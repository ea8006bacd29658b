//! File-delivery collaborator: accepts uploads and hands back stored files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::config::UploadLimits;
use super::error::{Result, SubmissionError};

/// Minimal one-page PDF written for seeded files that have no real content.
pub const PLACEHOLDER_PDF: &[u8] = b"%PDF-1.4\n\
1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n\
3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >> endobj\n\
trailer << /Root 1 0 R >>\n\
%%EOF\n";

/// The store's acknowledgement of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: Uuid,
    pub accepted_file_name: String,
    pub timestamp: DateTime<Utc>,
}

impl UploadReceipt {
    pub fn issue(accepted_file_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            accepted_file_name,
            timestamp: Utc::now(),
        }
    }
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(
        &self,
        week: u32,
        file_name: &str,
        bytes: Vec<u8>,
        comment: Option<&str>,
    ) -> Result<UploadReceipt>;

    /// Fetch a stored file. `week`, when given, is searched before any other folder.
    async fn download(&self, file_name: &str, week: Option<u32>) -> Result<Vec<u8>>;
}

/// Sidecar written next to each uploaded file.
#[derive(Debug, Serialize, Deserialize)]
struct ReceiptRecord {
    week: u32,
    comment: Option<String>,
    #[serde(flatten)]
    receipt: UploadReceipt,
}

/// Directory-backed store. Uploads land in `<root>/week-<n>/` and must pass `limits`.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    limits: UploadLimits,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, limits: UploadLimits) -> Self {
        Self {
            root: root.into(),
            limits,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn week_dir(&self, week: u32) -> PathBuf {
        self.root.join(format!("week-{week}"))
    }

    /// Write a placeholder PDF at the root for each name not already stored.
    /// Returns how many were created.
    pub fn ensure_placeholders(&self, names: &[String]) -> std::io::Result<usize> {
        std::fs::create_dir_all(&self.root)?;
        let mut created = 0;
        for name in names {
            if check_file_name(name).is_err() || self.locate_blocking(name, None).is_some() {
                continue;
            }
            std::fs::write(self.root.join(name), PLACEHOLDER_PDF)?;
            created += 1;
        }
        if created > 0 {
            info!(created, root = %self.root.display(), "wrote placeholder files");
        }
        Ok(created)
    }

    /// Find a stored file: the requested week, then newest week folder first, then the root.
    fn locate_blocking(&self, file_name: &str, week: Option<u32>) -> Option<PathBuf> {
        if let Some(path) = week
            .map(|w| self.week_dir(w).join(file_name))
            .filter(|p| p.is_file())
        {
            return Some(path);
        }
        let mut week_dirs: Vec<PathBuf> = std::fs::read_dir(&self.root)
            .ok()?
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.is_dir()
                    && p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with("week-"))
            })
            .collect();
        week_dirs.sort_by_key(|p| std::cmp::Reverse(week_number(p)));
        week_dirs
            .into_iter()
            .chain(std::iter::once(self.root.clone()))
            .map(|dir| dir.join(file_name))
            .find(|p| p.is_file())
    }
}

fn week_number(dir: &Path) -> u32 {
    dir.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix("week-"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Reject names that would escape the store directory.
fn check_file_name(name: &str) -> Result<()> {
    let bad = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
        || name.ends_with(".receipt.json");
    if bad {
        return Err(SubmissionError::Validation(format!(
            "'{name}' is not a valid file name"
        )));
    }
    Ok(())
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(
        &self,
        week: u32,
        file_name: &str,
        bytes: Vec<u8>,
        comment: Option<&str>,
    ) -> Result<UploadReceipt> {
        check_file_name(file_name)?;
        self.limits.check(file_name, bytes.len() as u64)?;
        let dir = self.week_dir(week);
        tokio::fs::create_dir_all(&dir).await?;

        let size = bytes.len();
        tokio::fs::write(dir.join(file_name), bytes).await?;

        let receipt = UploadReceipt::issue(file_name.to_string());
        let record = ReceiptRecord {
            week,
            comment: comment.map(str::to_string),
            receipt: receipt.clone(),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;
        tokio::fs::write(dir.join(format!("{file_name}.receipt.json")), json).await?;

        info!(week, file = file_name, size, receipt = %receipt.id, "upload stored");
        Ok(receipt)
    }

    async fn download(&self, file_name: &str, week: Option<u32>) -> Result<Vec<u8>> {
        check_file_name(file_name)?;
        let store = self.clone();
        let name = file_name.to_string();
        let path = tokio::task::spawn_blocking(move || store.locate_blocking(&name, week))
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?
            .ok_or_else(|| SubmissionError::NotFound(file_name.to_string()))?;
        debug!(file = file_name, path = %path.display(), "serving download");
        Ok(tokio::fs::read(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_at(root: &Path) -> LocalFileStore {
        LocalFileStore::new(root, UploadLimits::default())
    }

    #[tokio::test]
    async fn upload_then_download_returns_bytes() {
        let tmp = TempDir::new().unwrap();
        let store = store_at(tmp.path());

        let receipt = store
            .upload(3, "report.pdf", b"%PDF-1.4 report".to_vec(), Some("first draft"))
            .await
            .unwrap();
        assert_eq!(receipt.accepted_file_name, "report.pdf");
        assert!(tmp.path().join("week-3").join("report.pdf").is_file());
        assert!(tmp.path().join("week-3").join("report.pdf.receipt.json").is_file());

        let bytes = store.download("report.pdf", None).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 report");
    }

    #[tokio::test]
    async fn download_prefers_latest_week() {
        let tmp = TempDir::new().unwrap();
        let store = store_at(tmp.path());
        store.upload(2, "notes.pdf", b"old".to_vec(), None).await.unwrap();
        store.upload(10, "notes.pdf", b"new".to_vec(), None).await.unwrap();
        assert_eq!(store.download("notes.pdf", None).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn download_for_a_week_reads_that_weeks_copy() {
        let tmp = TempDir::new().unwrap();
        let store = store_at(tmp.path());
        store.upload(2, "notes.pdf", b"old".to_vec(), None).await.unwrap();
        store.upload(10, "notes.pdf", b"new".to_vec(), None).await.unwrap();

        assert_eq!(store.download("notes.pdf", Some(2)).await.unwrap(), b"old");
        assert_eq!(store.download("notes.pdf", Some(10)).await.unwrap(), b"new");
        // A week with no copy falls back to the general search.
        assert_eq!(store.download("notes.pdf", Some(4)).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = store_at(tmp.path());
        let err = store.download("nothing.pdf", None).await.unwrap_err();
        assert_eq!(err, SubmissionError::NotFound("nothing.pdf".into()));
    }

    #[tokio::test]
    async fn path_traversal_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = store_at(tmp.path());
        let err = store
            .upload(1, "../escape.pdf", Vec::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert!(matches!(
            store.download("..", None).await,
            Err(SubmissionError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn upload_with_unaccepted_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = store_at(tmp.path());
        let err = store
            .upload(3, "virus.exe", b"MZ".to_vec(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert!(!tmp.path().join("week-3").join("virus.exe").exists());
    }

    #[tokio::test]
    async fn upload_over_size_limit_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let limits = UploadLimits {
            max_bytes: 16,
            ..UploadLimits::default()
        };
        let store = LocalFileStore::new(tmp.path(), limits);

        assert!(store.upload(3, "small.pdf", vec![0; 16], None).await.is_ok());
        let err = store
            .upload(3, "large.pdf", vec![0; 17], None)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert!(!tmp.path().join("week-3").join("large.pdf").exists());
    }

    #[tokio::test]
    async fn placeholders_are_written_once() {
        let tmp = TempDir::new().unwrap();
        let store = store_at(&tmp.path().join("files"));
        let names = vec!["Week1_Briefing.pdf".to_string(), "Thesis Information.pdf".to_string()];

        assert_eq!(store.ensure_placeholders(&names).unwrap(), 2);
        assert_eq!(store.ensure_placeholders(&names).unwrap(), 0);
        assert_eq!(
            store.download("Week1_Briefing.pdf", None).await.unwrap(),
            PLACEHOLDER_PDF
        );
    }

    #[test]
    fn week_number_parses_folder_names() {
        assert_eq!(week_number(Path::new("/x/week-12")), 12);
        assert_eq!(week_number(Path::new("/x/other")), 0);
    }
}

//! Submission state tracker: owns the weekly task list and applies transitions.
//!
//! Transitions run in two phases. `begin_*` validates and marks the week busy,
//! the caller hands the returned [`TransferRequest`] to the file store, and
//! [`SubmissionTracker::finish`] applies or rolls back the outcome. The busy
//! flag is keyed per week, so work on one week never blocks another.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::config::TrackerConfig;
use super::error::{Result, SubmissionError};
use super::store::UploadReceipt;
use crate::model::{SubmissionStatus, SubmissionTask};

/// A file the user picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub path: PathBuf,
    pub size: u64,
}

impl FileSelection {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Stat the file on disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self::new(path, meta.len()))
    }

    /// Final path component, if it is valid UTF-8 and not empty.
    pub fn name(&self) -> Option<String> {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    Edit,
}

/// File bytes still to be sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub file_name: String,
    pub source: PathBuf,
}

/// A validated transition waiting on the file store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub week: u32,
    pub operation: Operation,
    /// Always present for submit; present for edit only when the file is replaced.
    pub upload: Option<PendingUpload>,
    /// For submit, the resolved comment. For edit, `None` leaves comments unchanged.
    pub comment: Option<String>,
}

/// Result of running a [`TransferRequest`] against the store.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub request: TransferRequest,
    pub result: Result<Option<UploadReceipt>>,
}

impl TransferOutcome {
    /// Accept a request without a store, issuing the receipt locally.
    pub fn accepted_locally(request: TransferRequest) -> Self {
        let receipt = request
            .upload
            .as_ref()
            .map(|u| UploadReceipt::issue(u.file_name.clone()));
        Self {
            request,
            result: Ok(receipt),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Banner shown above the submissions list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    raised_at: Instant,
}

pub struct SubmissionTracker {
    tasks: Vec<SubmissionTask>,
    busy: HashSet<u32>,
    notification: Option<Notification>,
    config: TrackerConfig,
}

impl SubmissionTracker {
    pub fn new(mut tasks: Vec<SubmissionTask>, config: TrackerConfig) -> Self {
        tasks.sort_by_key(|t| t.week);
        Self {
            tasks,
            busy: HashSet::new(),
            notification: None,
            config,
        }
    }

    pub fn tasks(&self) -> &[SubmissionTask] {
        &self.tasks
    }

    pub fn task(&self, week: u32) -> Option<&SubmissionTask> {
        self.tasks.iter().find(|t| t.week == week)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn is_busy(&self, week: u32) -> bool {
        self.busy.contains(&week)
    }

    pub fn any_busy(&self) -> bool {
        !self.busy.is_empty()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    // --- Submit ---

    /// Validate a submission and mark the week busy.
    pub fn begin_submit(
        &mut self,
        week: u32,
        file: Option<&FileSelection>,
        comment: &str,
    ) -> Result<TransferRequest> {
        let task = self.ready_task(week)?;
        if task.status == SubmissionStatus::Submitted {
            return Err(SubmissionError::conflict(week, "already submitted, use edit instead"));
        }
        let file = file.ok_or_else(|| {
            SubmissionError::Validation("Select a file to upload before submitting".into())
        })?;
        let upload = self.validate_file(week, file)?;

        let comment = if comment.is_empty() {
            self.config.default_comment.clone()
        } else {
            comment.to_string()
        };

        self.busy.insert(week);
        debug!(week, file = %upload.file_name, "submission started");
        Ok(TransferRequest {
            week,
            operation: Operation::Submit,
            upload: Some(upload),
            comment: Some(comment),
        })
    }

    // --- Edit ---

    /// Validate an edit of an already submitted week and mark it busy.
    pub fn begin_edit(
        &mut self,
        week: u32,
        new_file: Option<&FileSelection>,
        new_comment: Option<&str>,
    ) -> Result<TransferRequest> {
        let task = self.ready_task(week)?;
        if task.status != SubmissionStatus::Submitted {
            return Err(SubmissionError::conflict(week, "nothing submitted yet to edit"));
        }
        let upload = new_file
            .map(|f| self.validate_file(week, f))
            .transpose()?;

        self.busy.insert(week);
        debug!(week, replaces_file = upload.is_some(), "edit started");
        Ok(TransferRequest {
            week,
            operation: Operation::Edit,
            upload,
            comment: new_comment.map(str::to_string),
        })
    }

    // --- Completion ---

    /// Apply a store outcome. Failures leave the task untouched.
    pub fn finish(&mut self, outcome: TransferOutcome, now: Instant) -> Result<()> {
        let TransferOutcome { request, result } = outcome;
        let week = request.week;
        if !self.busy.remove(&week) {
            warn!(week, "ignoring outcome for a week that is not in flight");
            return Ok(());
        }

        let receipt = match result {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!(week, error = %err, "transfer failed, task left unchanged");
                let verb = match request.operation {
                    Operation::Submit => "submission",
                    Operation::Edit => "update",
                };
                self.raise(
                    NotificationKind::Error,
                    format!("Week {week} {verb} failed: {err}"),
                    now,
                );
                return Err(err);
            }
        };

        let Some(task) = self.tasks.iter_mut().find(|t| t.week == week) else {
            return Err(SubmissionError::unknown_week(week));
        };

        let accepted_name = receipt
            .as_ref()
            .map(|r| r.accepted_file_name.clone())
            .or_else(|| request.upload.as_ref().map(|u| u.file_name.clone()));
        if let Some(r) = &receipt {
            task.submitted_at = Some(r.timestamp);
        }

        let message = match request.operation {
            Operation::Submit => {
                task.status = SubmissionStatus::Submitted;
                task.submitted_file = accepted_name;
                task.comments = request.comment;
                info!(week, file = ?task.submitted_file, "submission accepted");
                format!("Week {week} submission uploaded successfully!")
            }
            Operation::Edit => {
                if let Some(name) = accepted_name {
                    task.submitted_file = Some(name);
                }
                if let Some(comment) = request.comment {
                    task.comments = Some(comment).filter(|c| !c.trim().is_empty());
                }
                info!(week, file = ?task.submitted_file, "submission updated");
                format!("Week {week} submission updated successfully!")
            }
        };
        self.raise(NotificationKind::Success, message, now);
        Ok(())
    }

    /// Submit and apply immediately with a locally issued receipt.
    pub fn submit(
        &mut self,
        week: u32,
        file: Option<&FileSelection>,
        comment: &str,
        now: Instant,
    ) -> Result<()> {
        let request = self.begin_submit(week, file, comment)?;
        self.finish(TransferOutcome::accepted_locally(request), now)
    }

    /// Edit and apply immediately with a locally issued receipt.
    pub fn edit_submission(
        &mut self,
        week: u32,
        new_file: Option<&FileSelection>,
        new_comment: Option<&str>,
        now: Instant,
    ) -> Result<()> {
        let request = self.begin_edit(week, new_file, new_comment)?;
        self.finish(TransferOutcome::accepted_locally(request), now)
    }

    /// Forget every in-flight transition. Used on teardown.
    pub fn cancel_all(&mut self) {
        if !self.busy.is_empty() {
            info!(count = self.busy.len(), "cancelling in-flight transitions");
        }
        self.busy.clear();
    }

    // --- Notifications ---

    pub fn notify_error(&mut self, message: impl Into<String>, now: Instant) {
        self.raise(NotificationKind::Error, message.into(), now);
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Clear a success banner once its interval has elapsed. Errors stay until dismissed.
    /// Returns true when the banner was cleared.
    pub fn expire_notifications(&mut self, now: Instant) -> bool {
        let ttl = self.config.notification_ttl();
        let expired = self.notification.as_ref().is_some_and(|n| {
            n.kind == NotificationKind::Success && now.saturating_duration_since(n.raised_at) >= ttl
        });
        if expired {
            self.notification = None;
        }
        expired
    }

    /// Time left before the current success banner clears.
    pub fn time_until_expiry(&self, now: Instant) -> Option<Duration> {
        let n = self.notification.as_ref()?;
        if n.kind != NotificationKind::Success {
            return None;
        }
        let elapsed = now.saturating_duration_since(n.raised_at);
        Some(self.config.notification_ttl().saturating_sub(elapsed))
    }

    fn raise(&mut self, kind: NotificationKind, message: String, now: Instant) {
        self.notification = Some(Notification {
            kind,
            message,
            raised_at: now,
        });
    }

    // --- Validation helpers ---

    /// Look up a week that exists, is idle, and whose window allows changes.
    fn ready_task(&self, week: u32) -> Result<&SubmissionTask> {
        let task = self
            .task(week)
            .ok_or_else(|| SubmissionError::unknown_week(week))?;
        if self.is_busy(week) {
            return Err(SubmissionError::conflict(week, "a transfer is already in progress"));
        }
        if self.config.enforce_task_window && !task.task_status.is_open() {
            return Err(SubmissionError::conflict(week, "the task window is closed"));
        }
        Ok(task)
    }

    fn validate_file(&self, week: u32, file: &FileSelection) -> Result<PendingUpload> {
        let file_name = file
            .name()
            .unwrap_or_else(|| self.config.fallback_name_for(week));
        self.config.upload_limits().check(&file_name, file.size)?;
        Ok(PendingUpload {
            file_name,
            source: file.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Board, TaskWindow};

    fn tracker() -> SubmissionTracker {
        SubmissionTracker::new(Board::sample().submissions, TrackerConfig::default())
    }

    fn pdf(name: &str) -> FileSelection {
        FileSelection::new(format!("/tmp/uploads/{name}"), 2048)
    }

    #[test]
    fn submit_pending_week_with_empty_comment_uses_default() {
        let mut t = tracker();
        t.submit(3, Some(&pdf("report.pdf")), "", Instant::now()).unwrap();

        let week3 = t.task(3).unwrap();
        assert_eq!(week3.status, SubmissionStatus::Submitted);
        assert_eq!(week3.submitted_file.as_deref(), Some("report.pdf"));
        assert_eq!(week3.comments.as_deref(), Some("Submission received"));
        assert!(week3.submitted_at.is_some());
        assert!(!t.is_busy(3));
    }

    #[test]
    fn submit_keeps_given_comment() {
        let mut t = tracker();
        t.submit(4, Some(&pdf("lit.docx")), "Draft chapter two", Instant::now())
            .unwrap();
        assert_eq!(t.task(4).unwrap().comments.as_deref(), Some("Draft chapter two"));
    }

    #[test]
    fn submit_raises_success_notification() {
        let mut t = tracker();
        t.submit(3, Some(&pdf("report.pdf")), "", Instant::now()).unwrap();
        let n = t.notification().unwrap();
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(n.message, "Week 3 submission uploaded successfully!");
    }

    #[test]
    fn submit_without_file_is_a_validation_error() {
        let mut t = tracker();
        let err = t.submit(3, None, "notes", Instant::now()).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert_eq!(t.task(3).unwrap().status, SubmissionStatus::Pending);
        assert!(!t.is_busy(3));
    }

    #[test]
    fn unnamed_file_falls_back_to_generated_name() {
        let mut t = tracker();
        t.submit(3, Some(&FileSelection::new("/", 10)), "", Instant::now())
            .unwrap();
        assert_eq!(
            t.task(3).unwrap().submitted_file.as_deref(),
            Some("Week3_Submission.pdf")
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut t = tracker();
        let err = t
            .submit(3, Some(&pdf("slides.pptx")), "", Instant::now())
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
        assert!(err.is_inline());
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut t = tracker();
        let big = FileSelection::new("/tmp/huge.pdf", 21 * 1024 * 1024);
        let err = t.submit(3, Some(&big), "", Instant::now()).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
    }

    #[test]
    fn submit_on_submitted_week_is_rejected_and_unchanged() {
        let mut t = tracker();
        let before = t.task(1).unwrap().clone();
        let err = t
            .submit(1, Some(&pdf("again.pdf")), "again", Instant::now())
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Conflict { week: 1, .. }));
        assert_eq!(t.task(1).unwrap(), &before);
    }

    #[test]
    fn unknown_week_is_not_found() {
        let mut t = tracker();
        let err = t.submit(9, Some(&pdf("x.pdf")), "", Instant::now()).unwrap_err();
        assert_eq!(err, SubmissionError::unknown_week(9));
        let err = t.edit_submission(9, None, Some("x"), Instant::now()).unwrap_err();
        assert!(matches!(err, SubmissionError::NotFound(_)));
    }

    #[test]
    fn edit_file_only_keeps_comments() {
        let mut t = tracker();
        t.edit_submission(1, Some(&pdf("revised.pdf")), None, Instant::now())
            .unwrap();
        let week1 = t.task(1).unwrap();
        assert_eq!(week1.submitted_file.as_deref(), Some("revised.pdf"));
        assert_eq!(week1.comments.as_deref(), Some("Good start"));
        assert_eq!(
            t.notification().unwrap().message,
            "Week 1 submission updated successfully!"
        );
    }

    #[test]
    fn edit_comment_only_keeps_file() {
        let mut t = tracker();
        t.edit_submission(2, None, Some("Added appendix"), Instant::now())
            .unwrap();
        let week2 = t.task(2).unwrap();
        assert_eq!(week2.submitted_file.as_deref(), Some("Proposal_draft.pdf"));
        assert_eq!(week2.comments.as_deref(), Some("Added appendix"));
        assert!(week2.submitted_at.is_none());
    }

    #[test]
    fn edit_with_blank_comment_clears_it() {
        let mut t = tracker();
        t.edit_submission(2, None, Some("  "), Instant::now()).unwrap();
        assert!(t.task(2).unwrap().comments.is_none());
    }

    #[test]
    fn edit_on_pending_week_is_a_conflict() {
        let mut t = tracker();
        let err = t
            .edit_submission(3, Some(&pdf("x.pdf")), None, Instant::now())
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Conflict { week: 3, .. }));
        assert_eq!(t.task(3).unwrap().status, SubmissionStatus::Pending);
    }

    #[test]
    fn status_never_returns_to_pending() {
        let mut t = tracker();
        let now = Instant::now();
        t.submit(3, Some(&pdf("a.pdf")), "", now).unwrap();
        let _ = t.submit(3, Some(&pdf("b.pdf")), "", now);
        t.edit_submission(3, Some(&pdf("c.pdf")), Some(""), now).unwrap();
        t.edit_submission(3, None, None, now).unwrap();
        let _ = t.edit_submission(4, None, Some("x"), now);
        for task in t.tasks().iter().filter(|t| t.week <= 3) {
            assert_eq!(task.status, SubmissionStatus::Submitted, "week {}", task.week);
        }
        assert_eq!(t.task(3).unwrap().submitted_file.as_deref(), Some("c.pdf"));
    }

    #[test]
    fn busy_flag_is_per_week() {
        let mut t = tracker();
        let req = t.begin_submit(3, Some(&pdf("a.pdf")), "").unwrap();
        assert!(t.is_busy(3));
        assert!(!t.is_busy(4));

        let err = t.begin_submit(3, Some(&pdf("b.pdf")), "").unwrap_err();
        assert!(matches!(err, SubmissionError::Conflict { week: 3, .. }));

        // Another week proceeds while week 3 is in flight.
        t.submit(4, Some(&pdf("lit.pdf")), "", Instant::now()).unwrap();
        assert_eq!(t.task(3).unwrap().status, SubmissionStatus::Pending);

        t.finish(
            TransferOutcome {
                request: req,
                result: Ok(Some(UploadReceipt::issue("a.pdf".into()))),
            },
            Instant::now(),
        )
        .unwrap();
        assert!(!t.any_busy());
        assert_eq!(t.task(3).unwrap().submitted_file.as_deref(), Some("a.pdf"));
    }

    #[test]
    fn transport_failure_rolls_back_and_raises_error() {
        let mut t = tracker();
        let before = t.task(3).unwrap().clone();
        let req = t.begin_submit(3, Some(&pdf("a.pdf")), "notes").unwrap();
        let err = t
            .finish(
                TransferOutcome {
                    request: req,
                    result: Err(SubmissionError::Transport("disk full".into())),
                },
                Instant::now(),
            )
            .unwrap_err();

        assert!(matches!(err, SubmissionError::Transport(_)));
        assert!(!err.is_inline());
        assert_eq!(t.task(3).unwrap(), &before);
        assert!(!t.is_busy(3));
        let n = t.notification().unwrap();
        assert_eq!(n.kind, NotificationKind::Error);
        assert!(n.message.starts_with("Week 3 submission failed"));
    }

    #[test]
    fn receipt_name_wins_over_requested_name() {
        let mut t = tracker();
        let req = t.begin_submit(3, Some(&pdf("report.pdf")), "").unwrap();
        t.finish(
            TransferOutcome {
                request: req,
                result: Ok(Some(UploadReceipt::issue("report (1).pdf".into()))),
            },
            Instant::now(),
        )
        .unwrap();
        assert_eq!(t.task(3).unwrap().submitted_file.as_deref(), Some("report (1).pdf"));
    }

    #[test]
    fn outcome_after_cancel_is_ignored() {
        let mut t = tracker();
        let req = t.begin_submit(3, Some(&pdf("a.pdf")), "").unwrap();
        t.cancel_all();
        t.finish(
            TransferOutcome {
                request: req,
                result: Ok(Some(UploadReceipt::issue("a.pdf".into()))),
            },
            Instant::now(),
        )
        .unwrap();
        assert_eq!(t.task(3).unwrap().status, SubmissionStatus::Pending);
        assert!(t.notification().is_none());
    }

    #[test]
    fn success_notification_clears_after_interval_and_not_before() {
        let mut t = tracker();
        let raised = Instant::now();
        t.submit(3, Some(&pdf("a.pdf")), "", raised).unwrap();

        let ttl = t.config().notification_ttl();
        assert!(!t.expire_notifications(raised + ttl - Duration::from_millis(1)));
        assert!(t.notification().is_some());
        assert_eq!(
            t.time_until_expiry(raised + Duration::from_secs(1)),
            Some(Duration::from_secs(2))
        );

        assert!(t.expire_notifications(raised + ttl));
        assert!(t.notification().is_none());
    }

    #[test]
    fn error_notification_stays_until_dismissed() {
        let mut t = tracker();
        let now = Instant::now();
        t.notify_error("Download failed", now);
        assert!(!t.expire_notifications(now + Duration::from_secs(60)));
        assert!(t.time_until_expiry(now).is_none());
        t.dismiss_notification();
        assert!(t.notification().is_none());
    }

    #[test]
    fn closed_window_is_presentational_by_default() {
        let mut t = tracker();
        assert_eq!(t.task(1).unwrap().task_status, TaskWindow::Closed);
        t.edit_submission(1, None, Some("late note"), Instant::now())
            .unwrap();
    }

    #[test]
    fn closed_window_blocks_changes_when_enforced() {
        let config = TrackerConfig {
            enforce_task_window: true,
            ..TrackerConfig::default()
        };
        let mut t = SubmissionTracker::new(Board::sample().submissions, config);
        let err = t
            .edit_submission(1, None, Some("late note"), Instant::now())
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Conflict { week: 1, .. }));
        t.submit(3, Some(&pdf("a.pdf")), "", Instant::now()).unwrap();
    }

    #[test]
    fn closed_window_blocks_submit_on_pending_week_when_enforced() {
        let day = |s: &str| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let late = SubmissionTask::new(
            5,
            "Final Report",
            "• Full write-up",
            day("2025-11-10"),
            day("2025-11-20"),
        )
        .with_window(TaskWindow::Closed);
        let config = TrackerConfig {
            enforce_task_window: true,
            ..TrackerConfig::default()
        };
        let mut t = SubmissionTracker::new(vec![late], config);

        let err = t
            .submit(5, Some(&pdf("final.pdf")), "", Instant::now())
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Conflict { week: 5, .. }));
        let week5 = t.task(5).unwrap();
        assert_eq!(week5.status, SubmissionStatus::Pending);
        assert!(week5.submitted_file.is_none());
        assert!(!t.is_busy(5));
        assert!(t.notification().is_none());
    }

    #[test]
    fn whitespace_comment_is_kept_as_given() {
        let mut t = tracker();
        t.submit(3, Some(&pdf("report.pdf")), "  ", Instant::now()).unwrap();
        assert_eq!(t.task(3).unwrap().comments.as_deref(), Some("  "));
    }
}

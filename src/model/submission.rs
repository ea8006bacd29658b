use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether the student has handed in work for a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Submitted,
}

impl SubmissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Submitted => "Submitted",
        }
    }
}

/// Task window flag. Independent of [`SubmissionStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskWindow {
    Open,
    Closed,
}

impl TaskWindow {
    pub fn label(&self) -> &'static str {
        match self {
            TaskWindow::Open => "OPEN",
            TaskWindow::Closed => "CLOSED",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, TaskWindow::Open)
    }
}

/// One week's assignment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionTask {
    pub week: u32,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    /// Date the task was released to students.
    pub upload_date: NaiveDate,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub submitted_file: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    pub task_status: TaskWindow,
    /// Set from the store receipt on the last accepted upload.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SubmissionTask {
    /// Create a pending, open task with no submission attached.
    pub fn new(
        week: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        upload_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            week,
            title: title.into(),
            description: description.into(),
            due_date,
            upload_date,
            status: SubmissionStatus::Pending,
            submitted_file: None,
            comments: None,
            task_status: TaskWindow::Open,
            submitted_at: None,
        }
    }

    /// Builder-style helper for seeding an already submitted week.
    pub fn with_submission(
        mut self,
        file_name: impl Into<String>,
        comments: impl Into<String>,
    ) -> Self {
        self.status = SubmissionStatus::Submitted;
        self.submitted_file = Some(file_name.into());
        self.comments = Some(comments.into());
        self
    }

    pub fn with_window(mut self, window: TaskWindow) -> Self {
        self.task_status = window;
        self
    }

    pub fn is_submitted(&self) -> bool {
        self.status == SubmissionStatus::Submitted
    }

    /// Description split into display lines, bullet markers stripped.
    pub fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.description
            .lines()
            .map(|l| l.trim().trim_start_matches('•').trim())
            .filter(|l| !l.is_empty())
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::document::SupervisorDocument;
use super::submission::{SubmissionTask, TaskWindow};

/// Reasons a seeded board is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("week numbers start at 1")]
    ZeroWeek,
    #[error("week {0} appears more than once")]
    DuplicateWeek(u32),
    #[error("week {0} is submitted but has no file attached")]
    SubmittedWithoutFile(u32),
}

/// The student's weekly submissions plus the supervisor's shared documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub submissions: Vec<SubmissionTask>,
    #[serde(default)]
    pub documents: Vec<SupervisorDocument>,
}

impl Board {
    /// Check seed invariants and put submissions in week order.
    pub fn normalized(mut self) -> Result<Self, BoardError> {
        self.submissions.sort_by_key(|s| s.week);
        for pair in self.submissions.windows(2) {
            if pair[0].week == pair[1].week {
                return Err(BoardError::DuplicateWeek(pair[0].week));
            }
        }
        for s in &self.submissions {
            if s.week == 0 {
                return Err(BoardError::ZeroWeek);
            }
            if s.is_submitted() && s.submitted_file.is_none() {
                return Err(BoardError::SubmittedWithoutFile(s.week));
            }
        }
        Ok(self)
    }

    /// File names referenced by seeded submissions and documents.
    pub fn referenced_files(&self) -> Vec<String> {
        self.submissions
            .iter()
            .filter_map(|s| s.submitted_file.clone())
            .chain(self.documents.iter().map(|d| d.file_name()))
            .collect()
    }

    /// Built-in sample data for the final-year-project course.
    pub fn sample() -> Self {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default();

        let submissions = vec![
            SubmissionTask::new(
                1,
                "Project Area and Faculty Supervisor Expert Briefing",
                "Final Year Project 1 Briefing Project Area and Faculty Supervisor Expert Briefing",
                d(2025, 9, 15),
                d(2025, 10, 30),
            )
            .with_submission("Week1_Briefing.pdf", "Good start")
            .with_window(TaskWindow::Closed),
            SubmissionTask::new(
                2,
                "Project Planning",
                "• Project Planning\n• How to complete project proposal form\n• Project Proposal Interview",
                d(2025, 9, 22),
                d(2025, 11, 6),
            )
            .with_submission("Proposal_draft.pdf", "Excellent work")
            .with_window(TaskWindow::Closed),
            SubmissionTask::new(
                3,
                "Introduction",
                "• Problem statement\n• Project Objective, Scope, Justification\n• Log Book\n• Project Discussion and Supervisory Meeting starts",
                d(2025, 9, 29),
                d(2025, 11, 13),
            ),
            SubmissionTask::new(
                4,
                "Literature Review",
                "• Research methodology\n• Literature review techniques\n• Citation and referencing",
                d(2025, 10, 6),
                d(2025, 11, 20),
            ),
        ];

        let documents = vec![
            SupervisorDocument::new(1, "Thesis Information", d(2025, 1, 15)),
            SupervisorDocument::new(2, "Research Guidelines", d(2025, 1, 10)),
        ];

        Self {
            submissions,
            documents,
        }
    }
}

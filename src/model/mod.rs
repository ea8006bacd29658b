pub mod board;
pub mod document;
pub mod submission;

pub use board::{Board, BoardError};
pub use document::SupervisorDocument;
pub use submission::{SubmissionStatus, SubmissionTask, TaskWindow};

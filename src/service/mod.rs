pub mod config;
pub mod error;
pub mod store;
pub mod tracker;
pub mod worker;

pub use config::TrackerConfig;
pub use store::LocalFileStore;
pub use tracker::{FileSelection, Notification, NotificationKind, SubmissionTracker};
pub use worker::{Job, JobOutcome, TransferWorker};

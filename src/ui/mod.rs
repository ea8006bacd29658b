pub mod dialogs;
pub mod documents_panel;
pub mod notification;
pub mod submission_list;
pub mod theme;
pub mod toolbar;

//! What the controller needs from a user interface.

use std::path::PathBuf;

/// User-triggerable actions whose availability the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Select,
    Process,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Error, title, message)
    }

    fn with_level(
        level: NoticeLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Presentation and input capture. Implementations show dialogs and render
/// state but never touch image files or CSV output themselves.
pub trait UiSurface {
    /// Multi-select file picker. Empty when cancelled.
    fn pick_files(&mut self) -> Vec<PathBuf>;
    /// Save dialog for the CSV destination. `None` when cancelled.
    fn pick_save_path(&mut self, default_name: &str) -> Option<PathBuf>;
    fn show_file_list(&mut self, files: &[PathBuf]);
    fn start_progress(&mut self, total: usize);
    fn update_progress(&mut self, done: usize);
    fn set_status(&mut self, message: &str);
    fn set_action_enabled(&mut self, action: Action, enabled: bool);
    fn notify(&mut self, notice: Notice);
}

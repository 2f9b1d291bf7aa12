//! egui-side state the controller pushes into, plus the native dialogs.

use image_batch_core::{Action, Notice, SUPPORTED_EXTENSIONS, UiSurface, base_name};
use rfd::FileDialog;
use std::collections::VecDeque;
use std::path::PathBuf;

pub(crate) struct EguiSurface {
    pub(crate) file_names: Vec<String>,
    pub(crate) progress_done: usize,
    pub(crate) progress_total: usize,
    pub(crate) status: String,
    pub(crate) select_enabled: bool,
    pub(crate) process_enabled: bool,
    pub(crate) export_enabled: bool,
    pub(crate) notices: VecDeque<Notice>,
}

impl Default for EguiSurface {
    fn default() -> Self {
        Self {
            file_names: Vec::new(),
            progress_done: 0,
            progress_total: 0,
            status: "Ready".to_string(),
            select_enabled: true,
            process_enabled: false,
            export_enabled: false,
            notices: VecDeque::new(),
        }
    }
}

impl EguiSurface {
    pub(crate) fn file_count_label(&self) -> String {
        match self.file_names.len() {
            0 => "No files selected".to_string(),
            1 => "1 file selected".to_string(),
            n => format!("{n} files selected"),
        }
    }

    pub(crate) fn progress_fraction(&self) -> f32 {
        if self.progress_total == 0 {
            0.0
        } else {
            self.progress_done as f32 / self.progress_total as f32
        }
    }
}

impl UiSurface for EguiSurface {
    fn pick_files(&mut self) -> Vec<PathBuf> {
        FileDialog::new()
            .set_title("Select image files")
            .add_filter("Image files", &SUPPORTED_EXTENSIONS)
            .add_filter("PNG files", &["png"])
            .add_filter("JPG files", &["jpg", "jpeg"])
            .add_filter("All files", &["*"])
            .pick_files()
            .unwrap_or_default()
    }

    fn pick_save_path(&mut self, default_name: &str) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Save CSV file")
            .add_filter("CSV files", &["csv"])
            .set_file_name(default_name)
            .save_file()
    }

    fn show_file_list(&mut self, files: &[PathBuf]) {
        self.file_names = files.iter().map(|p| base_name(p)).collect();
    }

    fn start_progress(&mut self, total: usize) {
        self.progress_total = total;
        self.progress_done = 0;
    }

    fn update_progress(&mut self, done: usize) {
        self.progress_done = done.min(self.progress_total);
    }

    fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
    }

    fn set_action_enabled(&mut self, action: Action, enabled: bool) {
        match action {
            Action::Select => self.select_enabled = enabled,
            Action::Process => self.process_enabled = enabled,
            Action::Export => self.export_enabled = enabled,
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }
}

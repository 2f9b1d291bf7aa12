//! Sequences UI events into processor and exporter calls.

use crate::error::ExportError;
use crate::exporter::{export_to_csv, validate_data, with_csv_extension};
use crate::processor::{ImageProcessor, MockProcessor, base_name, check_image_file};
use crate::record::ProcessedRecord;
use crate::settings::SessionSettings;
use crate::surface::{Action, Notice, UiSurface};
use std::path::PathBuf;

/// Where the session is in the select → process → export flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    FilesSelected,
    Processed,
}

/// Outcome of one processing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub processed: usize,
    /// Files that failed, with the reason shown to the user.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Owns the selection and the accumulated records of a session.
pub struct Controller<P = MockProcessor> {
    processor: P,
    settings: SessionSettings,
    selection: Vec<PathBuf>,
    records: Vec<ProcessedRecord>,
    phase: Phase,
}

impl Default for Controller<MockProcessor> {
    fn default() -> Self {
        Self::new(MockProcessor::default())
    }
}

impl<P: ImageProcessor> Controller<P> {
    pub fn new(processor: P) -> Self {
        Self::with_settings(processor, SessionSettings::default())
    }

    pub fn with_settings(processor: P, settings: SessionSettings) -> Self {
        Self {
            processor,
            settings,
            selection: Vec::new(),
            records: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> &[PathBuf] {
        &self.selection
    }

    pub fn records(&self) -> &[ProcessedRecord] {
        &self.records
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: SessionSettings) {
        self.settings = settings;
    }

    pub fn processor_mut(&mut self) -> &mut P {
        &mut self.processor
    }

    /// "Choose files": open the picker and take over the valid part of the
    /// result. Cancelling leaves everything as it was.
    pub fn handle_select_files(&mut self, ui: &mut dyn UiSurface) {
        let files = ui.pick_files();
        if files.is_empty() {
            return;
        }
        self.select_files(files, ui);
    }

    /// Replace the selection with the valid entries of `files`.
    /// Returns how many files were accepted.
    pub fn select_files(&mut self, files: Vec<PathBuf>, ui: &mut dyn UiSurface) -> usize {
        let offered = files.len();
        let valid: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| match check_image_file(path) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!("skipping selection entry: {err}");
                    false
                }
            })
            .collect();

        if valid.len() != offered {
            ui.notify(Notice::warning(
                "Invalid Files",
                format!(
                    "{} file(s) were skipped (not valid image files)",
                    offered - valid.len()
                ),
            ));
        }
        if valid.is_empty() {
            ui.notify(Notice::warning(
                "No Valid Files",
                "No valid image files were selected.",
            ));
            return 0;
        }

        self.selection = valid;
        self.records.clear();
        self.phase = Phase::FilesSelected;
        ui.show_file_list(&self.selection);
        ui.start_progress(self.selection.len());
        ui.set_action_enabled(Action::Process, true);
        ui.set_action_enabled(Action::Export, false);
        ui.set_status(&format!("{} files selected", self.selection.len()));
        tracing::info!("{} file(s) selected", self.selection.len());
        self.selection.len()
    }

    /// "Start processing": run the processor over the selection in order.
    /// Failing files are reported and skipped; the pass always completes.
    pub fn handle_process(&mut self, ui: &mut dyn UiSurface) -> Option<ProcessSummary> {
        if self.phase == Phase::Idle || self.selection.is_empty() {
            ui.notify(Notice::warning("No Files", "Please select files first."));
            return None;
        }

        self.records.clear();
        let total = self.selection.len();
        ui.start_progress(total);
        ui.set_action_enabled(Action::Process, false);
        ui.set_action_enabled(Action::Select, false);
        ui.set_action_enabled(Action::Export, false);

        let mut summary = ProcessSummary::default();
        for (idx, path) in self.selection.iter().enumerate() {
            let done = idx + 1;
            let name = base_name(path);
            ui.set_status(&format!("Processing {done}/{total}: {name}"));
            match self.processor.process(path) {
                Ok(record) => self.records.push(record),
                Err(err) => {
                    tracing::warn!("processing failed for {}: {err}", path.display());
                    ui.notify(Notice::error(
                        "Processing Error",
                        format!("Error processing {name}:\n{err}"),
                    ));
                    summary.skipped.push((path.clone(), err.to_string()));
                }
            }
            ui.update_progress(done);
        }
        summary.processed = self.records.len();

        ui.set_action_enabled(Action::Select, true);
        ui.set_action_enabled(Action::Process, true);
        self.phase = Phase::Processed;

        if self.records.is_empty() {
            ui.set_status("Processing failed - no data extracted.");
        } else {
            ui.set_action_enabled(Action::Export, true);
            ui.set_status(&format!(
                "Processing complete! {} images processed.",
                self.records.len()
            ));
            if self.settings.announce_success {
                ui.notify(Notice::info(
                    "Success",
                    format!("Successfully processed {} images!", self.records.len()),
                ));
            }
        }
        tracing::info!(
            "processing pass finished: {} ok, {} skipped",
            summary.processed,
            summary.skipped.len()
        );
        Some(summary)
    }

    /// "Export results": write the current records to a user-chosen CSV file.
    /// `None` when nothing was attempted (invalid state or cancelled dialog).
    pub fn handle_export(
        &mut self,
        ui: &mut dyn UiSurface,
    ) -> Option<Result<PathBuf, ExportError>> {
        if self.phase != Phase::Processed || self.records.is_empty() {
            ui.notify(Notice::warning("No Data", "Please process images first."));
            return None;
        }
        if !validate_data(&self.records) {
            ui.notify(Notice::error(
                "Invalid Data",
                "Processed data is not in valid format for export.",
            ));
            return None;
        }

        let destination = with_csv_extension(ui.pick_save_path(self.settings.export_name())?);
        match export_to_csv(&self.records, &destination) {
            Ok(()) => {
                ui.set_status(&format!("Data exported to {}", base_name(&destination)));
                if self.settings.announce_success {
                    ui.notify(Notice::info(
                        "Success",
                        format!("Data successfully exported to:\n{}", destination.display()),
                    ));
                }
                Some(Ok(destination))
            }
            Err(err) => {
                tracing::warn!("export to {} failed: {err}", destination.display());
                ui.notify(Notice::error(
                    "Export Error",
                    format!("Failed to export data:\n{err}"),
                ));
                Some(Err(err))
            }
        }
    }

    /// Forget the selection and all records.
    pub fn reset(&mut self, ui: &mut dyn UiSurface) {
        self.selection.clear();
        self.records.clear();
        self.phase = Phase::Idle;
        ui.show_file_list(&[]);
        ui.start_progress(0);
        ui.set_action_enabled(Action::Select, true);
        ui.set_action_enabled(Action::Process, false);
        ui.set_action_enabled(Action::Export, false);
        ui.set_status("Ready");
    }
}

//! Settings panel for the current session.

use super::{Panel, UiApp};
use eframe::egui;
use image_batch_core::{MAX_SIMULATED_DELAY_MS, SessionSettings};

impl UiApp {
    /// Renders the session settings; changes take effect on "Apply".
    pub(super) fn render_settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Default export file name");
            ui.text_edit_singleline(&mut self.pending_settings.default_export_name);
        });
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label("Simulated processing delay per file");
            ui.add(
                egui::DragValue::new(&mut self.pending_settings.simulated_delay_ms)
                    .range(0..=MAX_SIMULATED_DELAY_MS)
                    .speed(10)
                    .suffix(" ms"),
            )
            .on_hover_text(
                "Processing runs in one step: the window does not redraw until every \
                 file is done, so progress shows only the final count.",
            );
        });
        ui.add_space(12.0);
        ui.checkbox(
            &mut self.pending_settings.announce_success,
            "Show a confirmation after processing and export",
        );

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                self.apply_pending_settings();
                self.panel = Panel::Images;
            }
            if ui.button("Restore defaults").clicked() {
                self.pending_settings = SessionSettings::default();
            }
        });
    }

    fn apply_pending_settings(&mut self) {
        let settings = self.pending_settings.clone();
        self.controller
            .processor_mut()
            .set_simulated_delay(settings.simulated_delay());
        tracing::info!("session settings applied: {settings:?}");
        self.controller.apply_settings(settings);
        self.surface.status = "Settings applied.".to_string();
    }
}

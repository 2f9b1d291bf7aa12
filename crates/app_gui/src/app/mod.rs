use eframe::{App, Frame, egui};
use image_batch_core::{Controller, MockProcessor, NoticeLevel, SessionSettings};

mod settings;
mod surface;

use surface::EguiSurface;

const APP_VERSION: &str = env!("IMAGE_BATCH_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Images,
    Settings,
}

pub struct UiApp {
    controller: Controller<MockProcessor>,
    surface: EguiSurface,
    panel: Panel,
    /// Edited in the settings panel, applied on demand.
    pending_settings: SessionSettings,
}

impl Default for UiApp {
    fn default() -> Self {
        let settings = SessionSettings::default();
        let processor = MockProcessor::new().with_simulated_delay(settings.simulated_delay());
        Self {
            controller: Controller::with_settings(processor, settings.clone()),
            surface: EguiSurface::default(),
            panel: Panel::Images,
            pending_settings: settings,
        }
    }
}

impl UiApp {
    fn render_images_panel(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Image Processing Tool");
        });
        ui.add_space(12.0);

        ui.group(|ui| {
            ui.label(egui::RichText::new("File Selection").strong());
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.surface.select_enabled, egui::Button::new("Select Images"))
                    .clicked()
                {
                    self.controller.handle_select_files(&mut self.surface);
                }
                ui.label(self.surface.file_count_label());
            });
            ui.add_space(6.0);
            egui::ScrollArea::vertical()
                .max_height(140.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for name in &self.surface.file_names {
                        ui.label(name);
                    }
                });
        });
        ui.add_space(8.0);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Processing").strong());
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        self.surface.process_enabled,
                        egui::Button::new("Process Images"),
                    )
                    .clicked()
                {
                    // Blocking pass on the UI thread.
                    self.controller.handle_process(&mut self.surface);
                }
                if ui
                    .add_enabled(self.surface.export_enabled, egui::Button::new("Export to CSV"))
                    .clicked()
                {
                    self.controller.handle_export(&mut self.surface);
                }
                if ui
                    .add_enabled(self.surface.select_enabled, egui::Button::new("Reset"))
                    .clicked()
                {
                    self.controller.reset(&mut self.surface);
                }
            });
        });
        ui.add_space(8.0);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Progress").strong());
            let text = format!(
                "{}/{}",
                self.surface.progress_done, self.surface.progress_total
            );
            ui.add(
                egui::ProgressBar::new(self.surface.progress_fraction())
                    .show_percentage()
                    .text(text),
            );
            ui.label(&self.surface.status);
        });
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.surface.notices.front() else {
            return;
        };
        let color = match notice.level {
            NoticeLevel::Info => ctx.style().visuals.text_color(),
            NoticeLevel::Warning => ctx.style().visuals.warn_fg_color,
            NoticeLevel::Error => ctx.style().visuals.error_fg_color,
        };
        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.colored_label(color, notice.message.as_str());
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.surface.notices.pop_front();
        }
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let modal_open = !self.surface.notices.is_empty();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.panel, Panel::Images, "Images");
                    ui.selectable_value(&mut self.panel, Panel::Settings, "Settings");
                });
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.small(format!("Version {APP_VERSION}"));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| match self.panel {
                Panel::Images => self.render_images_panel(ui),
                Panel::Settings => self.render_settings_panel(ui),
            });
        });

        self.render_notice(ctx);
    }
}

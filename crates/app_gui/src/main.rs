use anyhow::anyhow;
use eframe::{NativeOptions, egui};

mod app;

use app::UiApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Image Processor")
            .with_inner_size([700.0, 500.0])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Image Processor",
        options,
        Box::new(|_cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::default()))
        }),
    )
    .map_err(|e| {
        tracing::error!("event loop stopped: {e}");
        anyhow!("application stopped with an error: {e}")
    })
}

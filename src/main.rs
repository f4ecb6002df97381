mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::CensusViewerApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::from_env()?;
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Census Viewer – Population by Prefecture",
        options,
        Box::new(move |cc| {
            match ui::fonts::install(&cc.egui_ctx, config.font_path.as_deref()) {
                Ok(Some(path)) => log::info!("Using font {}", path.display()),
                Ok(None) => log::warn!("No CJK font found; Japanese labels may not render"),
                Err(e) => log::warn!("Could not load font: {e:#}"),
            }
            Ok(Box::new(CensusViewerApp::new(&config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}

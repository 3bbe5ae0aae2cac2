// main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod body;
mod canvas3d;
mod catalog;
mod error;
mod highlight;
mod json_loader;
mod translate;
mod ui_panels;
mod viewer;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (config, viewer) = app::AnatomyApp::prepare().map_err(|e| {
        log::error!("refusing to start: {e}");
        e
    })?;

    let icon_data = {
        let image = image::load_from_memory(include_bytes!("../assets/icon-64.png"))?.to_rgba8();
        let (width, height) = image.dimensions();
        egui::IconData { rgba: image.into_raw(), width, height }
    };

    let w = &config.window;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(w.title.clone())
            .with_inner_size([w.width, w.height])
            .with_min_inner_size([w.min_width, w.min_height])
            .with_icon(std::sync::Arc::new(icon_data)),
        centered: true,
        persist_window: false,
        ..Default::default()
    };

    let title = w.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(app::AnatomyApp::new(cc, config, viewer)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run eframe: {e}"))
}

use egui::{Context, CentralPanel, SidePanel, RichText, ScrollArea};
use crate::{canvas3d::draw_3d_canvas, error::Result, json_loader::ViewerConfig,
    ui_panels::{self, PanelAction}, viewer::Viewer};

pub struct AnatomyApp {
    pub viewer: Viewer,
    pub config: ViewerConfig,
}

impl AnatomyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig, viewer: Viewer) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);
        Self { viewer, config }
    }

    /// Loads everything the window needs; any failure means the window never opens.
    pub fn prepare() -> Result<(ViewerConfig, Viewer)> {
        let config: ViewerConfig = crate::json_loader::load("viewer.json")?;
        let viewer = Viewer::new(&config)?;
        Ok((config, viewer))
    }

    fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::Select(i)     => { self.viewer.select(i); }
            PanelAction::Separation(d) => self.viewer.set_separation(d),
            PanelAction::Reset         => {
                self.viewer.reset();
                log::debug!("view reset");
            }
        }
    }
}

// ── Main loop ─────────────────────────────────────────────────────────────────

impl eframe::App for AnatomyApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let pending = SidePanel::left("controls").min_width(300.0).max_width(420.0).show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading(RichText::new(&self.config.window.title).strong());
            ui.add_space(4.0);
            ScrollArea::vertical().show(ui, |ui| ui_panels::render_controls(ui, &self.viewer, &self.config.text)).inner
        }).inner;
        if let Some(action) = pending { self.apply(action); }

        SidePanel::right("info").min_width(220.0).max_width(320.0).show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| ui_panels::render_info(ui, self.viewer.panel(), &self.config.text));
        });

        CentralPanel::default().frame(egui::Frame::NONE).show(ctx, |ui| {
            let size = ui.available_size();
            let sway = self.config.idle_sway.angle(ui.input(|i| i.time));
            let out = draw_3d_canvas(ui, &self.viewer.model, &self.config, &mut self.viewer.camera, sway, size);
            if let (Some(id), Some(pos)) = (out.hovered, out.response.hover_pos()) {
                let name = self.viewer.translator.translate(&self.viewer.model.part_by_id(id).name);
                ui.painter().text(pos + egui::vec2(14.0, -4.0), egui::Align2::LEFT_BOTTOM, name,
                    egui::FontId::proportional(14.0), egui::Color32::WHITE);
            }
        });

        // The figure sways continuously, so every frame is redrawn.
        ctx.request_repaint();
    }
}

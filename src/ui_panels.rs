// ui_panels.rs
use egui::{Ui, CollapsingHeader, RichText, Slider, Color32};
use crate::catalog::Category;
use crate::json_loader::UiText;
use crate::viewer::{InfoPanel, Viewer};

pub enum PanelAction { Select(usize), Separation(f32), Reset }

/// Action buttons grouped by category, the separation slider and reset.
pub fn render_controls(ui: &mut Ui, viewer: &Viewer, text: &UiText) -> Option<PanelAction> {
    let mut action = None;
    for (category, title) in [(Category::Sport, &text.sport_header), (Category::Daily, &text.daily_header)] {
        ui.add_space(2.0);
        egui::Frame::NONE.inner_margin(egui::Margin::symmetric(4, 2)).show(ui, |ui| {
            CollapsingHeader::new(RichText::new(title).strong()).default_open(true).show(ui, |ui| {
                ui.add_space(4.0);
                ui.horizontal_wrapped(|ui| {
                    for (i, a) in viewer.catalog.by_category(category) {
                        if ui.selectable_label(viewer.selected() == Some(i), &a.label).clicked() {
                            action = Some(PanelAction::Select(i));
                        }
                    }
                });
                ui.add_space(4.0);
            });
        });
        ui.separator();
    }

    ui.label(&text.separation_label);
    let mut sep = viewer.separation();
    if ui.add(Slider::new(&mut sep, 0.0..=viewer.separation_max()).step_by(0.5)).changed() {
        action = Some(PanelAction::Separation(sep));
    }
    ui.add_space(8.0);
    if ui.button(RichText::new(&text.reset_button).size(14.0)).clicked() {
        action = Some(PanelAction::Reset);
    }
    action
}

pub fn render_info(ui: &mut Ui, panel: &InfoPanel, text: &UiText) {
    ui.heading(&text.info_header);
    ui.separator();
    let InfoPanel::Action { label, bones, muscles } = panel else {
        ui.label(RichText::new(&text.placeholder).italics().color(Color32::from_gray(140)));
        return;
    };
    ui.label(RichText::new(label).strong().size(15.0));
    ui.add_space(6.0);
    ui.label(RichText::new(&text.bones_header).strong().color(Color32::from_rgb(0, 210, 255)));
    for b in bones { ui.label(b); }
    if !muscles.is_empty() {
        ui.add_space(12.0);
        ui.label(RichText::new(&text.muscles_header).strong().color(Color32::from_rgb(255, 68, 68)));
        for m in muscles { ui.label(m); }
    }
}

// viewer.rs: what the buttons and slider do, independent of egui.
use crate::body::{build_figure, BodyModel};
use crate::canvas3d::Camera3D;
use crate::catalog::{ActionDefinition, Catalog};
use crate::error::Result;
use crate::highlight::{apply_highlight, clear_highlight};
use crate::json_loader::ViewerConfig;
use crate::translate::Translator;

/// Side-panel contents: translated names, bones first.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InfoPanel {
    #[default]
    Placeholder,
    Action { label: String, bones: Vec<String>, muscles: Vec<String> },
}

impl InfoPanel {
    pub fn for_action(action: &ActionDefinition, tr: &Translator) -> Self {
        let names = |list: &[String]| -> Vec<String> { list.iter().map(|n| tr.translate(n)).collect() };
        InfoPanel::Action { label: action.label.clone(), bones: names(&action.active_bones), muscles: names(&action.active_muscles) }
    }
}

pub struct Viewer {
    pub model:       BodyModel,
    pub catalog:     Catalog,
    pub translator:  Translator,
    pub camera:      Camera3D,
    default_camera:  Camera3D,
    separation_max:  f32,
    separation:      f32,
    selected:        Option<usize>,
    panel:           InfoPanel,
}

impl Viewer {
    /// Builds the figure and refuses to start if any action names a part the
    /// figure does not have.
    pub fn new(cfg: &ViewerConfig) -> Result<Self> {
        let model = build_figure()?;
        let catalog = Catalog::load()?;
        catalog.validate(&model)?;
        let translator = Translator::load()?;
        log::info!("catalog: {} actions validated", catalog.len());
        let camera = Camera3D::from_config(&cfg.camera);
        Ok(Self {
            model, catalog, translator,
            default_camera: camera.clone(), camera,
            separation_max: cfg.separation_max.max(0.0), separation: 0.0,
            selected: None, panel: InfoPanel::Placeholder,
        })
    }

    /// Highlights the action at `index`, replacing any previous selection.
    pub fn select(&mut self, index: usize) -> Option<&ActionDefinition> {
        let action = self.catalog.actions().get(index)?;
        let summary = apply_highlight(&mut self.model, &action.active_bones, &action.active_muscles);
        log::debug!("selected '{}': {} bones, {} muscles", action.id, summary.bones, summary.muscles);
        self.panel = InfoPanel::for_action(action, &self.translator);
        self.selected = Some(index);
        Some(action)
    }

    pub fn set_separation(&mut self, distance: f32) {
        self.separation = if distance.is_finite() { distance.clamp(0.0, self.separation_max) } else { 0.0 };
        self.model.set_group_separation(self.separation);
    }

    pub fn reset(&mut self) {
        clear_highlight(&mut self.model);
        self.set_separation(0.0);
        self.camera = self.default_camera.clone();
        self.selected = None;
        self.panel = InfoPanel::Placeholder;
    }

    pub fn selected(&self) -> Option<usize> { self.selected }
    pub fn separation(&self) -> f32 { self.separation }
    pub fn separation_max(&self) -> f32 { self.separation_max }
    pub fn panel(&self) -> &InfoPanel { &self.panel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{MaterialState, PartKind};
    use crate::json_loader::load;
    use egui::Vec2;

    fn viewer() -> Viewer { Viewer::new(&load("viewer.json").unwrap()).unwrap() }

    fn active(v: &Viewer, kind: PartKind) -> Vec<&str> {
        v.model.registry(kind).ids().iter().map(|&id| v.model.part_by_id(id))
            .filter(|p| p.is_active()).map(|p| p.name.as_str()).collect()
    }

    fn index_of(v: &Viewer, id: &str) -> usize {
        v.catalog.actions().iter().position(|a| a.id == id).unwrap()
    }

    #[test]
    fn running_highlights_exactly_its_parts() {
        let mut v = viewer();
        let i = index_of(&v, "running");
        assert_eq!(v.select(i).map(|a| a.id.as_str()), Some("running"));

        let mut bones = active(&v, PartKind::Bone);
        bones.sort_unstable();
        assert_eq!(bones, ["femur_L", "femur_R", "humerus_L", "humerus_R", "tibia_L", "tibia_R"]);
        let mut muscles = active(&v, PartKind::Muscle);
        muscles.sort_unstable();
        assert_eq!(muscles, ["abdominals", "calves_L", "calves_R", "glutes",
            "hamstrings_L", "hamstrings_R", "quadriceps_L", "quadriceps_R"]);

        match v.panel() {
            InfoPanel::Action { label, bones, muscles } => {
                assert_eq!(label, "Correr");
                assert_eq!(bones, &["Fèmur (E)", "Fèmur (D)", "Tíbia (E)", "Tíbia (D)", "Húmer (E)", "Húmer (D)"]);
                assert_eq!(muscles, &["Quàdriceps (E)", "Quàdriceps (D)", "Isquiotibials (E)", "Isquiotibials (D)",
                    "Bessons (E)", "Bessons (D)", "Glutis", "Abdominals"]);
            }
            other => panic!("unexpected panel {other:?}"),
        }
        assert_eq!(v.selected(), Some(i));
    }

    #[test]
    fn new_selection_supersedes_previous() {
        let mut v = viewer();
        v.select(index_of(&v, "typing"));
        v.select(index_of(&v, "sitting"));
        assert_eq!(v.model.part_state(PartKind::Muscle, "trapezius"), Some(MaterialState::Normal));
        assert_eq!(v.model.part_state(PartKind::Bone, "hand_L"), Some(MaterialState::Normal));
        assert_eq!(active(&v, PartKind::Bone).len(), 4);
        assert_eq!(v.selected().map(|i| v.catalog.actions()[i].id.as_str()), Some("sitting"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut v = viewer();
        v.select(index_of(&v, "lifting"));
        v.set_separation(12.0);
        v.camera.orbit(Vec2::new(40.0, 20.0));
        v.reset();

        assert!(v.model.parts().iter().all(|p| p.state == MaterialState::Normal));
        assert_eq!(v.separation(), 0.0);
        let (b, m) = v.model.group_offsets();
        assert_eq!(b, m);
        assert_eq!(v.panel(), &InfoPanel::Placeholder);
        assert_eq!(v.selected(), None);
        assert_eq!(v.camera, Camera3D::from_config(&load::<ViewerConfig>("viewer.json").unwrap().camera));
    }

    #[test]
    fn separation_is_clamped_to_slider_range() {
        let mut v = viewer();
        v.set_separation(1e6);
        assert_eq!(v.separation(), v.separation_max());
        v.set_separation(-3.0);
        assert_eq!(v.separation(), 0.0);
        v.set_separation(f32::NAN);
        assert_eq!(v.separation(), 0.0);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut v = viewer();
        assert!(v.select(999).is_none());
        assert_eq!(v.panel(), &InfoPanel::Placeholder);
    }

    #[test]
    fn muscle_section_may_be_empty() {
        let tr = Translator::load().unwrap();
        let a = ActionDefinition {
            id: "stand".into(), label: "Dempeus".into(), category: crate::catalog::Category::Daily,
            active_bones: vec!["spine".into()], active_muscles: vec![],
        };
        assert_eq!(InfoPanel::for_action(&a, &tr),
            InfoPanel::Action { label: "Dempeus".into(), bones: vec!["Columna".into()], muscles: vec![] });
    }
}

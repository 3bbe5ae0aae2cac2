// highlight.rs: reset-then-apply material swap over the part registries.
use crate::body::{BodyModel, MaterialState, PartKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightSummary { pub bones: usize, pub muscles: usize }

/// Every part goes back to Normal, then the named bones and muscles become
/// Active. Owned primitives follow their part. Unknown names are skipped, so the
/// outcome depends only on the two lists.
pub fn apply_highlight<B: AsRef<str>, M: AsRef<str>>(model: &mut BodyModel, bones: &[B], muscles: &[M]) -> HighlightSummary {
    for id in 0..model.parts().len() { model.set_state(id, MaterialState::Normal); }
    HighlightSummary {
        bones:   activate(model, PartKind::Bone, bones),
        muscles: activate(model, PartKind::Muscle, muscles),
    }
}

pub fn clear_highlight(model: &mut BodyModel) {
    apply_highlight::<&str, &str>(model, &[], &[]);
}

fn activate<S: AsRef<str>>(model: &mut BodyModel, kind: PartKind, names: &[S]) -> usize {
    let mut n = 0;
    for name in names {
        let name = name.as_ref();
        match model.registry(kind).get(name) {
            Some(id) => {
                if !model.part_by_id(id).is_active() { n += 1; }
                model.set_state(id, MaterialState::Active);
            }
            None => log::debug!("highlight: no {kind} named '{name}'"),
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::build_figure;

    fn states(m: &BodyModel) -> Vec<MaterialState> {
        m.nodes().iter().enumerate().filter(|(_, n)| n.mesh.is_some())
            .map(|(i, _)| m.primitive_state(i)).collect()
    }

    #[test]
    fn full_reset_restores_normal() {
        let mut m = build_figure().unwrap();
        let before = states(&m);
        assert!(before.iter().all(|s| *s == MaterialState::Normal));
        apply_highlight(&mut m, &["ribs", "femur_L"], &["glutes"]);
        assert_ne!(states(&m), before);
        apply_highlight::<&str, &str>(&mut m, &[], &[]);
        assert_eq!(states(&m), before);
    }

    #[test]
    fn idempotent() {
        let mut m = build_figure().unwrap();
        apply_highlight(&mut m, &["spine", "hips"], &["abdominals"]);
        let once = states(&m);
        apply_highlight(&mut m, &["spine", "hips"], &["abdominals"]);
        assert_eq!(states(&m), once);
    }

    #[test]
    fn no_accumulation_across_selections() {
        let mut m = build_figure().unwrap();
        apply_highlight(&mut m, &["skull"], &["trapezius"]);
        apply_highlight(&mut m, &["hand_L"], &["forearms_L"]);
        assert_eq!(m.part_state(PartKind::Bone, "skull"), Some(MaterialState::Normal));
        assert_eq!(m.part_state(PartKind::Muscle, "trapezius"), Some(MaterialState::Normal));
        assert_eq!(m.part_state(PartKind::Bone, "hand_L"), Some(MaterialState::Active));
    }

    #[test]
    fn decorations_follow_owner() {
        let mut m = build_figure().unwrap();
        apply_highlight::<&str, &str>(&mut m, &["ribs", "skull", "hips"], &[]);
        for name in ["ribs", "skull", "hips"] {
            let part = m.bone(name).unwrap();
            assert!(part.primitives.iter().all(|&n| m.primitive_state(n) == MaterialState::Active));
        }
        let spine = m.bone("spine").unwrap();
        assert!(spine.primitives.iter().all(|&n| m.primitive_state(n) == MaterialState::Normal));
    }

    #[test]
    fn unknown_names_ignored_and_kinds_not_mixed() {
        let mut m = build_figure().unwrap();
        let s = apply_highlight(&mut m, &["tail", "glutes"], &["spine", "calves_R", "calves_R"]);
        assert_eq!(s, HighlightSummary { bones: 0, muscles: 1 });
        assert_eq!(m.parts().iter().filter(|p| p.is_active()).count(), 1);
    }
}

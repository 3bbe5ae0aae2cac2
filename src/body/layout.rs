// body/layout.rs: the hand-placed figure. Units are arbitrary; Y is up, the
// figure faces +Z, feet rest around y = -17 and the top of the skull near y = 36.
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};
use crate::error::Result;
use super::geometry::{Shape, Transform};
use super::model::BodyModel;

#[derive(Clone, Copy)]
enum Side { Left, Right }

impl Side {
    fn suffix(self) -> &'static str { match self { Side::Left => "_L", Side::Right => "_R" } }
    /// Left is -X.
    fn dir(self) -> f32 { match self { Side::Left => -1.0, Side::Right => 1.0 } }
}

/// Builds the complete skeleton and musculature.
pub fn build_figure() -> Result<BodyModel> {
    let mut m = BodyModel::empty();
    pelvis(&mut m)?;
    spine(&mut m)?;
    ribcage(&mut m)?;
    skull(&mut m)?;
    for side in [Side::Left, Side::Right] { leg(&mut m, side)?; }
    for side in [Side::Left, Side::Right] { arm(&mut m, side)?; }
    muscles(&mut m)?;
    log::info!("built figure: {} bones, {} muscles, {} nodes",
        m.registry(super::PartKind::Bone).len(), m.registry(super::PartKind::Muscle).len(), m.nodes().len());
    for p in m.parts() {
        log::debug!("{} '{}': {:?}, {} primitives", p.kind, p.name, p.parent, p.primitives.len());
    }
    Ok(m)
}

fn pelvis(m: &mut BodyModel) -> Result<()> {
    let group = m.add_group("pelvis", Some(m.groups().bones), Transform::at(Vec3::new(0.0, 10.0, 0.0)));
    let sacrum = m.build_bone("hips", 4.0, 1.5, Vec3::ZERO, [0.0, 0.0, FRAC_PI_2], Some(group))?;
    // Iliac wings: flattened spheres, highlighted with the sacrum.
    let wing = Shape::Sphere { radius: 2.5 };
    for (x, tilt) in [(-2.5, 0.2), (2.5, -0.2)] {
        let t = Transform::from_euler(Vec3::new(x, 1.0, 0.0), [0.0, 0.0, tilt]).with_scale(Vec3::new(1.0, 1.5, 0.5));
        m.attach_decoration(sacrum, wing, t, Some(group))?;
    }
    Ok(())
}

fn spine(m: &mut BodyModel) -> Result<()> {
    m.build_bone("spine", 12.0, 0.8, Vec3::new(0.0, 18.0, 0.0), [0.0; 3], None)?;
    Ok(())
}

fn ribcage(m: &mut BodyModel) -> Result<()> {
    let group = m.add_group("ribcage", Some(m.groups().bones), Transform::at(Vec3::new(0.0, 24.0, 0.0)));
    let sternum = m.register_bone("ribs", Shape::Cuboid { width: 1.0, height: 8.0, depth: 0.5 },
        Transform::at(Vec3::new(0.0, 0.0, 2.5)), Some(group))?;
    for i in 0..5 {
        let i = i as f32;
        let rib = Shape::Torus { radius: 3.0 - i * 0.3, tube: 0.15, arc: PI * 1.2 };
        let y = 3.0 - i * 1.5;
        m.attach_decoration(sternum, rib, Transform::from_euler(Vec3::new(0.0, y, 0.0), [0.0, -2.5, 0.0]), None)?;
        m.attach_decoration(sternum, rib, Transform::from_euler(Vec3::new(0.0, y, 0.0), [0.0, 2.5, PI]), None)?;
    }
    Ok(())
}

fn skull(m: &mut BodyModel) -> Result<()> {
    let group = m.add_group("skull", Some(m.groups().bones), Transform::at(Vec3::new(0.0, 33.5, 0.0)));
    let cranium = m.register_bone("skull", Shape::Sphere { radius: 2.2 },
        Transform::default().with_scale(Vec3::new(1.0, 1.2, 1.0)), Some(group))?;
    m.attach_decoration(cranium, Shape::Cuboid { width: 2.5, height: 1.5, depth: 2.5 },
        Transform::at(Vec3::new(0.0, -1.5, 0.5)), None)?;
    m.build_bone("neck", 3.0, 0.8, Vec3::new(0.0, 29.5, 0.0), [0.0; 3], None)?;
    Ok(())
}

fn leg(m: &mut BodyModel, side: Side) -> Result<()> {
    let (s, d) = (side.suffix(), side.dir());
    let x = 3.0 * d;
    m.build_bone(&format!("femur{s}"), 12.0, 1.0, Vec3::new(x, 3.0, 0.0), [0.0, 0.0, 0.1 * -d], None)?;
    m.build_bone(&format!("tibia{s}"), 12.0, 0.9, Vec3::new(x + d, -9.0, 0.0), [0.0; 3], None)?;
    m.build_bone(&format!("foot{s}"), 4.0, 0.8, Vec3::new(x + d, -16.0, 2.0), [FRAC_PI_2, 0.0, 0.0], None)?;
    Ok(())
}

fn arm(m: &mut BodyModel, side: Side) -> Result<()> {
    let (s, d) = (side.suffix(), side.dir());
    let x = 5.0 * d;
    m.build_bone(&format!("clavicle{s}"), 6.0, 0.6, Vec3::new(x, 27.0, 0.0), [0.0, 0.0, (FRAC_PI_2 - 0.2) * -d], None)?;
    m.build_bone(&format!("humerus{s}"), 10.0, 0.9, Vec3::new(x + 4.0 * d, 22.0, 0.0), [0.0, 0.0, 0.2 * -d], None)?;
    m.build_bone(&format!("radius{s}"), 10.0, 0.7, Vec3::new(x + 5.0 * d, 12.0, 0.0), [0.0, 0.0, 0.1 * -d], None)?;
    m.build_bone(&format!("hand{s}"), 3.0, 0.8, Vec3::new(x + 5.5 * d, 6.0, 0.0), [0.0; 3], None)?;
    Ok(())
}

type Span = (&'static str, [f32; 3], [f32; 3], f32);

const MUSCLES: &[Span] = &[
    // Trunk
    ("pectorals",    [-2.0, 26.0, 2.0],  [2.0, 26.0, 2.0],   2.5),
    ("abdominals",   [0.0, 20.0, 1.5],   [0.0, 12.0, 1.5],   2.0),
    ("latissimus_L", [-2.0, 20.0, -1.0], [-6.0, 24.0, -1.0], 2.0),
    ("latissimus_R", [2.0, 20.0, -1.0],  [6.0, 24.0, -1.0],  2.0),
    ("trapezius",    [0.0, 28.0, -1.0],  [0.0, 24.0, -1.0],  2.5),
    // Arms
    ("deltoids_L",   [-6.0, 27.0, 0.0],  [-9.0, 25.0, 0.0],  2.2),
    ("deltoids_R",   [6.0, 27.0, 0.0],   [9.0, 25.0, 0.0],   2.2),
    ("biceps_L",     [-9.0, 24.0, 0.5],  [-10.0, 17.0, 0.5], 1.2),
    ("biceps_R",     [9.0, 24.0, 0.5],   [10.0, 17.0, 0.5],  1.2),
    ("triceps_L",    [-9.0, 24.0, -0.5], [-10.0, 17.0, -0.5], 1.2),
    ("triceps_R",    [9.0, 24.0, -0.5],  [10.0, 17.0, -0.5], 1.2),
    ("forearms_L",   [-10.0, 14.0, 0.0], [-10.5, 8.0, 0.0],  1.0),
    ("forearms_R",   [10.0, 14.0, 0.0],  [10.5, 8.0, 0.0],   1.0),
    // Hips and legs
    ("glutes",       [0.0, 10.0, -2.0],  [0.0, 6.0, -2.0],   3.0),
    ("quadriceps_L", [-3.0, 8.0, 1.0],   [-4.0, -2.0, 1.0],  2.0),
    ("quadriceps_R", [3.0, 8.0, 1.0],    [4.0, -2.0, 1.0],   2.0),
    ("hamstrings_L", [-3.0, 8.0, -1.0],  [-4.0, -2.0, -1.0], 1.8),
    ("hamstrings_R", [3.0, 8.0, -1.0],   [4.0, -2.0, -1.0],  1.8),
    ("calves_L",     [-4.0, -5.0, -1.0], [-4.0, -12.0, -1.0], 1.5),
    ("calves_R",     [4.0, -5.0, -1.0],  [4.0, -12.0, -1.0], 1.5),
    ("lower_back",   [0.0, 10.0, -1.5],  [0.0, 16.0, -1.5],  2.5),
];

fn muscles(m: &mut BodyModel) -> Result<()> {
    for &(name, start, end, thickness) in MUSCLES {
        m.build_muscle(name, Vec3::from(start), Vec3::from(end), thickness)?;
    }
    Ok(())
}

// body/mesh.rs: tessellation of primitive shapes into local-space triangles.
// Normals are not stored: the canvas shades with per-face normals in world space.
use glam::Vec3;
use std::f32::consts::{PI, TAU};
use super::geometry::Shape;

const SEGMENTS: usize = 14;
const ARC_STEPS: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriMesh {
    pub fn from_shape(shape: &Shape) -> Self {
        match *shape {
            Shape::Cylinder { radius, height } => {
                let h = height * 0.5;
                lathe(&[(0.0, h), (radius, h), (radius, -h), (0.0, -h)])
            }
            Shape::Sphere { radius } => lathe(&arc(radius, 0.0, 0.0, PI, ARC_STEPS * 2)),
            Shape::Capsule { radius, length } => {
                let h = length * 0.5;
                let mut profile = arc(radius, h, 0.0, PI * 0.5, ARC_STEPS);
                profile.extend(arc(radius, -h, PI * 0.5, PI, ARC_STEPS));
                lathe(&profile)
            }
            Shape::Cuboid { width, height, depth } => cuboid(Vec3::new(width, height, depth) * 0.5),
            Shape::Torus { radius, tube, arc } => torus(radius, tube, arc),
        }
    }

    fn grid(&mut self, rows: usize, cols: usize, base: u32) {
        let stride = cols as u32 + 1;
        for r in 0..rows as u32 {
            for c in 0..cols as u32 {
                let a = base + r * stride + c;
                let (b, d) = (a + stride, a + 1);
                self.triangles.push([a, b, d]);
                self.triangles.push([d, b, b + 1]);
            }
        }
    }
}

/// Profile points `(radius, y)` from θ0 to θ1, θ measured from +Y.
fn arc(radius: f32, y_offset: f32, theta0: f32, theta1: f32, steps: usize) -> Vec<(f32, f32)> {
    (0..=steps).map(|i| {
        let t = theta0 + (theta1 - theta0) * i as f32 / steps as f32;
        (radius * t.sin(), y_offset + radius * t.cos())
    }).collect()
}

/// Revolves a `(radius, y)` profile around the Y axis.
fn lathe(profile: &[(f32, f32)]) -> TriMesh {
    let mut m = TriMesh::default();
    for &(r, y) in profile {
        for s in 0..=SEGMENTS {
            let (sin, cos) = (TAU * s as f32 / SEGMENTS as f32).sin_cos();
            m.positions.push(Vec3::new(r * cos, y, r * sin));
        }
    }
    m.grid(profile.len() - 1, SEGMENTS, 0);
    m
}

fn cuboid(h: Vec3) -> TriMesh {
    let positions = (0..8).map(|i| Vec3::new(
        if i & 1 == 0 { -h.x } else { h.x },
        if i & 2 == 0 { -h.y } else { h.y },
        if i & 4 == 0 { -h.z } else { h.z },
    )).collect();
    let faces: [[u32; 4]; 6] = [[0,1,3,2],[4,6,7,5],[0,4,5,1],[2,3,7,6],[0,2,6,4],[1,5,7,3]];
    let triangles = faces.iter().flat_map(|&[a,b,c,d]| [[a,b,c],[a,c,d]]).collect();
    TriMesh { positions, triangles }
}

fn torus(radius: f32, tube: f32, sweep: f32) -> TriMesh {
    let (tubular, radial) = (SEGMENTS, 6);
    let mut m = TriMesh::default();
    for i in 0..=tubular {
        let (su, cu) = (sweep * i as f32 / tubular as f32).sin_cos();
        for j in 0..=radial {
            let (sv, cv) = (TAU * j as f32 / radial as f32).sin_cos();
            let ring = radius + tube * cv;
            m.positions.push(Vec3::new(ring * cu, ring * su, tube * sv));
        }
    }
    m.grid(tubular, radial, 0);
    m
}

// body/geometry.rs
use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::error::{ModelError, Result};

/// Primitive shapes, all centred on the local origin. Long axes run along local Y
/// (cylinder, capsule); the torus lies in the XY plane and sweeps `arc` radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cylinder { radius: f32, height: f32 },
    Sphere   { radius: f32 },
    /// `length` is the straight section; total extent is `length + 2 * radius`.
    Capsule  { radius: f32, length: f32 },
    Cuboid   { width: f32, height: f32, depth: f32 },
    Torus    { radius: f32, tube: f32, arc: f32 },
}

impl Shape {
    fn dimensions(&self) -> Vec<(&'static str, f32)> {
        match *self {
            Shape::Cylinder { radius, height }     => vec![("radius", radius), ("height", height)],
            Shape::Sphere   { radius }             => vec![("radius", radius)],
            Shape::Capsule  { radius, length }     => vec![("radius", radius), ("length", length)],
            Shape::Cuboid   { width, height, depth } => vec![("width", width), ("height", height), ("depth", depth)],
            Shape::Torus    { radius, tube, arc }  => vec![("radius", radius), ("tube", tube), ("arc", arc)],
        }
    }

    /// Every dimension must be finite and strictly positive.
    pub fn validate(&self, part: &str) -> Result<()> {
        for (what, v) in self.dimensions() {
            if !v.is_finite() || v <= 0.0 {
                return Err(invalid(part, format!("{what} must be finite and positive, got {v}")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform { pub translation: Vec3, pub rotation: Quat, pub scale: Vec3 }

impl Default for Transform {
    fn default() -> Self { Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY, scale: Vec3::ONE } }
}

impl Transform {
    pub fn at(translation: Vec3) -> Self { Self { translation, ..Default::default() } }

    /// Euler angles applied in X, Y, Z order (intrinsic), matching three.js defaults.
    pub fn from_euler(translation: Vec3, [x, y, z]: [f32; 3]) -> Self {
        Self { translation, rotation: Quat::from_euler(EulerRot::XYZ, x, y, z), scale: Vec3::ONE }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self { self.scale = scale; self }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn validate(&self, part: &str) -> Result<()> {
        if !self.translation.is_finite() { return Err(invalid(part, format!("position {} is not finite", self.translation))); }
        if !self.rotation.is_finite()    { return Err(invalid(part, "rotation is not finite".into())); }
        if !self.scale.is_finite() || self.scale.min_element() <= 0.0 {
            return Err(invalid(part, format!("scale {} must be finite and positive", self.scale)));
        }
        Ok(())
    }
}

/// Placement of a capsule spanning two anchors: centred at the midpoint with
/// local Y pointing from `start` to `end`. Returns the transform and the span length.
pub fn span_transform(part: &str, start: Vec3, end: Vec3) -> Result<(Transform, f32)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(invalid(part, format!("anchors {start} → {end} are not finite")));
    }
    let d = end - start;
    let length = d.length();
    if length <= f32::EPSILON { return Err(invalid(part, "start and end anchors coincide".into())); }
    let rotation = Quat::from_rotation_arc(Vec3::Y, d / length);
    Ok((Transform { translation: (start + end) * 0.5, rotation, scale: Vec3::ONE }, length))
}

fn invalid(part: &str, reason: String) -> ModelError {
    ModelError::InvalidGeometry { part: part.to_string(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rejects_bad_dimensions() {
        assert!(Shape::Sphere { radius: 1.0 }.validate("s").is_ok());
        assert!(Shape::Sphere { radius: 0.0 }.validate("s").is_err());
        assert!(Shape::Cylinder { radius: -1.0, height: 2.0 }.validate("c").is_err());
        assert!(Shape::Capsule { radius: 1.0, length: f32::NAN }.validate("m").is_err());
        assert!(Shape::Torus { radius: 1.0, tube: 0.1, arc: f32::INFINITY }.validate("t").is_err());
    }

    #[test]
    fn rejects_non_finite_transform() {
        let t = Transform::at(Vec3::new(0.0, f32::NAN, 0.0));
        assert!(matches!(t.validate("x"), Err(ModelError::InvalidGeometry { .. })));
        assert!(Transform::default().with_scale(Vec3::new(1.0, 0.0, 1.0)).validate("x").is_err());
    }

    #[test]
    fn euler_z_rotation_tilts_y_axis() {
        let t = Transform::from_euler(Vec3::ZERO, [0.0, 0.0, FRAC_PI_2]);
        let y = t.rotation * Vec3::Y;
        assert_relative_eq!(y.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(y.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn span_points_from_start_to_end() {
        let (t, len) = span_transform("quad", Vec3::new(-3.0, 8.0, 1.0), Vec3::new(-4.0, -2.0, 1.0)).unwrap();
        assert_relative_eq!(len, 101f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(t.translation.y, 3.0);
        let tip = t.matrix().transform_point3(Vec3::Y * len * 0.5);
        assert_relative_eq!(tip.x, -4.0, epsilon = 1e-4);
        assert_relative_eq!(tip.y, -2.0, epsilon = 1e-4);
    }

    #[test]
    fn span_rejects_degenerate_anchors() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(span_transform("m", p, p).is_err());
        assert!(span_transform("m", p, Vec3::splat(f32::NAN)).is_err());
    }
}

// json_loader.rs
use serde::Deserialize;
use crate::error::{ModelError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    pub window:         WindowConfig,
    pub camera:         CameraConfig,
    pub separation_max: f32,
    pub idle_sway:      IdleSway,
    pub background:     [u8; 3],
    pub fog:            Fog,
    pub lights:         Lights,
    pub materials:      Palette,
    pub text:           UiText,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32, pub height: f32,
    pub min_width: f32, pub min_height: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    pub target: [f32; 3],
    pub distance: f32,
    #[serde(default)] pub yaw: f32,
    #[serde(default)] pub pitch: f32,
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
}

fn default_fov() -> f32 { 75.0 }

/// Whole-figure sway: `amplitude * sin(frequency * t)` radians around Y, t in seconds.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct IdleSway { pub amplitude: f32, pub frequency: f32 }

impl IdleSway {
    pub fn angle(&self, t: f64) -> f32 { self.amplitude * (self.frequency as f64 * t).sin() as f32 }
}

/// Linear depth fog: none before `near`, full `color` from `far` on.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Fog { pub color: [u8; 3], pub near: f32, pub far: f32 }

impl Fog {
    /// How much of the fog colour a point at view depth `z` takes, in 0..=1.
    pub fn factor(&self, z: f32) -> f32 {
        if self.far <= self.near { return if z >= self.far { 1.0 } else { 0.0 }; }
        ((z - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Lights {
    pub ambient: AmbientLight,
    #[serde(default)] pub directional: Vec<DirectionalLight>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AmbientLight { pub color: [u8; 3], pub intensity: f32 }

/// Points from `position` toward the origin, like a three.js directional light.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct DirectionalLight { pub color: [u8; 3], pub intensity: f32, pub position: [f32; 3] }

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [u8; 3],
    #[serde(default)] pub emissive: [u8; 3],
    #[serde(default)] pub emissive_intensity: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_opacity() -> f32 { 1.0 }

#[derive(Debug, Deserialize, Clone)]
pub struct Palette {
    pub bone_normal: Material,   pub bone_active: Material,
    pub muscle_normal: Material, pub muscle_active: Material,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiText {
    pub sport_header: String,
    pub daily_header: String,
    pub separation_label: String,
    pub reset_button: String,
    pub info_header: String,
    pub placeholder: String,
    pub bones_header: String,
    pub muscles_header: String,
    pub canvas_hint: String,
}

// include_str! requires compile-time paths; all assets must be listed here.
fn asset(name: &str) -> Result<&'static str> {
    match name {
        "actions.json"      => Ok(include_str!("../assets/actions.json")),
        "translations.json" => Ok(include_str!("../assets/translations.json")),
        "viewer.json"       => Ok(include_str!("../assets/viewer.json")),
        _ => Err(ModelError::MissingAsset(name.to_string())),
    }
}

pub fn load<T: for<'de> Deserialize<'de>>(name: &str) -> Result<T> {
    serde_json::from_str(asset(name)?).map_err(|source| ModelError::Asset { name: name.to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn viewer_config_parses() {
        let cfg: ViewerConfig = load("viewer.json").unwrap();
        assert_eq!(cfg.camera.target, [0.0, 20.0, 0.0]);
        assert_relative_eq!(cfg.camera.distance, 60.0);
        assert!(cfg.separation_max > 0.0);
        assert_eq!(cfg.lights.directional.len(), 3);
        assert_eq!(cfg.text.placeholder, "Selecciona una acció...");
        assert!(cfg.materials.muscle_normal.opacity < 1.0);
    }

    #[test]
    fn unknown_asset_is_reported() {
        let err = load::<serde_json::Value>("poses.json").unwrap_err();
        assert!(matches!(err, ModelError::MissingAsset(ref n) if n == "poses.json"));
    }

    #[test]
    fn fog_ramps_linearly_between_near_and_far() {
        let cfg: ViewerConfig = load("viewer.json").unwrap();
        let fog = cfg.fog;
        assert_eq!(fog.color, cfg.background);
        assert_relative_eq!(fog.factor(0.0), 0.0);
        assert_relative_eq!(fog.factor(20.0), 0.0);
        assert_relative_eq!(fog.factor(60.0), 0.5);
        assert_relative_eq!(fog.factor(500.0), 1.0);
        let degenerate = Fog { color: [0, 0, 0], near: 50.0, far: 50.0 };
        assert_relative_eq!(degenerate.factor(49.0), 0.0);
        assert_relative_eq!(degenerate.factor(50.0), 1.0);
    }

    #[test]
    fn idle_sway_stays_within_amplitude() {
        let sway = IdleSway { amplitude: 0.1, frequency: 0.5 };
        assert_relative_eq!(sway.angle(0.0), 0.0);
        for i in 0..100 {
            assert!(sway.angle(i as f64 * 0.37).abs() <= 0.1 + 1e-6);
        }
    }
}

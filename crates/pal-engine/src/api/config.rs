use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::types::Color;
use crate::core::rect::Rect;

/// Top-level configuration, typically loaded from a JSON file shipped with the game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub camera: CameraConfig,
    pub input: InputConfig,
    /// Draw sprite boxes and body overlays.
    pub debug: bool,
}

impl EngineConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Camera settings. See [`Camera`](crate::renderer::camera::Camera) for semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Top-left of the viewport on the destination surface.
    pub position: DVec2,
    /// Viewport width and height.
    pub size: DVec2,
    /// Initial look-at point in source coordinates.
    pub target: DVec2,
    pub lazy_follow: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub lazy_zoom: f64,
    pub background: Color,
    pub border: Color,
    pub border_thickness: f64,
    /// Bounds the look-at point is kept within. `None` disables clamping.
    pub clamp_rect: Option<Rect>,
    pub oscillate_speed: f64,
    pub shake_magnitude: f64,
    pub shake_direction: DVec2,
    pub shake_dampening: f64,
    pub shake_noise: f64,
    /// Seed for the shake noise generator.
    pub shake_seed: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            size: DVec2::new(640.0, 480.0),
            target: DVec2::ZERO,
            lazy_follow: 0.0,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            lazy_zoom: 0.0,
            background: Color::CORNFLOWER_BLUE,
            border: Color::BLACK,
            border_thickness: 2.0,
            clamp_rect: None,
            oscillate_speed: 0.2,
            shake_magnitude: 30.0,
            shake_direction: DVec2::new(1.0, 0.0),
            shake_dampening: 0.4,
            shake_noise: 0.8,
            shake_seed: 42,
        }
    }
}

/// Input timing thresholds, in the same unit as the `dt` passed to
/// [`InputState::update`](crate::input::state::InputState::update) (frames by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub long_press_duration: f64,
    pub double_press_timeout: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            long_press_duration: 60.0,
            double_press_timeout: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert!(!config.debug);
        assert_eq!(config.camera.size, DVec2::new(640.0, 480.0));
        assert_eq!(config.camera.shake_magnitude, 30.0);
        assert!(config.camera.clamp_rect.is_none());
        assert_eq!(config.input.long_press_duration, 60.0);
    }

    #[test]
    fn parse_partial_camera() {
        let json = r#"{
            "debug": true,
            "camera": {
                "size": [320, 240],
                "lazy_follow": 0.9,
                "clamp_rect": { "position": [0, 0], "size": [1000, 800] },
                "border": { "r": 10, "g": 20, "b": 30, "a": 255 }
            },
            "input": { "double_press_timeout": 12 }
        }"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert!(config.debug);
        assert_eq!(config.camera.size, DVec2::new(320.0, 240.0));
        assert_eq!(config.camera.lazy_follow, 0.9);
        assert_eq!(config.camera.zoom, 1.0);
        let clamp = config.camera.clamp_rect.unwrap();
        assert_eq!(clamp.right(), 1000.0);
        assert_eq!(config.camera.border, Color::rgb(10, 20, 30));
        assert_eq!(config.input.double_press_timeout, 12.0);
        assert_eq!(config.input.long_press_duration, 60.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EngineConfig::from_json("{ \"camera\": 3 }").is_err());
    }
}

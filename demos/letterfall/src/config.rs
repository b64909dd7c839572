//! Tunables for the toy. Every field has a default, so a partial JSON
//! config asset only overrides what it names.

use serde::{Deserialize, Serialize};

/// Per-step physics constants. Rates are expressed per 1/60 s frame and
/// scaled by `dt * reference_rate` when stepping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward velocity change per reference frame.
    pub gravity: f32,
    /// Height below which a falling letter counts as on the floor.
    pub floor_y: f32,
    /// Frame rate the per-frame constants were tuned for.
    pub reference_rate: f32,
    /// Upward velocity given to a clicked letter.
    pub bounce_velocity: f32,
    /// Ground a letter when it drops below `floor_y`.
    pub ground_on_floor: bool,
    /// Ground a letter when it lands on a grounded one.
    pub ground_on_collision: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.02,
            floor_y: 0.1,
            reference_rate: 60.0,
            bounce_velocity: 0.3,
            ground_on_floor: false,
            ground_on_collision: false,
        }
    }
}

/// Layout for letters placed without animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub spacing: f32,
    /// Column that lands on x = 0.
    pub center_column: f32,
    pub rest_y: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            spacing: 1.5,
            center_column: 5.0,
            rest_y: 0.1,
        }
    }
}

/// Spawn parameters for animated letters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeFallConfig {
    pub spawn_height: f32,
    /// Spawn x is uniform in `[-spawn_half_width, spawn_half_width]`.
    pub spawn_half_width: f32,
    /// Bound on |vx| and |vz| at spawn.
    pub max_drift: f32,
    /// Bound on each rotation speed component at spawn.
    pub max_spin: f32,
}

impl Default for FreeFallConfig {
    fn default() -> Self {
        Self {
            spawn_height: 10.0,
            spawn_half_width: 5.0,
            max_drift: 0.15,
            max_spin: 0.01,
        }
    }
}

/// Glyph extrusion, in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrudeConfig {
    pub size: f32,
    pub depth: f32,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    /// Samples per curve segment when measuring outlines.
    pub curve_segments: u32,
}

impl Default for ExtrudeConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            depth: 0.1,
            bevel_thickness: 0.03,
            bevel_size: 0.02,
            curve_segments: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 15.0, 15.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 5.0,
            max_distance: 50.0,
            damping: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub background: u32,
    pub ambient: u32,
    pub ambient_intensity: f32,
    pub light_pos: [f32; 3],
    pub light_color: u32,
    pub light_intensity: f32,
    pub light_shadows: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: 0xFFFAF0,
            ambient: 0xFFFFFF,
            ambient_intensity: 0.5,
            light_pos: [5.0, 10.0, 5.0],
            light_color: 0xFFFFFF,
            light_intensity: 1.0,
            light_shadows: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterfallConfig {
    pub physics: PhysicsConfig,
    pub grid: GridConfig,
    pub free_fall: FreeFallConfig,
    pub extrude: ExtrudeConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    /// Base colors, picked uniformly per letter.
    pub palette: Vec<u32>,
    pub shininess: f32,
    pub hover_emissive: u32,
    pub click_emissive: u32,
    /// Seconds a click flash stays lit.
    pub flash_duration: f32,
    /// Seconds between letters during a replay.
    pub replay_delay: f32,
    /// Seconds a share notice stays visible.
    pub notice_duration: f32,
    /// Pointer travel in pixels that turns a press into an orbit drag.
    pub drag_threshold: f32,
    /// Zoom steps per wheel unit.
    pub wheel_zoom: f32,
    /// Fixed RNG seed for replayable sessions. `None` keeps the seed the
    /// host picked for this page load.
    pub seed: Option<u64>,
}

impl Default for LetterfallConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            grid: GridConfig::default(),
            free_fall: FreeFallConfig::default(),
            extrude: ExtrudeConfig::default(),
            camera: CameraConfig::default(),
            scene: SceneConfig::default(),
            palette: vec![0xFFB200, 0xEB5B00, 0xD91656, 0x640D5F],
            shininess: 100.0,
            hover_emissive: 0x222222,
            click_emissive: 0x333333,
            flash_duration: 0.2,
            replay_delay: 0.2,
            notice_duration: 2.0,
            drag_threshold: 8.0,
            wheel_zoom: 1.0,
            seed: None,
        }
    }
}

impl LetterfallConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_toy() {
        let config = LetterfallConfig::default();
        assert_eq!(config.palette.len(), 4);
        assert_eq!(config.physics.gravity, 0.02);
        assert!(!config.physics.ground_on_floor);
        assert!(!config.physics.ground_on_collision);
        assert_eq!(config.grid.columns, 10);
        assert_eq!(config.replay_delay, 0.2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LetterfallConfig::from_json(
            r#"{ "physics": { "ground_on_floor": true }, "replay_delay": 0.5 }"#,
        )
        .unwrap();
        assert!(config.physics.ground_on_floor);
        assert_eq!(config.physics.gravity, 0.02);
        assert_eq!(config.replay_delay, 0.5);
        assert_eq!(config.camera.eye, [0.0, 15.0, 15.0]);
    }

    #[test]
    fn seed_is_an_optional_override() {
        assert_eq!(LetterfallConfig::default().seed, None);
        let config = LetterfallConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(LetterfallConfig::from_json("{ \"seed\": \"nope\" }").is_err());
    }
}

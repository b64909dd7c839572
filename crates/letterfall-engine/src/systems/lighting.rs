//! Scene lighting handed to the host renderer.
//!
//! Lights are persistent — they stay until explicitly removed.
//! Each frame the runner serializes them into the light section of the
//! frame buffer (see `bridge::protocol`).

use glam::Vec3;
use crate::components::mesh::MeshColor;

/// Floats per serialized light: x, y, z, r, g, b, intensity, casts_shadow.
pub const LIGHT_FLOATS: usize = 8;

/// Default maximum number of point lights.
pub const DEFAULT_MAX_LIGHTS: usize = 4;

/// A point light in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub pos: Vec3,
    pub color: MeshColor,
    pub intensity: f32,
    pub casts_shadow: bool,
}

impl PointLight {
    pub fn new(pos: Vec3, color: MeshColor, intensity: f32) -> Self {
        Self {
            pos,
            color,
            intensity,
            casts_shadow: false,
        }
    }

    pub fn with_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }
}

/// Ambient term, background clear color and point lights.
#[derive(Debug, Clone)]
pub struct LightState {
    lights: Vec<PointLight>,
    pub ambient: MeshColor,
    pub ambient_intensity: f32,
    pub background: MeshColor,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: MeshColor::from_hex(0xFFFFFF),
            ambient_intensity: 1.0,
            background: MeshColor::BLACK,
        }
    }

    /// Add a point light to the scene.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Remove all lights.
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: MeshColor, intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    pub fn set_background(&mut self, color: MeshColor) {
        self.background = color;
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

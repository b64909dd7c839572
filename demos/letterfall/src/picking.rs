//! Pointer handling: hover tint, click to bounce, drag to orbit.

use glam::Vec2;
use letterfall_engine::{Camera3D, Ray};
use crate::config::LetterfallConfig;
use crate::letter::Letter;

/// What the pointer is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMode {
    Idle,
    /// Pressed, not yet moved past the drag threshold.
    Pressed { start: Vec2 },
    /// Dragging the camera.
    Orbit,
}

/// Result of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    None,
    /// Press and release without dragging, at this pixel position.
    Click(Vec2),
    /// Camera was orbited.
    Orbited,
}

/// Last known pointer position plus press/drag state.
#[derive(Debug, Clone)]
pub struct HoverState {
    mode: PointerMode,
    /// `None` until the pointer has been seen over the canvas.
    position: Option<Vec2>,
    last: Vec2,
    drag_threshold: f32,
}

impl HoverState {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            mode: PointerMode::Idle,
            position: None,
            last: Vec2::ZERO,
            drag_threshold,
        }
    }

    pub fn mode(&self) -> PointerMode {
        self.mode
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn on_pointer_down(&mut self, pos: Vec2) {
        self.position = Some(pos);
        self.last = pos;
        self.mode = PointerMode::Pressed { start: pos };
    }

    pub fn on_pointer_move(&mut self, pos: Vec2, camera: &mut Camera3D) -> PointerAction {
        self.position = Some(pos);
        let delta = pos - self.last;
        self.last = pos;

        match self.mode {
            PointerMode::Idle => PointerAction::None,
            PointerMode::Pressed { start } => {
                if (pos - start).length() > self.drag_threshold {
                    self.mode = PointerMode::Orbit;
                    camera.orbit_by_pixels(delta.x, delta.y);
                    PointerAction::Orbited
                } else {
                    PointerAction::None
                }
            }
            PointerMode::Orbit => {
                camera.orbit_by_pixels(delta.x, delta.y);
                PointerAction::Orbited
            }
        }
    }

    pub fn on_pointer_up(&mut self, pos: Vec2) -> PointerAction {
        self.position = Some(pos);
        let action = match self.mode {
            PointerMode::Pressed { start } if (pos - start).length() <= self.drag_threshold => {
                PointerAction::Click(pos)
            }
            _ => PointerAction::None,
        };
        self.mode = PointerMode::Idle;
        action
    }
}

/// Cast a ray through a pixel position.
pub fn pointer_ray(camera: &Camera3D, px: Vec2) -> Ray {
    camera.ray_from_ndc(camera.screen_to_ndc(px))
}

/// Index and distance of the closest letter the ray hits, grounded or not.
pub fn pick_nearest(ray: &Ray, letters: &[Letter]) -> Option<(usize, f32)> {
    letters
        .iter()
        .enumerate()
        .filter_map(|(i, letter)| {
            ray.intersect_oriented(&letter.local_bounds, &letter.kin.world_from_local())
                .map(|t| (i, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Tint the hovered letter if it is grounded; clear hover everywhere else.
/// Click flashes are tracked separately and survive this.
pub fn apply_hover(letters: &mut [Letter], hovered: Option<usize>) {
    for (i, letter) in letters.iter_mut().enumerate() {
        letter.highlight.hovered = letter.kin.grounded && hovered == Some(i);
    }
}

/// Kick a grounded letter upward. Returns false for a letter in flight.
pub fn bounce(letter: &mut Letter, config: &LetterfallConfig) -> bool {
    if !letter.kin.grounded {
        return false;
    }
    letter.kin.velocity.y = config.physics.bounce_velocity;
    letter.kin.grounded = false;
    letter.highlight.flash = config.flash_duration;
    true
}

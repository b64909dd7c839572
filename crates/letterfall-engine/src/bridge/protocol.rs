//! Frame buffer layout shared with the host page.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Layout (all values f32):
//! ```text
//! [Header: 16 floats]
//! [Camera: 12 floats]
//! [Instances: max_instances × 12 floats]
//! [Sounds: max_sounds × 1 float]
//! [Events: max_events × 4 floats]
//! [Lights: max_lights × 8 floats]
//! ```
//!
//! Capacities are written into the header every frame so the host can
//! compute offsets without hardcoding them.

use crate::api::game::GameConfig;
use crate::api::types::{GameEvent, SoundEvent};
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::MeshInstance;
use crate::systems::lighting::{LightState, LIGHT_FLOATS};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_SOUNDS: usize = 4;
pub const HEADER_SOUND_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_MAX_LIGHTS: usize = 8;
pub const HEADER_LIGHT_COUNT: usize = 9;
pub const HEADER_PROTOCOL_VERSION: usize = 10;
pub const HEADER_AMBIENT_INTENSITY: usize = 11;
pub const HEADER_AMBIENT_HEX: usize = 12;
pub const HEADER_BACKGROUND_HEX: usize = 13;
pub const HEADER_VIEWPORT_W: usize = 14;
pub const HEADER_VIEWPORT_H: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera block: eye xyz, target xyz, up xyz, fov_y, near, far.
pub const CAMERA_FLOATS: usize = 12;

/// Floats per mesh instance (wire format — never changes).
pub const INSTANCE_FLOATS: usize = MeshInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_sounds: usize,
    pub max_events: usize,
    pub max_lights: usize,

    /// Offset (in floats) where the camera block begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_sounds: usize, max_events: usize, max_lights: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let sound_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let light_data_offset = event_data_offset + max_events * EVENT_FLOATS;
        let buffer_total_floats = light_data_offset + max_lights * LIGHT_FLOATS;

        Self {
            max_instances,
            max_sounds,
            max_events,
            max_lights,
            camera_offset,
            instance_data_offset,
            sound_data_offset,
            event_data_offset,
            light_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_sounds,
            config.max_events,
            config.max_lights,
        )
    }
}

/// Everything that goes into one frame.
pub struct FrameData<'a> {
    pub frame: u32,
    pub camera: &'a Camera3D,
    pub instances: &'a [MeshInstance],
    pub sounds: &'a [SoundEvent],
    pub events: &'a [GameEvent],
    pub lights: &'a LightState,
}

/// Serialize a frame into `out`, resizing it to the layout's total size.
/// Sections are truncated to their capacities.
pub fn write_frame(layout: &ProtocolLayout, frame: &FrameData, out: &mut Vec<f32>) {
    out.clear();
    out.resize(layout.buffer_total_floats, 0.0);

    let instance_count = frame.instances.len().min(layout.max_instances);
    let sound_count = frame.sounds.len().min(layout.max_sounds);
    let event_count = frame.events.len().min(layout.max_events);
    let light_count = frame.lights.count().min(layout.max_lights);
    if sound_count < frame.sounds.len() || event_count < frame.events.len() {
        log::warn!(
            "frame {}: dropped {} sounds, {} events over capacity",
            frame.frame,
            frame.sounds.len() - sound_count,
            frame.events.len() - event_count,
        );
    }

    out[HEADER_FRAME_COUNTER] = frame.frame as f32;
    out[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    out[HEADER_INSTANCE_COUNT] = instance_count as f32;
    out[HEADER_MAX_SOUNDS] = layout.max_sounds as f32;
    out[HEADER_SOUND_COUNT] = sound_count as f32;
    out[HEADER_MAX_EVENTS] = layout.max_events as f32;
    out[HEADER_EVENT_COUNT] = event_count as f32;
    out[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
    out[HEADER_LIGHT_COUNT] = light_count as f32;
    out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    out[HEADER_AMBIENT_INTENSITY] = frame.lights.ambient_intensity;
    out[HEADER_AMBIENT_HEX] = frame.lights.ambient.to_hex() as f32;
    out[HEADER_BACKGROUND_HEX] = frame.lights.background.to_hex() as f32;
    out[HEADER_VIEWPORT_W] = frame.camera.viewport.x;
    out[HEADER_VIEWPORT_H] = frame.camera.viewport.y;

    let eye = frame.camera.eye();
    let target = frame.camera.target;
    let cam = &mut out[layout.camera_offset..layout.camera_offset + CAMERA_FLOATS];
    cam.copy_from_slice(&[
        eye.x, eye.y, eye.z,
        target.x, target.y, target.z,
        0.0, 1.0, 0.0,
        frame.camera.fov_y, frame.camera.near, frame.camera.far,
    ]);

    let instance_floats: &[f32] = bytemuck::cast_slice(&frame.instances[..instance_count]);
    out[layout.instance_data_offset..layout.instance_data_offset + instance_floats.len()]
        .copy_from_slice(instance_floats);

    for (slot, sound) in out[layout.sound_data_offset..].iter_mut().zip(&frame.sounds[..sound_count]) {
        *slot = sound.0 as f32;
    }

    let event_floats: &[f32] = bytemuck::cast_slice(&frame.events[..event_count]);
    out[layout.event_data_offset..layout.event_data_offset + event_floats.len()]
        .copy_from_slice(event_floats);

    for (i, light) in frame.lights.iter().take(light_count).enumerate() {
        let at = layout.light_data_offset + i * LIGHT_FLOATS;
        out[at..at + LIGHT_FLOATS].copy_from_slice(&[
            light.pos.x,
            light.pos.y,
            light.pos.z,
            light.color.r,
            light.color.g,
            light.color.b,
            light.intensity,
            if light.casts_shadow { 1.0 } else { 0.0 },
        ]);
    }
}

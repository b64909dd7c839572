use glam::Vec2;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::assets::tones::ToneBank;
use crate::components::entity::Entity;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::InstanceBuffer;
use crate::systems::lighting::{LightState, DEFAULT_MAX_LIGHTS};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Frame deltas above this are clamped before accumulation (default: 0.1).
    pub max_frame_dt: f32,
    /// Initial viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of mesh instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
    /// Seed for the context RNG.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frame_dt: 0.1,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_instances: 512,
            max_sounds: 32,
            max_events: 32,
            max_lights: DEFAULT_MAX_LIGHTS,
            rng_seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. `input` holds the events that arrived since the
    /// previous step; it is empty on the extra steps of a catch-up frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub lights: LightState,
    pub tones: ToneBank,
    pub rng: Rng,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Fixed step length, copied from the config.
    pub dt: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let mut camera = Camera3D::default();
        camera.set_viewport(config.viewport_width, config.viewport_height);
        Self {
            scene: Scene::with_capacity(config.max_instances),
            camera,
            lights: LightState::new(),
            tones: ToneBank::new(),
            rng: Rng::new(config.rng_seed),
            sounds: Vec::new(),
            events: Vec::new(),
            dt: config.fixed_dt,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity built around a fresh ID. Returns the ID.
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(build(id));
        id
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Pointer position in pixels to normalized device coordinates.
    pub fn pointer_ndc(&self, px: Vec2) -> Vec2 {
        self.camera.screen_to_ndc(px)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub instances: &'a mut InstanceBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn spawn_uses_fresh_ids() {
        let mut ctx = EngineContext::new();
        let a = ctx.spawn(|id| Entity::new(id).with_pos(Vec3::Y));
        let b = ctx.spawn(Entity::new);
        assert_ne!(a, b);
        assert_eq!(ctx.scene.len(), 2);
        assert_eq!(ctx.scene.get(a).unwrap().pos, Vec3::Y);
    }

    #[test]
    fn clear_frame_data_empties_outputs() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent(1));
        ctx.emit_event(GameEvent::new(1.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn context_takes_viewport_from_config() {
        let config = GameConfig {
            viewport_width: 1024.0,
            viewport_height: 512.0,
            ..GameConfig::default()
        };
        let ctx = EngineContext::from_config(&config);
        assert_eq!(ctx.camera.aspect(), 2.0);
    }
}

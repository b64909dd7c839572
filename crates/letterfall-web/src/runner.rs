use letterfall_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, InstanceBuffer, SoundEvent,
    FixedTimestep, ProtocolLayout, FrameData, Rng, write_frame,
};
use letterfall_engine::systems::render::build_instance_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    instances: InstanceBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame: u32,
    /// Flat frame buffer (header, camera, instances, sounds, events, lights).
    frame_buffer: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::with_max_frame(config.fixed_dt, config.max_frame_dt);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            instances: InstanceBuffer::with_capacity(config.max_instances),
            frame_buffer: vec![0.0; layout.buffer_total_floats],
            game,
            timestep,
            layout,
            config,
            initialized: false,
            frame: 0,
        }
    }

    /// Like `new`, but the context RNG starts from `seed` instead of the
    /// configured one. The game can still reseed it in `init`.
    pub fn with_seed(game: G, seed: u64) -> Self {
        let mut runner = Self::new(game);
        runner.config.rng_seed = seed;
        runner.ctx.rng = Rng::new(seed);
        runner
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_frame();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: step the game, then rebuild the frame buffer.
    ///
    /// Queued input goes to the first fixed step only. A frame too short to
    /// run a step keeps its input for the next one.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            let pending = std::mem::replace(&mut self.input, InputQueue::new());
            let empty = InputQueue::new();
            for step in 0..steps {
                let input = if step == 0 { &pending } else { &empty };
                self.game.update(&mut self.ctx, input);
            }
        }

        self.rebuild_frame();
        self.frame = self.frame.wrapping_add(1);
    }

    fn rebuild_frame(&mut self) {
        build_instance_buffer(self.ctx.scene.iter(), &mut self.instances, self.layout.max_instances);
        {
            let mut render_ctx = RenderContext {
                instances: &mut self.instances,
            };
            self.game.render(&mut render_ctx);
        }

        let frame = FrameData {
            frame: self.frame,
            camera: &self.ctx.camera,
            instances: self.instances.as_slice(),
            sounds: &self.ctx.sounds,
            events: &self.ctx.events,
            lights: &self.ctx.lights,
        };
        write_frame(&self.layout, &frame, &mut self.frame_buffer);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Sounds emitted during the last tick.
    pub fn sounds(&self) -> &[SoundEvent] {
        &self.ctx.sounds
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterfall_engine::{Entity, GameEvent, MeshColor, MeshComponent};
    use letterfall_engine::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT};

    /// Records how many events each update call saw.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<usize>,
        first_roll: Option<f32>,
    }

    impl Game for Recorder {
        fn init(&mut self, ctx: &mut EngineContext) {
            self.first_roll = Some(ctx.rng.next_f32());
            ctx.spawn(|id| Entity::new(id).with_mesh(MeshComponent::new('a', MeshColor::BLACK)));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.seen.push(input.len());
            if !input.is_empty() {
                ctx.emit_event(GameEvent::new(1.0, input.len() as f32));
            }
        }
    }

    fn click() -> InputEvent {
        InputEvent::PointerDown { x: 1.0, y: 1.0 }
    }

    #[test]
    fn input_reaches_only_the_first_step() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.push_input(click());
        runner.tick(0.06);
        assert_eq!(runner.game().seen, vec![1, 0, 0]);
        assert_eq!(runner.context().events.len(), 1);
    }

    #[test]
    fn input_waits_for_a_step() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.push_input(click());
        runner.tick(0.0);
        assert!(runner.game().seen.is_empty());
        runner.tick(1.0 / 60.0 + 0.001);
        assert_eq!(runner.game().seen, vec![1]);
    }

    fn first_roll(runner: GameRunner<Recorder>) -> Option<f32> {
        let mut runner = runner;
        runner.init();
        runner.game().first_roll
    }

    #[test]
    fn seed_reaches_the_context_rng() {
        let a = first_roll(GameRunner::with_seed(Recorder::default(), 0x5eed_0001_cafe_f00d));
        let b = first_roll(GameRunner::with_seed(Recorder::default(), 0x0bad_5eed_1234_5678));
        assert_ne!(a, b);
        assert_eq!(a, first_roll(GameRunner::with_seed(Recorder::default(), 0x5eed_0001_cafe_f00d)));
        let runner = GameRunner::with_seed(Recorder::default(), 7);
        assert_eq!(runner.config().rng_seed, 7);
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.tick(0.1);
        assert!(runner.game().seen.is_empty());
    }

    #[test]
    fn frame_buffer_reports_instances() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.tick(0.02);
        runner.tick(0.02);
        assert_eq!(runner.instance_count(), 1);
        assert_eq!(runner.frame_len(), runner.buffer_total_floats());
        let ptr = runner.frame_ptr();
        let frame = unsafe { std::slice::from_raw_parts(ptr, runner.frame_len() as usize) };
        assert_eq!(frame[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(frame[HEADER_FRAME_COUNTER], 1.0);
    }
}

use glam::{Vec2, Vec3};
use letterfall_engine::*;
use letterfall_engine::api::game::GameConfig;
use letterfall_engine::input::queue::InputQueue;
use crate::config::LetterfallConfig;
use crate::font::FontMetrics;
use crate::letter::{display_char, spawn_letter, LetterSet, Placement};
use crate::physics::step_letters;
use crate::picking::{apply_hover, bounce, pick_nearest, pointer_ray, HoverState, PointerAction};
use crate::replay::{ReplayEvent, ReplayOrchestrator};
use crate::share::{Notice, NoticeChange, ShareOutcome};
use crate::text_sync::{query_text, reconcile, TextChange};

/// Custom event kinds sent by the host page.
pub mod custom {
    /// Intro overlay dismissed.
    pub const START: u32 = 1;
    /// Replay button pressed.
    pub const REPLAY: u32 = 2;
    /// Share attempt finished; `a` is a `ShareOutcome` code.
    pub const SHARE_RESULT: u32 = 3;
}

/// Game event kinds sent to the host page.
pub mod events {
    /// Text changed; `a` = character count. Read the text via `game_text`.
    pub const TEXT_SYNC: f32 = 1.0;
    /// `a` = 1 running / 0 idle, `b` = character count.
    pub const REPLAY_STATE: f32 = 2.0;
    /// `a` = message code, `b` = 1 shown / 0 hidden.
    pub const NOTICE: f32 = 3.0;
    /// The font could not be loaded; no letters will appear.
    pub const ASSETS_UNAVAILABLE: f32 = 4.0;
    /// `a` = number of letters, `b` = how many of them exceed the instance
    /// buffer and are not drawn.
    pub const LETTER_COUNT: f32 = 5.0;
}

pub mod sounds {
    use letterfall_engine::SoundEvent;

    pub const POP: SoundEvent = SoundEvent(1);
    pub const CLICK: SoundEvent = SoundEvent(2);
}

/// Instance buffer capacity. Letters past this are kept but not drawn.
pub const MAX_LETTERS: usize = 4096;

pub const FONT_ASSET: &str = "font";
pub const CONFIG_ASSET: &str = "config";
pub const TONES_ASSET: &str = "tones";
pub const TEXT_PARAM: &str = "text";

#[derive(Debug)]
enum FontState {
    Loading,
    Ready(FontMetrics),
    /// Failed for good; letters can never be created.
    Unavailable,
}

/// Tones used when no tone bank asset overrides them.
pub fn default_tones() -> ToneBank {
    let mut bank = ToneBank::new();
    bank.register(sounds::POP, ToneSpec {
        waveform: Waveform::Sine,
        start_hz: 880.0,
        end_hz: 110.0,
        duration: 0.15,
        peak_gain: 0.3,
        attack: 0.02,
    });
    bank.register(sounds::CLICK, ToneSpec {
        waveform: Waveform::Square,
        start_hz: 440.0,
        end_hz: 220.0,
        duration: 0.1,
        peak_gain: 0.2,
        attack: 0.01,
    });
    bank
}

pub struct Letterfall {
    config: LetterfallConfig,
    font: FontState,
    /// Authoritative text, real spaces included.
    text: String,
    started: bool,
    booted: bool,
    url_text: Option<String>,
    letters: LetterSet,
    replay: ReplayOrchestrator,
    pointer: HoverState,
    notice: Notice,
    reported_count: Option<usize>,
}

impl Letterfall {
    pub fn new() -> Self {
        Self::with_config(LetterfallConfig::default())
    }

    pub fn with_config(config: LetterfallConfig) -> Self {
        Self {
            font: FontState::Loading,
            text: String::new(),
            started: false,
            booted: false,
            url_text: None,
            letters: LetterSet::new(),
            replay: ReplayOrchestrator::new(config.replay_delay),
            pointer: HoverState::new(config.drag_threshold),
            notice: Notice::new(config.notice_duration),
            reported_count: None,
            config,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn letters(&self) -> &LetterSet {
        &self.letters
    }

    pub fn settings(&self) -> &LetterfallConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_running()
    }

    pub fn font_ready(&self) -> bool {
        matches!(self.font, FontState::Ready(_))
    }

    pub fn assets_unavailable(&self) -> bool {
        matches!(self.font, FontState::Unavailable)
    }

    fn char_count(&self) -> f32 {
        self.text.chars().count() as f32
    }

    fn apply_scene(&self, ctx: &mut EngineContext) {
        let cam = &self.config.camera;
        let viewport = ctx.camera.viewport;
        let mut camera = Camera3D::looking_at(Vec3::from(cam.eye), Vec3::from(cam.target), viewport);
        camera.fov_y = cam.fov_degrees.to_radians();
        camera.near = cam.near;
        camera.far = cam.far;
        camera.min_distance = cam.min_distance;
        camera.max_distance = cam.max_distance;
        camera.damping = cam.damping;
        ctx.camera = camera;

        let scene = &self.config.scene;
        ctx.lights.clear();
        ctx.lights.set_background(MeshColor::from_hex(scene.background));
        ctx.lights.set_ambient(MeshColor::from_hex(scene.ambient), scene.ambient_intensity);
        ctx.lights.add(
            PointLight::new(Vec3::from(scene.light_pos), MeshColor::from_hex(scene.light_color), scene.light_intensity)
                .with_shadow(scene.light_shadows),
        );
    }

    // ---- Input ----

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match event {
            InputEvent::Resize { width, height } => ctx.camera.set_viewport(*width, *height),
            InputEvent::AssetLoaded { name, payload } => self.on_asset_loaded(ctx, name, payload),
            InputEvent::AssetFailed { name, reason } => self.on_asset_failed(ctx, name, reason),
            InputEvent::QueryParam { key, value } => {
                if key == TEXT_PARAM {
                    self.url_text = Some(value.clone());
                }
            }
            InputEvent::Custom { kind: custom::START, .. } => self.start(ctx),
            _ if !self.started => {
                log::debug!("ignoring input before start: {:?}", event);
            }
            InputEvent::PointerDown { x, y } => self.pointer.on_pointer_down(Vec2::new(*x, *y)),
            InputEvent::PointerMove { x, y } => {
                self.pointer.on_pointer_move(Vec2::new(*x, *y), &mut ctx.camera);
            }
            InputEvent::PointerUp { x, y } => {
                if let PointerAction::Click(pos) = self.pointer.on_pointer_up(Vec2::new(*x, *y)) {
                    self.click(ctx, pos);
                }
            }
            InputEvent::Wheel { delta } => ctx.camera.zoom(*delta * self.config.wheel_zoom),
            InputEvent::TextChanged { value } => self.set_text(ctx, value),
            InputEvent::Custom { kind: custom::REPLAY, .. } => self.start_replay(ctx),
            InputEvent::Custom { kind: custom::SHARE_RESULT, a, .. } => match ShareOutcome::from_code(*a) {
                Some(outcome) => {
                    let change = self.notice.show(outcome);
                    emit_notice(ctx, change);
                }
                None => log::warn!("unknown share result {}", a),
            },
            InputEvent::Custom { kind, .. } => log::debug!("unhandled custom event {}", kind),
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => {}
        }
    }

    fn on_asset_loaded(&mut self, ctx: &mut EngineContext, name: &str, payload: &str) {
        match name {
            FONT_ASSET => self.on_font_loaded(ctx, payload),
            CONFIG_ASSET => match LetterfallConfig::from_json(payload) {
                Ok(config) => {
                    self.replace_config(config);
                    self.apply_seed(ctx);
                    self.apply_scene(ctx);
                    log::info!("config loaded");
                }
                Err(e) => log::warn!("config asset ignored: {}", e),
            },
            TONES_ASSET => match ToneBank::from_json(payload) {
                Ok(bank) => {
                    log::info!("tone bank loaded: {} tones", bank.len());
                    ctx.tones = bank;
                }
                Err(e) => log::warn!("tone bank ignored: {}", e),
            },
            other => log::warn!("unknown asset {:?}", other),
        }
    }

    fn apply_seed(&self, ctx: &mut EngineContext) {
        if let Some(seed) = self.config.seed {
            log::info!("using fixed seed {:#x}", seed);
            ctx.rng = Rng::new(seed);
        }
    }

    fn replace_config(&mut self, config: LetterfallConfig) {
        if !self.replay.is_running() {
            self.replay = ReplayOrchestrator::new(config.replay_delay);
        }
        self.pointer = HoverState::new(config.drag_threshold);
        self.notice = Notice::new(config.notice_duration);
        self.config = config;
    }

    fn on_font_loaded(&mut self, ctx: &mut EngineContext, payload: &str) {
        if !matches!(self.font, FontState::Loading) {
            log::warn!("font delivered again, ignoring");
            return;
        }
        match FontMetrics::from_json(payload, self.config.extrude.curve_segments) {
            Ok(font) => {
                log::info!("font {:?} loaded: {} glyphs", font.family(), font.glyph_count());
                self.font = FontState::Ready(font);
                if !self.text.is_empty() {
                    self.rebuild(ctx);
                }
                self.try_boot(ctx);
            }
            Err(e) => self.fail_assets(ctx, &e.to_string()),
        }
    }

    fn on_asset_failed(&mut self, ctx: &mut EngineContext, name: &str, reason: &str) {
        if name == FONT_ASSET {
            self.fail_assets(ctx, reason);
        } else {
            log::warn!("asset {:?} unavailable: {}", name, reason);
        }
    }

    fn fail_assets(&mut self, ctx: &mut EngineContext, reason: &str) {
        if self.assets_unavailable() {
            return;
        }
        log::error!("font unavailable, letters disabled: {}", reason);
        self.font = FontState::Unavailable;
        ctx.emit_event(GameEvent::new(events::ASSETS_UNAVAILABLE, 0.0));
    }

    fn start(&mut self, ctx: &mut EngineContext) {
        if self.started {
            return;
        }
        self.started = true;
        log::info!("started");
        self.try_boot(ctx);
    }

    /// Once both the font and the start gate are in: load the query text,
    /// then replay it.
    fn try_boot(&mut self, ctx: &mut EngineContext) {
        if self.booted || !self.started || !self.font_ready() {
            return;
        }
        self.booted = true;
        self.load_query_text(ctx);
        self.start_replay(ctx);
    }

    pub(crate) fn load_query_text(&mut self, ctx: &mut EngineContext) {
        let param = self.url_text.take();
        if let Some(text) = query_text(&self.text, param.as_deref()) {
            log::info!("loaded {} chars from the page URL", text.chars().count());
            self.text = text;
            self.rebuild(ctx);
            self.emit_text_sync(ctx);
        }
    }

    fn click(&mut self, ctx: &mut EngineContext, px: Vec2) {
        let ray = pointer_ray(&ctx.camera, px);
        let Some((index, _)) = pick_nearest(&ray, self.letters.as_slice()) else {
            return;
        };
        if let Some(letter) = self.letters.get_mut(index) {
            if bounce(letter, &self.config) {
                ctx.emit_sound(sounds::CLICK);
            }
        }
    }

    // ---- Letters ----

    /// Create one letter for a text character. No-op without a font.
    fn spawn(&mut self, ctx: &mut EngineContext, ch: char, placement: Placement) -> bool {
        let FontState::Ready(font) = &self.font else {
            return false;
        };
        spawn_letter(ctx, &mut self.letters, font, &self.config, display_char(ch), placement);
        true
    }

    /// Destroy every letter and lay the whole text out on the grid.
    fn rebuild(&mut self, ctx: &mut EngineContext) {
        self.letters.clear(ctx);
        let FontState::Ready(font) = &self.font else {
            return;
        };
        for ch in self.text.chars() {
            spawn_letter(ctx, &mut self.letters, font, &self.config, display_char(ch), Placement::Grid);
        }
    }

    fn set_text(&mut self, ctx: &mut EngineContext, value: &str) {
        match reconcile(&self.text, value) {
            TextChange::Unchanged => return,
            TextChange::Append(chars) => {
                self.text = value.to_string();
                for ch in chars {
                    if self.spawn(ctx, ch, Placement::FreeFall) {
                        ctx.emit_sound(sounds::POP);
                    }
                }
            }
            TextChange::Rebuild => {
                self.text = value.to_string();
                self.rebuild(ctx);
            }
        }
        self.emit_text_sync(ctx);
    }

    fn start_replay(&mut self, ctx: &mut EngineContext) {
        if !self.font_ready() {
            log::debug!("replay ignored, no font");
            return;
        }
        if !self.replay.start(self.text.chars()) {
            return;
        }
        log::info!("replay started: {} letters", self.text.chars().count());
        self.letters.clear(ctx);
        ctx.emit_event(GameEvent::new(events::REPLAY_STATE, 1.0).with_b(self.char_count()));
    }

    fn emit_text_sync(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(events::TEXT_SYNC, self.char_count()));
    }

    // ---- Per step ----

    fn step(&mut self, ctx: &mut EngineContext) {
        let dt = ctx.dt;

        for event in self.replay.tick(dt) {
            match event {
                ReplayEvent::Spawn(ch) => {
                    if self.spawn(ctx, ch, Placement::FreeFall) {
                        ctx.emit_sound(sounds::POP);
                    }
                }
                ReplayEvent::Finished => {
                    log::info!("replay finished");
                    ctx.emit_event(GameEvent::new(events::REPLAY_STATE, 0.0).with_b(self.char_count()));
                }
            }
        }

        let hovered = self.pointer.position().and_then(|px| {
            let ray = pointer_ray(&ctx.camera, px);
            pick_nearest(&ray, self.letters.as_slice()).map(|(i, _)| i)
        });
        apply_hover(self.letters.as_mut_slice(), hovered);

        step_letters(self.letters.as_mut_slice(), dt, &self.config.physics);

        for letter in self.letters.as_mut_slice() {
            letter.highlight.tick(dt);
        }
        if let Some(change) = self.notice.tick(dt) {
            emit_notice(ctx, change);
        }

        ctx.camera.update();
        self.letters.sync_entities(ctx, &self.config);

        if self.reported_count != Some(self.letters.len()) {
            self.reported_count = Some(self.letters.len());
            let clipped = self.letters.len().saturating_sub(MAX_LETTERS);
            if clipped > 0 {
                log::warn!("{} letters exceed the instance buffer and are hidden", clipped);
            }
            ctx.emit_event(
                GameEvent::new(events::LETTER_COUNT, self.letters.len() as f32).with_b(clipped as f32),
            );
        }
    }
}

impl Default for Letterfall {
    fn default() -> Self {
        Self::new()
    }
}

fn emit_notice(ctx: &mut EngineContext, change: NoticeChange) {
    let event = match change {
        NoticeChange::Shown(outcome) => {
            log::info!("notice: {}", outcome.message());
            GameEvent::new(events::NOTICE, outcome.code()).with_b(1.0)
        }
        NoticeChange::Hidden => GameEvent::new(events::NOTICE, 0.0).with_b(0.0),
    };
    ctx.emit_event(event);
}

impl Game for Letterfall {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_frame_dt: 0.1,
            max_instances: MAX_LETTERS,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.apply_scene(ctx);
        self.apply_seed(ctx);
        ctx.tones = default_tones();
        log::info!("Letterfall initialized");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(ctx, event);
        }
        self.step(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::test_font_json;

    fn step(game: &mut Letterfall, ctx: &mut EngineContext, events: Vec<InputEvent>) {
        ctx.clear_frame_data();
        let mut queue = InputQueue::new();
        for event in events {
            queue.push(event);
        }
        game.update(ctx, &queue);
    }

    fn idle(game: &mut Letterfall, ctx: &mut EngineContext, steps: usize) {
        for _ in 0..steps {
            step(game, ctx, Vec::new());
        }
    }

    fn font_loaded() -> InputEvent {
        InputEvent::AssetLoaded { name: FONT_ASSET.into(), payload: test_font_json() }
    }

    fn start() -> InputEvent {
        InputEvent::Custom { kind: custom::START, a: 0.0, b: 0.0, c: 0.0 }
    }

    fn replay() -> InputEvent {
        InputEvent::Custom { kind: custom::REPLAY, a: 0.0, b: 0.0, c: 0.0 }
    }

    fn typed(value: &str) -> InputEvent {
        InputEvent::TextChanged { value: value.into() }
    }

    fn events_of(ctx: &EngineContext, kind: f32) -> Vec<GameEvent> {
        ctx.events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    fn ready() -> (Letterfall, EngineContext) {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, vec![font_loaded(), start()]);
        (game, ctx)
    }

    fn colors_for_seed(seed: u64) -> Vec<u32> {
        let config = LetterfallConfig { seed: Some(seed), ..LetterfallConfig::default() };
        let mut game = Letterfall::with_config(config);
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, vec![font_loaded(), start()]);
        step(&mut game, &mut ctx, vec![typed("abcdefghijklmnop")]);
        game.letters().iter().map(|l| l.color.to_hex()).collect()
    }

    #[test]
    fn seed_override_drives_letter_colors() {
        let first = colors_for_seed(0x9E37_79B9_7F4A_7C15);
        let second = colors_for_seed(0xD1B5_4A32_D192_ED03);
        assert_eq!(first.len(), 16);
        assert_ne!(first, second);
        assert_eq!(first, colors_for_seed(0x9E37_79B9_7F4A_7C15));
    }

    #[test]
    fn host_seed_is_kept_without_override() {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        ctx.rng = Rng::new(99);
        game.init(&mut ctx);
        let mut expected = Rng::new(99);
        assert_eq!(ctx.rng.next_f32(), expected.next_f32());
    }

    #[test]
    fn letters_past_the_instance_buffer_are_reported() {
        let (mut game, mut ctx) = ready();
        assert_eq!(game.config().max_instances, MAX_LETTERS);
        step(&mut game, &mut ctx, vec![typed(&"a".repeat(MAX_LETTERS + 3))]);
        let counts = events_of(&ctx, events::LETTER_COUNT);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].a, (MAX_LETTERS + 3) as f32);
        assert_eq!(counts[0].b, 3.0);
    }

    #[test]
    fn typing_drops_free_fall_letters_in_order() {
        let (mut game, mut ctx) = ready();
        step(&mut game, &mut ctx, vec![typed("h")]);
        step(&mut game, &mut ctx, vec![typed("hi")]);
        assert_eq!(game.letters().glyphs(), "hi");
        assert!(game.letters().iter().all(|l| !l.kin.grounded));
        assert_eq!(ctx.sounds, vec![sounds::POP]);
        assert_eq!(events_of(&ctx, events::TEXT_SYNC)[0].a, 2.0);
    }

    #[test]
    fn letter_count_tracks_text_length() {
        let (mut game, mut ctx) = ready();
        let mut text = String::new();
        for ch in "hello world".chars() {
            text.push(ch);
            step(&mut game, &mut ctx, vec![typed(&text)]);
            assert_eq!(game.letters().len(), text.chars().count());
        }
        assert_eq!(game.letters().glyphs(), "hello_world");
        assert_eq!(game.text(), "hello world");
    }

    #[test]
    fn deleting_rebuilds_on_the_grid() {
        let (mut game, mut ctx) = ready();
        step(&mut game, &mut ctx, vec![typed("hello")]);
        step(&mut game, &mut ctx, vec![typed("hell")]);
        assert!(ctx.sounds.is_empty());
        assert_eq!(game.letters().glyphs(), "hell");
        for (i, letter) in game.letters().iter().enumerate() {
            assert!(letter.kin.grounded);
            assert_eq!(letter.kin.pos, Vec3::new((i as f32 - 5.0) * 1.5, 0.1, 0.0));
        }
        assert_eq!(ctx.scene.len(), 4);
    }

    #[test]
    fn query_text_loads_on_the_grid_without_sound() {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, vec![font_loaded()]);
        game.url_text = Some("hi there".into());
        ctx.clear_frame_data();
        game.load_query_text(&mut ctx);
        assert_eq!(game.letters().glyphs(), "hi_there");
        assert!(game.letters().iter().all(|l| l.kin.grounded));
        assert!(ctx.sounds.is_empty());
        // Only once.
        game.load_query_text(&mut ctx);
        assert_eq!(game.letters().len(), 8);
    }

    #[test]
    fn boot_loads_query_text_then_replays() {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, vec![
            InputEvent::QueryParam { key: TEXT_PARAM.into(), value: "hi there".into() },
            start(),
        ]);
        assert!(!game.is_replaying());
        step(&mut game, &mut ctx, vec![font_loaded()]);
        assert_eq!(game.text(), "hi there");
        assert!(game.is_replaying());
        assert!(ctx.sounds.is_empty());
        let state = events_of(&ctx, events::REPLAY_STATE);
        assert_eq!((state[0].a, state[0].b), (1.0, 8.0));

        idle(&mut game, &mut ctx, 8 * 12 + 2);
        assert!(!game.is_replaying());
        assert_eq!(game.letters().glyphs(), "hi_there");
    }

    #[test]
    fn replay_while_running_is_a_no_op() {
        let (mut game, mut ctx) = ready();
        step(&mut game, &mut ctx, vec![typed("abc")]);
        step(&mut game, &mut ctx, vec![replay()]);
        assert!(game.is_replaying());
        assert!(game.letters().is_empty());
        idle(&mut game, &mut ctx, 12);
        assert_eq!(game.letters().len(), 1);
        step(&mut game, &mut ctx, vec![replay()]);
        assert_eq!(game.letters().len(), 1);
        assert!(events_of(&ctx, events::REPLAY_STATE).is_empty());

        idle(&mut game, &mut ctx, 30);
        assert!(!game.is_replaying());
        assert_eq!(game.letters().glyphs(), "abc");
    }

    #[test]
    fn replay_of_empty_text_does_nothing() {
        let (mut game, mut ctx) = ready();
        step(&mut game, &mut ctx, vec![replay()]);
        assert!(!game.is_replaying());
    }

    #[test]
    fn clicking_a_grounded_letter_bounces_it() {
        let (mut game, mut ctx) = ready();
        step(&mut game, &mut ctx, vec![typed("ab"), typed("a")]);
        let letter = game.letters().get(0).unwrap();
        let center = letter.world_bounds().center();
        let clip = ctx.camera.projection_matrix() * ctx.camera.view_matrix();
        let ndc = clip.project_point3(center);
        let px = Vec2::new(
            (ndc.x + 1.0) * 0.5 * ctx.camera.viewport.x,
            (1.0 - ndc.y) * 0.5 * ctx.camera.viewport.y,
        );

        step(&mut game, &mut ctx, vec![
            InputEvent::PointerDown { x: px.x, y: px.y },
            InputEvent::PointerUp { x: px.x, y: px.y },
        ]);
        let letter = game.letters().get(0).unwrap();
        assert!(!letter.kin.grounded);
        assert!((letter.kin.velocity.y - (0.3 - 0.02)).abs() < 1e-4);
        assert!(letter.highlight.flashing());
        assert_eq!(ctx.sounds, vec![sounds::CLICK]);

        idle(&mut game, &mut ctx, 13);
        assert!(!game.letters().get(0).unwrap().highlight.flashing());
    }

    #[test]
    fn text_before_font_is_built_when_font_arrives() {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, vec![start(), typed("ok")]);
        assert!(game.letters().is_empty());
        step(&mut game, &mut ctx, vec![font_loaded()]);
        // Boot replays the text straight away.
        assert!(game.is_replaying());
        idle(&mut game, &mut ctx, 30);
        assert_eq!(game.letters().glyphs(), "ok");
    }

    #[test]
    fn input_before_start_is_ignored() {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, vec![font_loaded(), typed("x")]);
        assert_eq!(game.text(), "");
        assert!(game.letters().is_empty());
    }

    #[test]
    fn font_failure_is_fatal_and_reported_once() {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, vec![
            InputEvent::AssetFailed { name: FONT_ASSET.into(), reason: "404".into() },
            InputEvent::AssetLoaded { name: FONT_ASSET.into(), payload: "{ broken".into() },
            start(),
            typed("abc"),
        ]);
        assert!(game.assets_unavailable());
        assert_eq!(events_of(&ctx, events::ASSETS_UNAVAILABLE).len(), 1);
        assert_eq!(game.text(), "abc");
        assert!(game.letters().is_empty());
    }

    #[test]
    fn malformed_font_is_fatal() {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, vec![
            InputEvent::AssetLoaded { name: FONT_ASSET.into(), payload: "{ broken".into() },
        ]);
        assert!(game.assets_unavailable());
        assert_eq!(events_of(&ctx, events::ASSETS_UNAVAILABLE).len(), 1);
    }

    #[test]
    fn share_notice_shows_then_hides() {
        let (mut game, mut ctx) = ready();
        step(&mut game, &mut ctx, vec![
            InputEvent::Custom { kind: custom::SHARE_RESULT, a: 1.0, b: 0.0, c: 0.0 },
        ]);
        let shown = events_of(&ctx, events::NOTICE);
        assert_eq!((shown[0].a, shown[0].b), (1.0, 1.0));
        idle(&mut game, &mut ctx, 100);
        assert!(events_of(&ctx, events::NOTICE).is_empty());
        let mut hidden = false;
        for _ in 0..30 {
            step(&mut game, &mut ctx, Vec::new());
            hidden |= events_of(&ctx, events::NOTICE).iter().any(|e| e.b == 0.0);
        }
        assert!(hidden);
    }

    #[test]
    fn init_sets_up_camera_lights_and_tones() {
        let mut game = Letterfall::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        assert!((ctx.camera.eye() - Vec3::new(0.0, 15.0, 15.0)).length() < 1e-4);
        assert_eq!(ctx.lights.count(), 1);
        assert_eq!(ctx.lights.background.to_hex(), 0xFFFAF0);
        assert_eq!(ctx.tones.len(), 2);
    }

    #[test]
    fn config_asset_overrides_physics() {
        let (mut game, mut ctx) = ready();
        step(&mut game, &mut ctx, vec![InputEvent::AssetLoaded {
            name: CONFIG_ASSET.into(),
            payload: r#"{ "physics": { "ground_on_floor": true } }"#.into(),
        }]);
        assert!(game.settings().physics.ground_on_floor);
        step(&mut game, &mut ctx, vec![typed("a")]);
        idle(&mut game, &mut ctx, 120);
        assert!(game.letters().get(0).unwrap().kin.grounded);
    }
}

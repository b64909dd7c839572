use glam::{Mat4, Vec3};
use letterfall_engine::{
    pose_matrix, Aabb, EngineContext, Entity, EntityId, MeshColor, MeshComponent,
};
use crate::config::LetterfallConfig;
use crate::font::FontMetrics;

/// Tag shared by every letter entity.
pub const LETTER_TAG: &str = "letter";

/// Character shown for a text character. Spaces would be invisible.
pub fn display_char(ch: char) -> char {
    if ch == ' ' {
        '_'
    } else {
        ch
    }
}

/// How a new letter enters the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Resting on the grid slot for its index.
    Grid,
    /// Dropped from above with random drift and spin.
    FreeFall,
}

/// Kinematic state of one letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub pos: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    /// Per reference frame.
    pub velocity: Vec3,
    /// Per reference frame.
    pub rotation_speed: Vec3,
    pub grounded: bool,
}

impl Kinematics {
    pub fn resting(pos: Vec3) -> Self {
        Self {
            pos,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation_speed: Vec3::ZERO,
            grounded: true,
        }
    }

    /// Freeze in place: no motion, upright.
    pub fn ground(&mut self) {
        self.velocity = Vec3::ZERO;
        self.rotation_speed = Vec3::ZERO;
        self.rotation = Vec3::ZERO;
        self.grounded = true;
    }

    pub fn world_from_local(&self) -> Mat4 {
        pose_matrix(self.pos, self.rotation)
    }
}

/// Transient emissive overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Highlight {
    pub hovered: bool,
    /// Seconds of click flash left.
    pub flash: f32,
}

impl Highlight {
    pub fn flashing(&self) -> bool {
        self.flash > 0.0
    }

    /// Grey level to render: flash wins over hover.
    pub fn emissive(&self, config: &LetterfallConfig) -> f32 {
        if self.flashing() {
            MeshColor::from_hex(config.click_emissive).r
        } else if self.hovered {
            MeshColor::from_hex(config.hover_emissive).r
        } else {
            0.0
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.flash > 0.0 {
            self.flash = (self.flash - dt).max(0.0);
        }
    }
}

/// One displayed character.
#[derive(Debug, Clone)]
pub struct Letter {
    pub entity: EntityId,
    pub glyph: char,
    pub color: MeshColor,
    /// Extruded glyph bounds in local space.
    pub local_bounds: Aabb,
    pub kin: Kinematics,
    pub highlight: Highlight,
}

impl Letter {
    /// World-space box for the current pose.
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds.transformed(&self.kin.world_from_local())
    }
}

/// Letters in text order.
#[derive(Debug, Default)]
pub struct LetterSet {
    letters: Vec<Letter>,
}

impl LetterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, letter: Letter) {
        self.letters.push(letter);
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Letter> {
        self.letters.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Letter> {
        self.letters.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Letter> {
        self.letters.iter()
    }

    pub fn as_slice(&self) -> &[Letter] {
        &self.letters
    }

    pub fn as_mut_slice(&mut self) -> &mut [Letter] {
        &mut self.letters
    }

    /// Displayed characters, in order.
    pub fn glyphs(&self) -> String {
        self.letters.iter().map(|l| l.glyph).collect()
    }

    /// Remove every letter and its entity.
    pub fn clear(&mut self, ctx: &mut EngineContext) {
        let removed = ctx.scene.despawn_tagged(LETTER_TAG);
        if removed != self.letters.len() {
            log::debug!("cleared {} letter entities for {} letters", removed, self.letters.len());
        }
        self.letters.clear();
    }

    /// Copy pose and material state onto the render entities.
    pub fn sync_entities(&self, ctx: &mut EngineContext, config: &LetterfallConfig) {
        for letter in &self.letters {
            let Some(entity) = ctx.scene.get_mut(letter.entity) else {
                continue;
            };
            entity.pos = letter.kin.pos;
            entity.rotation = letter.kin.rotation;
            if let Some(mesh) = entity.mesh.as_mut() {
                mesh.emissive = letter.highlight.emissive(config);
            }
        }
    }
}

/// Initial kinematics for the letter that will sit at `index`.
pub fn initial_kinematics(
    placement: Placement,
    index: usize,
    ctx: &mut EngineContext,
    config: &LetterfallConfig,
) -> Kinematics {
    match placement {
        Placement::Grid => {
            let grid = &config.grid;
            let columns = grid.columns.max(1);
            let row = (index / columns) as f32;
            let col = (index % columns) as f32;
            Kinematics::resting(Vec3::new(
                (col - grid.center_column) * grid.spacing,
                grid.rest_y,
                row * grid.spacing,
            ))
        }
        Placement::FreeFall => {
            let fall = &config.free_fall;
            let rng = &mut ctx.rng;
            let pos = Vec3::new(rng.centered(fall.spawn_half_width), fall.spawn_height, 0.0);
            let velocity = Vec3::new(rng.centered(fall.max_drift), 0.0, rng.centered(fall.max_drift));
            let rotation_speed = Vec3::new(
                rng.centered(fall.max_spin),
                rng.centered(fall.max_spin),
                rng.centered(fall.max_spin),
            );
            Kinematics {
                pos,
                rotation: Vec3::ZERO,
                velocity,
                rotation_speed,
                grounded: false,
            }
        }
    }
}

/// Build one letter for `glyph`, register its entity and append it.
pub fn spawn_letter(
    ctx: &mut EngineContext,
    letters: &mut LetterSet,
    font: &FontMetrics,
    config: &LetterfallConfig,
    glyph: char,
    placement: Placement,
) -> EntityId {
    let kin = initial_kinematics(placement, letters.len(), ctx, config);
    let color = ctx
        .rng
        .pick(&config.palette)
        .map(|&hex| MeshColor::from_hex(hex))
        .unwrap_or_default();
    let local_bounds = font.local_bounds(glyph, &config.extrude);

    let mesh = MeshComponent::new(glyph, color).with_shininess(config.shininess);
    let entity = ctx.spawn(|id| {
        Entity::new(id)
            .with_tag(LETTER_TAG)
            .with_pos(kin.pos)
            .with_rotation(kin.rotation)
            .with_mesh(mesh)
    });

    letters.push(Letter {
        entity,
        glyph,
        color,
        local_bounds,
        kin,
        highlight: Highlight::default(),
    });
    entity
}

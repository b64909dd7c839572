use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Fat Entity — a single struct with optional components.
/// Holds only what the renderer needs; simulation state lives in the game.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not rendered).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Euler rotation in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Glyph mesh (optional — entities without a mesh are invisible).
    pub mesh: Option<MeshComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }
}

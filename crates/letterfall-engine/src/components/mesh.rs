/// Linear RGB color in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MeshColor {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack back into `0xRRGGBB`.
    pub fn to_hex(self) -> u32 {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }
}

impl Default for MeshColor {
    fn default() -> Self {
        Self::from_hex(0xFFFFFF)
    }
}

/// Component for an extruded glyph mesh. The host builds the geometry from
/// `glyph` with its own copy of the font; Rust only tracks material state.
#[derive(Debug, Clone, Copy)]
pub struct MeshComponent {
    /// Character whose outline is extruded.
    pub glyph: char,
    /// Base (diffuse) color.
    pub color: MeshColor,
    /// Phong specular exponent (default: 100.0).
    pub shininess: f32,
    /// Grey-level emissive overlay (0.0 = neutral).
    pub emissive: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            glyph: '?',
            color: MeshColor::default(),
            shininess: 100.0,
            emissive: 0.0,
        }
    }
}

impl MeshComponent {
    pub fn new(glyph: char, color: MeshColor) -> Self {
        Self {
            glyph,
            color,
            ..Default::default()
        }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

//! Glyph metrics from a three.js `typeface.json` font.
//!
//! The host renders the real extruded geometry from the same file; Rust
//! only needs each glyph's extent to place letters, collide them and pick
//! them.

use std::collections::HashMap;
use std::str::SplitWhitespace;
use glam::{Vec2, Vec3};
use serde::Deserialize;
use thiserror::Error;
use letterfall_engine::Aabb;
use crate::config::ExtrudeConfig;

/// Font loading errors.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("font resolution must be positive, got {0}")]
    InvalidResolution(f32),

    #[error("font has no glyphs")]
    NoGlyphs,

    #[error("glyph {glyph:?}: bad outline token {token:?}")]
    BadOutline {
        glyph: char,
        token: String,
    },
}

#[derive(Debug, Deserialize)]
struct TypefaceJson {
    glyphs: HashMap<String, GlyphJson>,
    resolution: f32,
    #[serde(rename = "familyName", default)]
    family_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlyphJson {
    /// Outline commands; absent for blank glyphs like space.
    #[serde(default)]
    o: Option<String>,
}

/// Outline extents in font units. `None` for glyphs with no outline.
type GlyphExtent = Option<(Vec2, Vec2)>;

/// Parsed font, reduced to per-glyph 2D extents.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    family: String,
    resolution: f32,
    glyphs: HashMap<char, GlyphExtent>,
}

impl FontMetrics {
    /// Character substituted for glyphs the font lacks.
    pub const FALLBACK: char = '?';

    /// Parse a typeface JSON document. Curves are sampled with
    /// `curve_segments` points each, as the renderer tessellates them.
    pub fn from_json(json: &str, curve_segments: u32) -> Result<Self, FontError> {
        let raw: TypefaceJson = serde_json::from_str(json)?;
        if raw.resolution.is_nan() || raw.resolution <= 0.0 {
            return Err(FontError::InvalidResolution(raw.resolution));
        }

        let mut glyphs = HashMap::with_capacity(raw.glyphs.len());
        for (key, glyph) in &raw.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                log::debug!("skipping multi-char glyph key {:?}", key);
                continue;
            };
            let extent = match &glyph.o {
                Some(outline) => outline_extent(ch, outline, curve_segments.max(1))?,
                None => None,
            };
            glyphs.insert(ch, extent);
        }
        if glyphs.is_empty() {
            return Err(FontError::NoGlyphs);
        }

        Ok(Self {
            family: raw.family_name.unwrap_or_default(),
            resolution: raw.resolution,
            glyphs,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Local bounding box of `ch` extruded with `extrude`. Missing glyphs
    /// fall back to `?`; blank glyphs give an empty box.
    pub fn local_bounds(&self, ch: char, extrude: &ExtrudeConfig) -> Aabb {
        let extent = match self.glyphs.get(&ch) {
            Some(extent) => *extent,
            None => {
                log::warn!("font {:?} has no glyph {:?}", self.family, ch);
                self.glyphs.get(&Self::FALLBACK).copied().flatten()
            }
        };
        let Some((min, max)) = extent else {
            return Aabb::EMPTY;
        };

        let scale = extrude.size / self.resolution;
        let bevel = extrude.bevel_size;
        Aabb::new(
            Vec3::new(min.x * scale - bevel, min.y * scale - bevel, -extrude.bevel_thickness),
            Vec3::new(
                max.x * scale + bevel,
                max.y * scale + bevel,
                extrude.depth + extrude.bevel_thickness,
            ),
        )
    }
}

/// Walk an outline (`m x y`, `l x y`, `q x y cx cy`, `b x y c1x c1y c2x c2y`)
/// and return the extent of its tessellated points.
fn outline_extent(glyph: char, outline: &str, segments: u32) -> Result<GlyphExtent, FontError> {
    let mut tokens = outline.split_whitespace();

    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut include = |p: Vec2| {
        min = min.min(p);
        max = max.max(p);
    };
    let mut pen = Vec2::ZERO;

    while let Some(cmd) = tokens.next() {
        match cmd {
            "m" | "l" => {
                pen = next_point(glyph, &mut tokens)?;
                include(pen);
            }
            "q" => {
                let end = next_point(glyph, &mut tokens)?;
                let ctrl = next_point(glyph, &mut tokens)?;
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let u = 1.0 - t;
                    include(pen * (u * u) + ctrl * (2.0 * u * t) + end * (t * t));
                }
                pen = end;
            }
            "b" => {
                let end = next_point(glyph, &mut tokens)?;
                let c1 = next_point(glyph, &mut tokens)?;
                let c2 = next_point(glyph, &mut tokens)?;
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let u = 1.0 - t;
                    include(
                        pen * (u * u * u)
                            + c1 * (3.0 * u * u * t)
                            + c2 * (3.0 * u * t * t)
                            + end * (t * t * t),
                    );
                }
                pen = end;
            }
            other => log::debug!("glyph {glyph:?}: skipping outline command {other:?}"),
        }
    }

    Ok((min.x <= max.x).then_some((min, max)))
}

fn next_point(glyph: char, tokens: &mut SplitWhitespace<'_>) -> Result<Vec2, FontError> {
    Ok(Vec2::new(next_number(glyph, tokens)?, next_number(glyph, tokens)?))
}

fn next_number(glyph: char, tokens: &mut SplitWhitespace<'_>) -> Result<f32, FontError> {
    let token = tokens.next().unwrap_or("");
    token.parse::<f32>().map_err(|_| FontError::BadOutline {
        glyph,
        token: token.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small font: a 600x700 box for most letters, a blank space.
    pub(crate) fn test_font_json() -> String {
        let boxy = "m 0 0 l 600 0 l 600 700 l 0 700 l 0 0 ";
        let mut glyphs = String::new();
        for ch in "abcdefghijklmnopqrstuvwxyz_?".chars() {
            glyphs.push_str(&format!("\"{}\": {{ \"ha\": 700, \"o\": \"{}\" }},", ch, boxy));
        }
        format!(
            r#"{{ "familyName": "Boxy", "resolution": 1000,
                 "glyphs": {{ {} " ": {{ "ha": 300 }} }} }}"#,
            glyphs
        )
    }

    pub(crate) fn test_font() -> FontMetrics {
        FontMetrics::from_json(&test_font_json(), 12).unwrap()
    }

    #[test]
    fn parses_glyphs_and_family() {
        let font = test_font();
        assert_eq!(font.family(), "Boxy");
        assert!(font.has_glyph('a'));
        assert!(font.has_glyph(' '));
        assert_eq!(font.glyph_count(), 29);
    }

    #[test]
    fn extrusion_adds_bevel_and_depth() {
        let font = test_font();
        let b = font.local_bounds('a', &ExtrudeConfig::default());
        assert!((b.min.x - -0.02).abs() < 1e-6);
        assert!((b.max.x - 0.62).abs() < 1e-6);
        assert!((b.max.y - 0.72).abs() < 1e-6);
        assert!((b.min.z - -0.03).abs() < 1e-6);
        assert!((b.max.z - 0.13).abs() < 1e-6);
    }

    #[test]
    fn blank_glyph_is_empty() {
        let font = test_font();
        assert!(font.local_bounds(' ', &ExtrudeConfig::default()).is_empty());
    }

    #[test]
    fn missing_glyph_falls_back() {
        let font = test_font();
        let extrude = ExtrudeConfig::default();
        assert_eq!(font.local_bounds('Z', &extrude), font.local_bounds('?', &extrude));
    }

    #[test]
    fn quadratic_stays_inside_control_hull() {
        let json = r#"{ "resolution": 100, "glyphs": { "o": { "o": "m 0 0 q 100 0 50 100" } } }"#;
        let font = FontMetrics::from_json(json, 12).unwrap();
        let extrude = ExtrudeConfig { bevel_size: 0.0, ..ExtrudeConfig::default() };
        let b = font.local_bounds('o', &extrude);
        assert!(b.max.y > 0.4 && b.max.y <= 0.5 + 1e-6);
        assert!((b.max.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_outline_commands_are_skipped() {
        let json = r#"{ "resolution": 1000, "glyphs": { "a": { "o": "m 0 0 l 600 0 l 600 700 z " } } }"#;
        let font = FontMetrics::from_json(json, 12).unwrap();
        let extrude = ExtrudeConfig { bevel_size: 0.0, ..ExtrudeConfig::default() };
        let b = font.local_bounds('a', &extrude);
        assert!((b.max.x - 0.6).abs() < 1e-6);
        assert!((b.max.y - 0.7).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(FontMetrics::from_json("nope", 12), Err(FontError::Json(_))));
        assert!(matches!(
            FontMetrics::from_json(r#"{ "resolution": 0, "glyphs": { "a": {} } }"#, 12),
            Err(FontError::InvalidResolution(_))
        ));
        assert!(matches!(
            FontMetrics::from_json(r#"{ "resolution": 1000, "glyphs": {} }"#, 12),
            Err(FontError::NoGlyphs)
        ));
        assert!(matches!(
            FontMetrics::from_json(r#"{ "resolution": 1000, "glyphs": { "a": { "o": "m 0 x" } } }"#, 12),
            Err(FontError::BadOutline { glyph: 'a', .. })
        ));
    }
}

//! Engine-agnostic drawing model: colored polylines plus the fixed palette.
//!
//! A [`Drawing`] is the complete output of one interpretation walk. It carries
//! no renderer state, only geometry, so it can be serialized, diffed in tests,
//! written as SVG, or handed to any other consumer of 2D paths.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Creates a color with explicit RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS hex form, `#rrggbb` (alpha is not emitted; the palette is opaque).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The drawing palette cycled by the `c` symbol.
///
/// Seven distinguishable colors: black, red, dark green, blue, dark orange,
/// brown, purple. Index 0 (black) is the color every walk starts with.
pub const PALETTE: [Color; 7] = [
    Color::rgb(0, 0, 0),
    Color::rgb(255, 0, 0),
    Color::rgb(0, 100, 0),
    Color::rgb(0, 0, 255),
    Color::rgb(238, 118, 0),
    Color::rgb(165, 42, 42),
    Color::rgb(160, 32, 240),
];

/// Resolves a cyclic palette index to its color.
pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// One connected pen-down stroke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Palette index the stroke was drawn with.
    pub color: usize,

    /// Vertices in draw order; always at least two.
    pub points: Vec<Vec2>,
}

impl Polyline {
    /// Number of line segments (one less than the vertex count).
    pub fn segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// The complete recorded output of one interpretation walk.
///
/// Strokes appear in the order they were drawn; pen-up travel, branch jumps
/// and color changes split strokes but leave no record of their own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub paths: Vec<Polyline>,
}

impl Drawing {
    /// Creates an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stroke.
    pub fn add_path(&mut self, path: Polyline) {
        self.paths.push(path);
    }

    /// True when nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of strokes.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Total segment count across all strokes.
    pub fn segments(&self) -> usize {
        self.paths.iter().map(Polyline::segments).sum()
    }
}

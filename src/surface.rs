//! # Raster Surface Capability
//!
//! The drawing backend is NOT implemented here. The image specialization
//! needs a 2-D surface with raster compositing, gradient fills, text layout
//! with glyph measurement, and PNG encoding — all of which belong to the
//! embedding host. This module defines the seam: the [`RasterSurface`]
//! trait the layout engine drives, with an opaque associated `Image` type
//! so host image handles never leak into the core.
//!
//! Coordinates are surface pixels, origin top-left, y growing downward.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cell::{Point, Rect, TextAlign, TextBaseline};

/// An opaque RGB color, carried on the wire as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional). Unparseable
    /// channels degrade to zero rather than failing — colors are cosmetic.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => (
                u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0),
                u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0),
                u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0),
            ),
            6 => (
                u8::from_str_radix(&hex[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&hex[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&hex[4..6], 16).unwrap_or(0),
            ),
            _ => (0, 0, 0),
        };
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let trimmed = text.trim_start_matches('#');
        if trimmed.len() != 3 && trimmed.len() != 6 {
            return Err(D::Error::custom(format!(
                "expected '#rgb' or '#rrggbb' color, got '{text}'"
            )));
        }
        Ok(Color::hex(&text))
    }
}

/// Everything the surface needs to draw one text field.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPaint {
    /// Host font specification string, e.g. `"20px sans-serif"`.
    pub font: String,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

/// The 2-D drawing surface capability supplied by the host.
///
/// One render pass drives the surface strictly in draw order — gradient
/// fill, image, text strokes/fills per cell — and finishes with a single
/// `encode_png`. The surface arrives pre-composited with whatever background
/// the host wants under the cells.
pub trait RasterSurface {
    /// The host's opaque image handle.
    type Image;

    /// Intrinsic pixel dimensions of an image handle.
    fn image_size(&self, image: &Self::Image) -> (f64, f64);

    /// Measured advance width of `text` in the given font.
    fn measure_text(&mut self, text: &str, font: &str) -> f64;

    /// Fill `rect` with a linear gradient running `from` → `to`.
    fn fill_gradient_rect(&mut self, rect: Rect, from: Point, to: Point, start: Color, end: Color);

    /// Composite an image scaled into `dest`.
    fn draw_image(&mut self, image: &Self::Image, dest: Rect);

    /// Fill text at an anchor point.
    fn fill_text(&mut self, text: &str, at: Point, paint: &TextPaint);

    /// Stroke (outline) text at an anchor point.
    fn stroke_text(&mut self, text: &str, at: Point, paint: &TextPaint);

    /// Encode the surface to a binary image stream.
    fn encode_png(&mut self, compression_level: u8) -> Result<Vec<u8>, String>;
}

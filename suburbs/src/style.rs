//! Fixed styling of the suburb overlay.

use serde::Deserialize;

/// Style applied to every suburb polygon. There is no data-driven styling.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Outline color, RGB.
    pub stroke_color: [u8; 3],
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Fill color, RGB.
    pub fill_color: [u8; 3],
    /// Fill opacity in `0.0..=1.0`.
    pub fill_opacity: f32,
}

impl OverlayStyle {
    /// Blue outline of width 2 with light blue half-transparent fill.
    pub const SUBURB: Self = Self {
        stroke_color: [0x00, 0x00, 0xFF],
        stroke_width: 2.0,
        fill_color: [0xAD, 0xD8, 0xE6],
        fill_opacity: 0.5,
    };

    /// Opaque outline color as RGBA.
    pub fn stroke_rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.stroke_color;
        [r, g, b, 255]
    }

    /// Fill color as RGBA, with the opacity applied to the alpha channel.
    pub fn fill_rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.fill_color;
        let alpha = (self.fill_opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        [r, g, b, alpha]
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::SUBURB
    }
}

//! Text runs and their visual styling.

use super::Rect;
use serde::{Deserialize, Serialize};

/// An RGB color as reported by a parsing collaborator.
///
/// PDF operators carry color components as normalized floats while OOXML
/// stores hex bytes, so both encodings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Components on a 0-255 scale
    Rgb([u8; 3]),
    /// Components on a 0.0-1.0 scale
    Normalized([f32; 3]),
}

impl Color {
    /// Pure white.
    pub const WHITE: Color = Color::Rgb([255, 255, 255]);

    /// Pure black.
    pub const BLACK: Color = Color::Rgb([0, 0, 0]);

    /// Create a color from 0-255 components.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb([r, g, b])
    }

    /// Create a color from normalized 0.0-1.0 components.
    pub fn normalized(r: f32, g: f32, b: f32) -> Self {
        Color::Normalized([r, g, b])
    }

    /// Parse a hex color such as `FFFFFF` or `#fafafa`.
    ///
    /// Returns `None` for `auto` and anything that is not six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Components rescaled to 0-255.
    ///
    /// Normalized components are clamped to 0.0-1.0 and rounded, so `0.98`
    /// becomes `250`. Non-finite components map to `0`.
    pub fn to_rgb8(&self) -> [u8; 3] {
        match *self {
            Color::Rgb(rgb) => rgb,
            Color::Normalized(components) => components.map(|c| {
                if c.is_finite() {
                    (c.clamp(0.0, 1.0) * 255.0).round() as u8
                } else {
                    0
                }
            }),
        }
    }

    /// Hex representation (`#RRGGBB`).
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Text styling properties relevant to visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Fill color of the glyphs
    #[serde(default)]
    pub color: Option<Color>,

    /// Font size in points
    #[serde(default)]
    pub font_size: Option<f32>,

    /// Explicit hidden attribute (`w:vanish` in OOXML; ignored on PDF runs)
    #[serde(default)]
    pub hidden: bool,
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default)]
    pub style: TextStyle,

    /// Bounding box on the page (PDF only)
    #[serde(default)]
    pub bbox: Option<Rect>,

    /// Painting order on the page; higher values are drawn later (PDF only)
    #[serde(default)]
    pub z_order: u32,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
            bbox: None,
            z_order: 0,
        }
    }

    /// Set the glyph color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = Some(color);
        self
    }

    /// Set the font size in points.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.style.font_size = Some(size);
        self
    }

    /// Mark the run as explicitly hidden.
    pub fn hidden(mut self) -> Self {
        self.style.hidden = true;
        self
    }

    /// Place the run on the page.
    pub fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Set the painting order.
    pub fn with_z_order(mut self, z_order: u32) -> Self {
        self.z_order = z_order;
        self
    }

    /// Check if this run has no visible characters at all.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

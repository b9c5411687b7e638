//! Page-level and paragraph-level types.

use super::{Color, TextRun};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page space (points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from two corners in any order.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Check that every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).abs()
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Area shared with another rectangle (0 when disjoint).
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let (a, b) = (self.normalized(), other.normalized());
        let w = a.x1.min(b.x1) - a.x0.max(b.x0);
        let h = a.y1.min(b.y1) - a.y0.max(b.y0);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// Check whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        let (a, b) = (self.normalized(), other.normalized());
        b.x0 >= a.x0 && b.y0 >= a.y0 && b.x1 <= a.x1 && b.y1 <= a.y1
    }

    fn normalized(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.x1, self.y1)
    }
}

/// A filled shape painted on a page (rectangles, paths).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnShape {
    /// Bounding box of the shape
    pub bbox: Rect,

    /// Fill color, `None` for stroke-only shapes
    #[serde(default)]
    pub fill: Option<Color>,

    /// Fill opacity (0.0 transparent - 1.0 opaque)
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Painting order on the page; higher values are drawn later
    #[serde(default)]
    pub z_order: u32,
}

fn default_opacity() -> f32 {
    1.0
}

impl DrawnShape {
    /// Create an opaque filled rectangle.
    pub fn filled(bbox: Rect, fill: Color, z_order: u32) -> Self {
        Self {
            bbox,
            fill: Some(fill),
            opacity: 1.0,
            z_order,
        }
    }

    /// Set the fill opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// A single page of a PDF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Text runs in content-stream order
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Filled shapes in content-stream order
    #[serde(default)]
    pub shapes: Vec<DrawnShape>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            runs: Vec::new(),
            shapes: Vec::new(),
        }
    }

    /// Add a text run to the page.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Add a drawn shape to the page.
    pub fn add_shape(&mut self, shape: DrawnShape) {
        self.shapes.push(shape);
    }

    /// Plain text of the page.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A paragraph of a word-processor body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph index (1-indexed, body order)
    pub index: u32,

    /// Styled runs of the paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            runs: Vec::new(),
        }
    }

    /// Create a paragraph holding a single unstyled run.
    pub fn with_text(index: u32, text: impl Into<String>) -> Self {
        let mut p = Self::new(index);
        p.add_run(TextRun::new(text));
        p
    }

    /// Add a styled run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Plain text of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

//! Input data model for drawing snapshots
//!
//! These records are produced by an external CAD-parsing collaborator and
//! consumed read-only by the validation and comparison engines. Nothing in
//! this crate mutates a `LayerRecord`.

use serde::Serialize;

/// Entity color code meaning "inherit from layer" (ByLayer)
pub const COLOR_BY_LAYER: i32 = 256;

/// Entity color code meaning "inherit from block" (ByBlock)
pub const COLOR_BY_BLOCK: i32 = 0;

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A single drawing primitive belonging to exactly one layer
#[derive(Debug, Clone)]
pub struct EntityRecord {
    /// Concrete entity kind as reported by the parser (e.g. "LWPOLYLINE", "TEXT")
    pub kind: String,
    /// Plain color code; 256 = ByLayer, 0 = ByBlock
    pub color: i32,
    /// Packed 24-bit true color, when the entity carries one
    pub true_color: Option<i32>,
    /// Explicit closed flag; None when the parser could not determine it
    pub is_closed: Option<bool>,
    /// Vertex points, empty when the entity exposes none
    pub points: Vec<Point>,
    /// Text content for TEXT/MTEXT entities
    pub text: Option<String>,
    /// Precomputed area for hatch-style entities
    pub area: Option<f64>,
}

impl EntityRecord {
    /// Minimal entity with just a kind; other fields take neutral defaults.
    pub fn of_kind(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            color: COLOR_BY_LAYER,
            true_color: None,
            is_closed: None,
            points: Vec::new(),
            text: None,
            area: None,
        }
    }
}

/// A named layer with its display attributes and entities
#[derive(Debug, Clone)]
pub struct LayerRecord {
    pub name: String,
    /// Plain color code of the layer
    pub color: i32,
    /// Packed 24-bit true color, when set
    pub true_color: Option<i32>,
    pub linetype: String,
    pub visible: bool,
    pub entities: Vec<EntityRecord>,
}

impl LayerRecord {
    pub fn new(name: &str, color: i32) -> Self {
        Self {
            name: name.to_string(),
            color,
            true_color: None,
            linetype: "Continuous".to_string(),
            visible: true,
            entities: Vec::new(),
        }
    }
}

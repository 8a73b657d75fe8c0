//! Validation report data types

use serde::Serialize;

/// Standard/legacy housekeeping layer names skipped during validation
pub const IGNORED_LAYERS: &[&str] = &[
    "0",
    "Defpoints",
    "PLAN",
    "WALL",
    "elevation",
    "TEXT",
    "column",
    "dim",
    "HATCH",
    "IC",
    "sec-slab",
    "Chajja",
    "win",
    "BUA TOTAL",
    "FORMAT LINE",
    "SEC LINE",
    "ele-1",
    "SEC WALL",
    "SEC DIM",
    "rm text",
    "TEXT-D-W",
    "ELE-2",
    "ELE-3",
    "LANDSCAPE",
    "dw text",
    "Dim.",
    "WALL.",
    "ELE",
    "layer",
    "Layer2",
    "WINDOWS",
    "LS-Tree",
    "RM TXT",
];

pub fn is_ignored_layer(name: &str) -> bool {
    IGNORED_LAYERS.contains(&name)
}

/// Per-layer validation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Valid,
    Warning,
    Error,
}

/// One verdict per layer per run; never mutated after emission
#[derive(Debug, Clone, Serialize)]
pub struct LayerVerdict {
    pub name: String,
    pub status: VerdictStatus,
    pub messages: Vec<String>,
    /// Display attributes for valid layers ("Area: 12.50 sq.m", "Text: ...")
    pub data_attributes: Vec<String>,
}

/// Kind of advisory fix a downstream correction tool can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    CreateLayer,
    FixColor,
}

/// Advisory fix instruction; never executed by this crate
#[derive(Debug, Clone, Serialize)]
pub struct FixAction {
    #[serde(rename = "type")]
    pub kind: FixKind,
    pub layer: String,
    /// Color token: a plain code ("3") or a true-color form ("T 255,0,0")
    pub color: String,
}

/// Display row for the layer analysis table
#[derive(Debug, Clone, Serialize)]
pub struct LayerAnalysis {
    pub layer_name: String,
    /// Plain code, or the true-color integer when one is set
    pub color_integer: String,
    /// CSS-style swatch string, e.g. "rgb(255, 0, 0)"
    pub color_swatch: String,
    pub line_type: String,
    /// "Visible" or "Hidden"
    pub visibility: String,
}

/// Full validation report for one catalogue run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub layers: Vec<LayerVerdict>,
    /// Number of layers inspected (including ignored ones)
    pub count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub fix_actions: Vec<FixAction>,
    pub layer_analysis: Vec<LayerAnalysis>,
}

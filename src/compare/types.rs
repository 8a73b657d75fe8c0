//! Comparison data types

use crate::metrics::MetricVector;
use indexmap::IndexMap;
use serde::Serialize;

/// Snapshot entry for one layer: extracted metrics plus display attributes
#[derive(Debug, Clone)]
pub struct LayerState {
    pub metrics: MetricVector,
    pub color: Option<i32>,
    pub true_color: Option<i32>,
    pub linetype: String,
    pub visible: bool,
}

impl LayerState {
    pub fn from_metrics(metrics: MetricVector) -> Self {
        Self {
            metrics,
            color: None,
            true_color: None,
            linetype: "Continuous".to_string(),
            visible: true,
        }
    }
}

/// Name-keyed snapshot of a whole drawing, as captured by the persistence
/// collaborator at upload time
pub type SnapshotMap = IndexMap<String, LayerState>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    Critical,
    High,
    Medium,
    Low,
}

/// A single layer change between versions
#[derive(Debug, Clone, Serialize)]
pub struct LayerChange {
    pub layer_name: String,
    pub change_type: ChangeType,
    pub significance: Significance,

    pub base_entity_count: usize,
    pub new_entity_count: usize,
    pub entity_count_diff: i64,

    pub base_area: f64,
    pub new_area: f64,
    pub area_diff: f64,
    pub area_diff_percent: f64,

    pub base_perimeter: f64,
    pub new_perimeter: f64,
    pub perimeter_diff: f64,

    pub centroid_shift_x: f64,
    pub centroid_shift_y: f64,
    pub centroid_shift_distance: f64,

    pub color_changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_color: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_color: Option<i32>,

    pub linetype_changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_linetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_linetype: Option<String>,

    pub visibility_changed: bool,
    pub base_visible: bool,
    pub new_visible: bool,

    pub description: String,
}

impl LayerChange {
    /// A change record with neutral metrics, ready for one side to be filled
    pub fn blank(layer_name: &str, change_type: ChangeType) -> Self {
        Self {
            layer_name: layer_name.to_string(),
            change_type,
            significance: Significance::Low,
            base_entity_count: 0,
            new_entity_count: 0,
            entity_count_diff: 0,
            base_area: 0.0,
            new_area: 0.0,
            area_diff: 0.0,
            area_diff_percent: 0.0,
            base_perimeter: 0.0,
            new_perimeter: 0.0,
            perimeter_diff: 0.0,
            centroid_shift_x: 0.0,
            centroid_shift_y: 0.0,
            centroid_shift_distance: 0.0,
            color_changed: false,
            base_color: None,
            new_color: None,
            linetype_changed: false,
            base_linetype: None,
            new_linetype: None,
            visibility_changed: false,
            base_visible: true,
            new_visible: true,
            description: String::new(),
        }
    }
}

/// Aggregate counts by change type and significance tier
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonSummary {
    pub total_layers_base: usize,
    pub total_layers_new: usize,
    pub added_count: usize,
    pub removed_count: usize,
    pub modified_count: usize,
    pub unchanged_count: usize,
    pub critical_changes: usize,
    pub high_changes: usize,
    pub medium_changes: usize,
    pub low_changes: usize,
}

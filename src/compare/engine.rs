//! Snapshot comparison engine
//!
//! Diffs two name-keyed metric snapshots of the same drawing, classifies
//! every difference by severity, and aggregates a summary. Layer names are
//! iterated in sorted order so output is deterministic regardless of
//! snapshot insertion order.

use super::significance::{classify_modification, classify_presence};
use super::types::{ChangeType, ComparisonSummary, LayerChange, LayerState, Significance, SnapshotMap};
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Comparison engine with a configurable change tolerance (same units as
/// area/length metrics)
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    pub tolerance: f64,
}

impl Default for Comparator {
    fn default() -> Self {
        Self { tolerance: 0.01 }
    }
}

impl Comparator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Compare two snapshots and return the change list and summary.
    /// Unchanged layers are counted in the summary but not emitted.
    pub fn compare(&self, base: &SnapshotMap, new: &SnapshotMap) -> (Vec<LayerChange>, ComparisonSummary) {
        let start = std::time::Instant::now();

        let base_names: BTreeSet<&String> = base.keys().collect();
        let new_names: BTreeSet<&String> = new.keys().collect();

        let mut changes = Vec::new();

        for name in new_names.difference(&base_names) {
            changes.push(analyze_added(name, &new[name.as_str()]));
        }
        for name in base_names.difference(&new_names) {
            changes.push(analyze_removed(name, &base[name.as_str()]));
        }

        let common: Vec<&String> = base_names.intersection(&new_names).copied().collect();
        let modified: Vec<LayerChange> = common
            .par_iter()
            .filter_map(|name| self.compare_layer(name, &base[name.as_str()], &new[name.as_str()]))
            .collect();
        changes.extend(modified);

        let summary = summarize(&changes, base.len(), new.len(), common.len());

        eprintln!(
            "[COMPARE] {} base / {} new layers: +{} -{} ~{} in {:?}",
            base.len(),
            new.len(),
            summary.added_count,
            summary.removed_count,
            summary.modified_count,
            start.elapsed()
        );

        (changes, summary)
    }

    /// Diff a layer present in both snapshots. Returns None when every
    /// metric difference is within tolerance and no attribute changed.
    fn compare_layer(&self, name: &str, base: &LayerState, new: &LayerState) -> Option<LayerChange> {
        let mut change = LayerChange::blank(name, ChangeType::Modified);
        let mut has_changes = false;
        let mut description = String::new();

        change.base_entity_count = base.metrics.entity_count;
        change.new_entity_count = new.metrics.entity_count;
        change.entity_count_diff =
            new.metrics.entity_count as i64 - base.metrics.entity_count as i64;
        change.base_area = base.metrics.total_area;
        change.new_area = new.metrics.total_area;
        change.base_perimeter = base.metrics.perimeter;
        change.new_perimeter = new.metrics.perimeter;
        change.base_color = base.color;
        change.new_color = new.color;
        change.base_linetype = Some(base.linetype.clone());
        change.new_linetype = Some(new.linetype.clone());
        change.base_visible = base.visible;
        change.new_visible = new.visible;

        if change.entity_count_diff != 0 {
            has_changes = true;
            if change.entity_count_diff > 0 {
                description.push_str(&format!("+{} entities added. ", change.entity_count_diff));
            } else {
                description.push_str(&format!("{} entities removed. ", change.entity_count_diff));
            }
        }

        if base.metrics.total_area > 0.0 || new.metrics.total_area > 0.0 {
            change.area_diff = new.metrics.total_area - base.metrics.total_area;
            if base.metrics.total_area > 0.0 {
                change.area_diff_percent = change.area_diff / base.metrics.total_area * 100.0;
            }
            if change.area_diff.abs() > self.tolerance {
                has_changes = true;
                description.push_str(&format!(
                    "Area changed by {:+.2} sq.m ({:+.1}%). ",
                    change.area_diff, change.area_diff_percent
                ));
            }
        }

        change.perimeter_diff = new.metrics.perimeter - base.metrics.perimeter;
        if change.perimeter_diff.abs() > self.tolerance {
            has_changes = true;
            description.push_str(&format!(
                "Perimeter changed by {:+.2}m. ",
                change.perimeter_diff
            ));
        }

        if let (Some(bc), Some(nc)) = (&base.metrics.centroid, &new.metrics.centroid) {
            change.centroid_shift_x = nc.x - bc.x;
            change.centroid_shift_y = nc.y - bc.y;
            change.centroid_shift_distance = bc.distance(nc);
            if change.centroid_shift_distance > self.tolerance {
                has_changes = true;
                description.push_str(&format!(
                    "Shifted by {:.2}m. ",
                    change.centroid_shift_distance
                ));
            }
        }

        if base.color != new.color {
            change.color_changed = true;
            has_changes = true;
            description.push_str(&format!(
                "Color changed from {} to {}. ",
                fmt_color(base.color),
                fmt_color(new.color)
            ));
        }

        if base.linetype != new.linetype {
            change.linetype_changed = true;
            has_changes = true;
            description.push_str(&format!(
                "Line type changed from {} to {}. ",
                base.linetype, new.linetype
            ));
        }

        if base.visible != new.visible {
            change.visibility_changed = true;
            has_changes = true;
            description.push_str(&format!(
                "Visibility changed to {}. ",
                if new.visible { "visible" } else { "hidden" }
            ));
        }

        if !has_changes {
            return None;
        }

        change.description = description;
        change.significance = classify_modification(&change);
        Some(change)
    }
}

fn fmt_color(color: Option<i32>) -> String {
    match color {
        Some(c) => c.to_string(),
        None => "None".to_string(),
    }
}

fn analyze_added(name: &str, state: &LayerState) -> LayerChange {
    let mut change = LayerChange::blank(name, ChangeType::Added);
    change.significance = classify_presence(name);
    change.new_entity_count = state.metrics.entity_count;
    change.new_area = state.metrics.total_area;
    change.new_perimeter = state.metrics.perimeter;
    change.new_color = state.color;
    change.new_linetype = Some(state.linetype.clone());
    change.new_visible = state.visible;
    change.description = format!(
        "New layer added with {} entities",
        state.metrics.entity_count
    );
    if state.metrics.total_area > 0.0 {
        change
            .description
            .push_str(&format!(", area {:.2} sq.m", state.metrics.total_area));
    }
    change
}

fn analyze_removed(name: &str, state: &LayerState) -> LayerChange {
    let mut change = LayerChange::blank(name, ChangeType::Removed);
    change.significance = classify_presence(name);
    change.base_entity_count = state.metrics.entity_count;
    change.base_area = state.metrics.total_area;
    change.base_perimeter = state.metrics.perimeter;
    change.base_color = state.color;
    change.base_linetype = Some(state.linetype.clone());
    change.base_visible = state.visible;
    change.description = format!("Layer removed (had {} entities", state.metrics.entity_count);
    if state.metrics.total_area > 0.0 {
        change
            .description
            .push_str(&format!(", {:.2} sq.m", state.metrics.total_area));
    }
    change.description.push(')');
    change
}

fn summarize(
    changes: &[LayerChange],
    base_total: usize,
    new_total: usize,
    common_count: usize,
) -> ComparisonSummary {
    let mut summary = ComparisonSummary {
        total_layers_base: base_total,
        total_layers_new: new_total,
        ..Default::default()
    };

    for change in changes {
        match change.change_type {
            ChangeType::Added => summary.added_count += 1,
            ChangeType::Removed => summary.removed_count += 1,
            ChangeType::Modified => summary.modified_count += 1,
            ChangeType::Unchanged => {}
        }
        match change.significance {
            Significance::Critical => summary.critical_changes += 1,
            Significance::High => summary.high_changes += 1,
            Significance::Medium => summary.medium_changes += 1,
            Significance::Low => summary.low_changes += 1,
        }
    }

    summary.unchanged_count = common_count - summary.modified_count;
    summary
}

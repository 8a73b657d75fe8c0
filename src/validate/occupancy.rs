//! Occupancy color domain
//!
//! Layers following the fixed `BLK_n_FLR_n_BLT_UP_AREA` naming convention
//! define, through their colors, the set of acceptable colors for every rule
//! whose color spec is "as per sub-occupancy". The set must be fully built
//! before any such rule is evaluated; the validator runner enforces this by
//! computing it first and passing it by reference everywhere.

use crate::catalogue::NamePattern;
use crate::record::LayerRecord;
use std::collections::HashSet;

/// Naming convention for per-block, per-floor built-up area layers
pub const BUILT_UP_AREA_TEMPLATE: &str = "BLK_n_FLR_n_BLT_UP_AREA";

/// Colors observed on built-up-area layers
pub type OccupancyColorSet = HashSet<i32>;

/// Single pass over all layers collecting `color` and, when present,
/// `true_color` of every layer matching the built-up-area convention.
/// Order-independent: the result is a set.
pub fn collect_occupancy_colors(layers: &[LayerRecord]) -> OccupancyColorSet {
    let pattern = NamePattern::compile(BUILT_UP_AREA_TEMPLATE);
    let mut colors = HashSet::new();

    for layer in layers {
        if pattern.matches(&layer.name) {
            colors.insert(layer.color);
            if let Some(tc) = layer.true_color {
                colors.insert(tc);
            }
        }
    }

    colors
}

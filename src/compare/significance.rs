//! Significance classification
//!
//! Layer-name keyword tiers drive how seriously a detected change is
//! reported. Critical keywords cover the regulated quantities (built-up and
//! covered area, plot boundary, setbacks, floor area); high-priority
//! keywords cover vertical circulation and building envelope layers.

use super::types::{LayerChange, Significance};

pub const CRITICAL_KEYWORDS: &[&str] = &[
    "BLT_UP_AREA",
    "COVERED_AREA",
    "PLOT_BOUNDARY",
    "FRONT_SETBACK",
    "REAR_SETBACK",
    "SIDE_SETBACK",
    "SETBACK",
    "FLOOR_AREA",
];

pub const HIGH_PRIORITY_KEYWORDS: &[&str] = &[
    "STAIR",
    "LIFT",
    "HT_OF_BLDG",
    "PLINTH_HEIGHT",
    "PARAPET_HT",
    "BLDG_FOOT_PRINT",
];

pub const MEDIUM_PRIORITY_KEYWORDS: &[&str] = &["UNITFA", "ROOM", "PARKING", "DWELLING"];

fn name_matches(name_upper: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| name_upper.contains(k))
}

/// Classify an added or removed layer purely from its name keywords,
/// independent of change magnitude
pub fn classify_presence(layer_name: &str) -> Significance {
    let upper = layer_name.to_uppercase();
    if name_matches(&upper, CRITICAL_KEYWORDS) {
        Significance::Critical
    } else if name_matches(&upper, HIGH_PRIORITY_KEYWORDS) {
        Significance::High
    } else if name_matches(&upper, MEDIUM_PRIORITY_KEYWORDS) {
        Significance::Medium
    } else {
        Significance::Low
    }
}

/// Classify a modification from its layer category and change magnitude.
///
/// The setback centroid-shift check runs after the keyword tiers and can
/// only upgrade the result to Critical.
pub fn classify_modification(change: &LayerChange) -> Significance {
    let upper = change.layer_name.to_uppercase();
    let is_critical = name_matches(&upper, CRITICAL_KEYWORDS);
    let is_high = name_matches(&upper, HIGH_PRIORITY_KEYWORDS);

    let mut tier = None;

    if is_critical {
        if change.area_diff_percent.abs() > 5.0 {
            tier = Some(Significance::Critical);
        } else if change.area_diff_percent.abs() > 1.0 {
            tier = Some(Significance::High);
        } else if change.area_diff != 0.0 {
            tier = Some(Significance::Medium);
        }
    }

    if tier.is_none() && is_high {
        if change.area_diff_percent.abs() > 10.0 {
            tier = Some(Significance::High);
        } else if change.area_diff != 0.0 {
            tier = Some(Significance::Medium);
        }
    }

    // A shifted setback is always critical, whatever the tiers said
    if upper.contains("SETBACK") && change.centroid_shift_distance > 0.5 {
        return Significance::Critical;
    }

    if let Some(tier) = tier {
        return tier;
    }

    if change.entity_count_diff.abs() > 10 {
        return Significance::Medium;
    }

    Significance::Low
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::types::ChangeType;

    fn change(name: &str) -> LayerChange {
        LayerChange::blank(name, ChangeType::Modified)
    }

    #[test]
    fn test_presence_tiers() {
        assert_eq!(
            classify_presence("BLK_1_FLR_2_BLT_UP_AREA"),
            Significance::Critical
        );
        assert_eq!(classify_presence("STAIR_3"), Significance::High);
        assert_eq!(classify_presence("PARKING_AREA"), Significance::Medium);
        assert_eq!(classify_presence("NOTES"), Significance::Low);
        // Case-insensitive
        assert_eq!(classify_presence("front_setback"), Significance::Critical);
    }

    #[test]
    fn test_critical_area_percent_boundaries() {
        let mut c = change("FLOOR_AREA_1");
        c.area_diff = 5.0;
        c.area_diff_percent = 5.5;
        assert_eq!(classify_modification(&c), Significance::Critical);

        // Exactly 5.0 is strict: High, not Critical
        c.area_diff_percent = 5.0;
        assert_eq!(classify_modification(&c), Significance::High);

        c.area_diff_percent = 0.5;
        assert_eq!(classify_modification(&c), Significance::Medium);

        c.area_diff = 0.0;
        c.area_diff_percent = 0.0;
        assert_eq!(classify_modification(&c), Significance::Low);
    }

    #[test]
    fn test_high_priority_tiers() {
        let mut c = change("STAIR_2");
        c.area_diff = 1.0;
        c.area_diff_percent = 12.0;
        assert_eq!(classify_modification(&c), Significance::High);

        c.area_diff_percent = 3.0;
        assert_eq!(classify_modification(&c), Significance::Medium);
    }

    #[test]
    fn test_setback_shift_upgrades_to_critical() {
        // Negligible area change would otherwise classify Medium at best
        let mut c = change("REAR_SETBACK");
        c.area_diff = 0.001;
        c.area_diff_percent = 0.01;
        c.centroid_shift_distance = 0.6;
        assert_eq!(classify_modification(&c), Significance::Critical);

        c.centroid_shift_distance = 0.4;
        assert_eq!(classify_modification(&c), Significance::Medium);
    }

    #[test]
    fn test_entity_count_fallback() {
        let mut c = change("MISC_DETAIL");
        c.entity_count_diff = 11;
        assert_eq!(classify_modification(&c), Significance::Medium);
        c.entity_count_diff = 10;
        assert_eq!(classify_modification(&c), Significance::Low);
    }
}

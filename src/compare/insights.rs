//! Human-readable comparison insights
//!
//! Stateless text generation over the change list and summary. Callers can
//! drop this layer entirely without affecting the comparison itself.

use super::types::{ChangeType, ComparisonSummary, LayerChange};

/// Generate review guidance strings from a comparison result.
///
/// Output order is fixed: area totals, coverage, setbacks, new structures,
/// critical banner, overall assessment.
pub fn generate_insights(changes: &[LayerChange], summary: &ComparisonSummary) -> Vec<String> {
    let mut insights = Vec::new();

    let area_growth: f64 = changes
        .iter()
        .map(|c| c.area_diff)
        .filter(|d| *d > 0.0)
        .sum();
    let net_area_change: f64 = changes.iter().map(|c| c.area_diff).sum();
    if area_growth > 10.0 {
        insights.push(format!(
            "Total built-up area increased by {:.2} sq.m - verify against permissible limits",
            area_growth
        ));
    } else if net_area_change < -10.0 {
        insights.push(format!(
            "Total built-up area decreased by {:.2} sq.m",
            net_area_change.abs()
        ));
    }

    for change in changes {
        if change.layer_name.to_uppercase().contains("COVERED_AREA")
            && change.area_diff_percent.abs() > 5.0
        {
            insights.push(format!(
                "Ground coverage changed by {:+.1}% - may affect compliance",
                change.area_diff_percent
            ));
        }
    }

    let shifted_setbacks = changes
        .iter()
        .filter(|c| {
            c.layer_name.to_uppercase().contains("SETBACK") && c.centroid_shift_distance > 0.1
        })
        .count();
    if shifted_setbacks > 0 {
        insights.push(format!(
            "{} setback(s) have shifted position - verify minimum distances",
            shifted_setbacks
        ));
    }

    let new_structures = changes
        .iter()
        .filter(|c| {
            c.change_type == ChangeType::Added
                && ["STAIR", "LIFT", "ROOM"]
                    .iter()
                    .any(|k| c.layer_name.to_uppercase().contains(k))
        })
        .count();
    if new_structures > 0 {
        insights.push(format!(
            "{} new structural element(s) added - check fire safety and accessibility compliance",
            new_structures
        ));
    }

    if summary.critical_changes > 0 {
        insights.push(format!(
            "{} critical change(s) detected - review before submission",
            summary.critical_changes
        ));
    }

    if summary.added_count == 0 && summary.removed_count == 0 && summary.modified_count == 0 {
        insights.push("No changes detected between versions".to_string());
    } else if summary.critical_changes == 0 && summary.high_changes == 0 {
        insights.push("Changes are minor - likely safe for revision submission".to_string());
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::types::Significance;

    fn change(name: &str, change_type: ChangeType) -> LayerChange {
        LayerChange::blank(name, change_type)
    }

    #[test]
    fn test_no_changes_banner() {
        let summary = ComparisonSummary::default();
        let insights = generate_insights(&[], &summary);
        assert_eq!(insights, vec!["No changes detected between versions"]);
    }

    #[test]
    fn test_area_growth_threshold() {
        let mut a = change("BLK_1_FLR_1_BLT_UP_AREA", ChangeType::Modified);
        a.area_diff = 8.0;
        let mut b = change("BLK_1_FLR_2_BLT_UP_AREA", ChangeType::Modified);
        b.area_diff = 7.0;
        let summary = ComparisonSummary {
            modified_count: 2,
            critical_changes: 2,
            ..Default::default()
        };

        let insights = generate_insights(&[a, b], &summary);
        assert!(insights
            .iter()
            .any(|s| s.contains("increased by 15.00 sq.m")));
    }

    #[test]
    fn test_net_area_decrease() {
        // One layer grows a little, the rest shrink; net is what matters
        let mut a = change("BLK_1_FLR_1_BLT_UP_AREA", ChangeType::Modified);
        a.area_diff = 2.0;
        let mut b = change("BLK_1_FLR_2_BLT_UP_AREA", ChangeType::Modified);
        b.area_diff = -20.0;
        let summary = ComparisonSummary {
            modified_count: 2,
            ..Default::default()
        };

        let insights = generate_insights(&[a, b], &summary);
        assert!(insights
            .iter()
            .any(|s| s.contains("decreased by 18.00 sq.m")));
    }

    #[test]
    fn test_coverage_and_setback_warnings() {
        let mut cov = change("COVERED_AREA", ChangeType::Modified);
        cov.area_diff_percent = -6.5;
        let mut sb = change("FRONT_SETBACK", ChangeType::Modified);
        sb.centroid_shift_distance = 0.3;
        let summary = ComparisonSummary {
            modified_count: 2,
            critical_changes: 1,
            ..Default::default()
        };

        let insights = generate_insights(&[cov, sb], &summary);
        assert!(insights
            .iter()
            .any(|s| s.contains("Ground coverage changed by -6.5%")));
        assert!(insights
            .iter()
            .any(|s| s.contains("1 setback(s) have shifted position")));
        assert!(insights
            .iter()
            .any(|s| s.contains("1 critical change(s) detected")));
    }

    #[test]
    fn test_new_structures_counted() {
        let mut stair = change("STAIR_2", ChangeType::Added);
        stair.significance = Significance::High;
        let lift = change("LIFT_1", ChangeType::Added);
        let summary = ComparisonSummary {
            added_count: 2,
            high_changes: 1,
            low_changes: 1,
            ..Default::default()
        };

        let insights = generate_insights(&[stair, lift], &summary);
        assert!(insights
            .iter()
            .any(|s| s.contains("2 new structural element(s) added")));
    }

    #[test]
    fn test_minor_changes_assessment() {
        let c = change("NOTES", ChangeType::Modified);
        let summary = ComparisonSummary {
            modified_count: 1,
            low_changes: 1,
            ..Default::default()
        };

        let insights = generate_insights(&[c], &summary);
        assert!(insights
            .iter()
            .any(|s| s.contains("Changes are minor")));
    }
}

//! Color requirement evaluation
//!
//! Judges a candidate `(color, true_color)` pair against a rule's color spec,
//! and builds the union color domain used by the entity-level fallback when a
//! layer's own color satisfies none of its candidate rules.

use super::occupancy::OccupancyColorSet;
use crate::catalogue::{ColorSpec, CompiledRule};
use crate::record::{EntityRecord, COLOR_BY_BLOCK, COLOR_BY_LAYER};
use std::collections::HashSet;

/// Whether a color spec accepts a candidate's color pair.
///
/// `Exact` and `CodeList` only consult the plain color code. `Rgb` only
/// consults the packed true color. `DerivedFromOccupancy` accepts membership
/// of either in the occupancy set; an empty set accepts nothing.
pub fn color_matches(
    spec: &ColorSpec,
    color: i32,
    true_color: Option<i32>,
    occupancy: &OccupancyColorSet,
) -> bool {
    match spec {
        ColorSpec::Any => true,
        ColorSpec::Exact(code) => color == *code,
        ColorSpec::CodeList(codes) => codes.contains(&color),
        ColorSpec::Rgb(r, g, b) => true_color == Some(ColorSpec::pack_rgb(*r, *g, *b)),
        ColorSpec::DerivedFromOccupancy => {
            occupancy.contains(&color)
                || true_color.map(|tc| occupancy.contains(&tc)).unwrap_or(false)
        }
    }
}

/// Union of all colors accepted across a layer's candidate rules, used to
/// judge individual entities when the layer color itself failed.
#[derive(Debug, Default)]
pub struct ColorDomain {
    any: bool,
    codes: HashSet<i32>,
}

impl ColorDomain {
    pub fn from_candidates(candidates: &[&CompiledRule], occupancy: &OccupancyColorSet) -> Self {
        let mut domain = ColorDomain::default();
        for cr in candidates {
            match &cr.rule.color_spec {
                ColorSpec::Any => domain.any = true,
                ColorSpec::Exact(code) => {
                    domain.codes.insert(*code);
                }
                ColorSpec::CodeList(codes) => domain.codes.extend(codes.iter().copied()),
                ColorSpec::Rgb(r, g, b) => {
                    domain.codes.insert(ColorSpec::pack_rgb(*r, *g, *b));
                }
                ColorSpec::DerivedFromOccupancy => domain.codes.extend(occupancy.iter().copied()),
            }
        }
        domain
    }

    /// An entity passes only on independent evidence: inherited colors
    /// (ByLayer/ByBlock) always fail, explicit colors must lie in the union.
    pub fn accepts_entity(&self, entity: &EntityRecord) -> bool {
        if entity.color == COLOR_BY_LAYER || entity.color == COLOR_BY_BLOCK {
            return false;
        }
        if self.any {
            return true;
        }
        self.codes.contains(&entity.color)
            || entity
                .true_color
                .map(|tc| self.codes.contains(&tc))
                .unwrap_or(false)
    }
}

/// Render a color spec for expected-color error messages, expanding the
/// occupancy domain into the concrete set found in the drawing.
pub fn describe_color_spec(spec: &ColorSpec, occupancy: &OccupancyColorSet) -> String {
    match spec {
        ColorSpec::Any => "Any".to_string(),
        ColorSpec::Exact(code) => code.to_string(),
        ColorSpec::CodeList(codes) => codes
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        ColorSpec::Rgb(r, g, b) => format!("RGB {r},{g},{b}"),
        ColorSpec::DerivedFromOccupancy => {
            if occupancy.is_empty() {
                "As per Sub-Occupancy (No valid BLT_UP_AREA layers found to define colors)"
                    .to_string()
            } else {
                let mut occ: Vec<i32> = occupancy.iter().copied().collect();
                occ.sort_unstable();
                let list = occ
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("As per Sub-Occupancy ({list})")
            }
        }
    }
}

/// Concrete, non-ambiguous color token for a fix action. Multi-valued and
/// occupancy-derived specs have no single safe target color.
pub fn fix_color_token(spec: &ColorSpec) -> Option<String> {
    match spec {
        ColorSpec::Exact(code) => Some(code.to_string()),
        ColorSpec::Rgb(r, g, b) => Some(format!("T {r},{g},{b}")),
        // Default white for unconstrained specs
        ColorSpec::Any => Some("7".to_string()),
        ColorSpec::CodeList(_) | ColorSpec::DerivedFromOccupancy => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{Catalogue, EntityCategory, Requirement, Rule};

    fn rule_with_spec(spec: ColorSpec) -> Rule {
        Rule {
            name_template: "X".to_string(),
            color_spec: spec,
            category: EntityCategory::Unconstrained,
            requirement: Requirement::Optional,
            feature_label: "test".to_string(),
        }
    }

    #[test]
    fn test_exact_and_list_ignore_true_color() {
        let occ = OccupancyColorSet::new();
        assert!(color_matches(&ColorSpec::Exact(3), 3, None, &occ));
        assert!(!color_matches(&ColorSpec::Exact(3), 4, Some(3), &occ));
        assert!(color_matches(
            &ColorSpec::CodeList(vec![1, 2]),
            2,
            None,
            &occ
        ));
        assert!(!color_matches(
            &ColorSpec::CodeList(vec![1, 2]),
            3,
            Some(1),
            &occ
        ));
    }

    #[test]
    fn test_rgb_requires_true_color() {
        let occ = OccupancyColorSet::new();
        let spec = ColorSpec::Rgb(255, 0, 0);
        assert!(color_matches(&spec, 1, Some(0xFF0000), &occ));
        assert!(!color_matches(&spec, 1, None, &occ));
        assert!(!color_matches(&spec, 1, Some(0x00FF00), &occ));
    }

    #[test]
    fn test_occupancy_membership_and_empty_set() {
        let occ: OccupancyColorSet = [3, 0xAA00BB].into_iter().collect();
        let spec = ColorSpec::DerivedFromOccupancy;
        assert!(color_matches(&spec, 3, None, &occ));
        assert!(color_matches(&spec, 9, Some(0xAA00BB), &occ));
        assert!(!color_matches(&spec, 9, None, &occ));
        // Empty domain accepts nothing
        assert!(!color_matches(&spec, 3, None, &OccupancyColorSet::new()));
    }

    #[test]
    fn test_domain_rejects_inherited_entity_colors() {
        let cat = Catalogue::from_rules(vec![rule_with_spec(ColorSpec::Exact(3))]);
        let candidates: Vec<_> = cat.rules().iter().collect();
        let domain = ColorDomain::from_candidates(&candidates, &OccupancyColorSet::new());

        let mut e = EntityRecord::of_kind("LINE");
        e.color = 3;
        assert!(domain.accepts_entity(&e));

        e.color = COLOR_BY_LAYER;
        assert!(!domain.accepts_entity(&e));
        e.color = COLOR_BY_BLOCK;
        assert!(!domain.accepts_entity(&e));

        e.color = 9;
        assert!(!domain.accepts_entity(&e));
        e.true_color = Some(3);
        assert!(domain.accepts_entity(&e));
    }

    #[test]
    fn test_describe_expands_occupancy() {
        let occ: OccupancyColorSet = [5, 3].into_iter().collect();
        assert_eq!(
            describe_color_spec(&ColorSpec::DerivedFromOccupancy, &occ),
            "As per Sub-Occupancy (3, 5)"
        );
        assert!(
            describe_color_spec(&ColorSpec::DerivedFromOccupancy, &OccupancyColorSet::new())
                .contains("No valid BLT_UP_AREA")
        );
    }

    #[test]
    fn test_fix_color_token() {
        assert_eq!(fix_color_token(&ColorSpec::Exact(4)), Some("4".to_string()));
        assert_eq!(
            fix_color_token(&ColorSpec::Rgb(1, 2, 3)),
            Some("T 1,2,3".to_string())
        );
        assert_eq!(fix_color_token(&ColorSpec::Any), Some("7".to_string()));
        assert_eq!(fix_color_token(&ColorSpec::CodeList(vec![1, 2])), None);
        assert_eq!(fix_color_token(&ColorSpec::DerivedFromOccupancy), None);
    }
}

//! Validation entry point
//!
//! Orchestrates the full per-catalogue run: occupancy color collection
//! (which must complete before any rule evaluation), unit header checks, the
//! mandatory-presence pass, and parallel per-layer verdicts.

use super::analysis::layer_analysis;
use super::color::{color_matches, describe_color_spec, fix_color_token, ColorDomain};
use super::occupancy::{collect_occupancy_colors, OccupancyColorSet};
use super::text::{validate_text_content, voltage_value};
use super::types::{
    is_ignored_layer, FixAction, FixKind, LayerVerdict, ValidationReport, VerdictStatus,
};
use super::units::{check_units, DrawingUnits};
use crate::catalogue::{Catalogue, ColorSpec, CompiledRule, EntityCategory};
use crate::metrics::{entity_is_closed, shoelace_area};
use crate::record::LayerRecord;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// At most this many distinct messages per error class are attached to a
/// verdict, to avoid flooding reports for layers with many bad entities
const MAX_MESSAGES_PER_CLASS: usize = 3;

/// Result of validating one layer, including its contributions to the
/// catalogue-level lists
struct LayerOutcome {
    verdict: LayerVerdict,
    errors: Vec<String>,
    warnings: Vec<String>,
    fix_action: Option<FixAction>,
}

/// Validate all layers against a rule catalogue.
///
/// The occupancy color set is computed up front; per-layer verdicts then only
/// read shared immutable state and are sharded across threads. Verdicts are
/// merged sorted by layer name.
pub fn validate_layers(
    catalogue: &Catalogue,
    layers: &[LayerRecord],
    units: Option<&DrawingUnits>,
) -> ValidationReport {
    let start = std::time::Instant::now();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut fix_actions = Vec::new();

    if let Some(units) = units {
        check_units(units, &mut errors, &mut warnings);
    }

    // Barrier: the occupancy domain must be complete before any
    // DerivedFromOccupancy rule is evaluated
    let occupancy = collect_occupancy_colors(layers);

    // Mandatory-presence pass over all layer names (ignored layers included)
    for mr in catalogue.mandatory_rules() {
        let present = layers.iter().any(|l| mr.pattern.matches(&l.name));
        if !present {
            errors.push(format!(
                "Missing Mandatory Layer: {} (Feature: {})",
                mr.rule.name_template, mr.rule.feature_label
            ));
            if let Some(color) = fix_color_token(&mr.rule.color_spec) {
                fix_actions.push(FixAction {
                    kind: FixKind::CreateLayer,
                    layer: mr.rule.name_template.clone(),
                    color,
                });
            }
        }
    }

    // Per-layer verdicts in parallel
    let mut outcomes: Vec<LayerOutcome> = layers
        .par_iter()
        .filter(|layer| !is_ignored_layer(&layer.name))
        .map(|layer| validate_layer(layer, catalogue, &occupancy))
        .collect();
    outcomes.sort_by(|a, b| a.verdict.name.cmp(&b.verdict.name));

    let mut verdicts = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        verdicts.push(outcome.verdict);
        errors.extend(outcome.errors);
        warnings.extend(outcome.warnings);
        fix_actions.extend(outcome.fix_action);
    }

    eprintln!(
        "[VALIDATE] {} layers against {} rules: {} errors, {} warnings in {:?}",
        layers.len(),
        catalogue.len(),
        errors.len(),
        warnings.len(),
        start.elapsed()
    );

    ValidationReport {
        layers: verdicts,
        count: layers.len(),
        errors,
        warnings,
        fix_actions,
        layer_analysis: layer_analysis(layers),
    }
}

/// Validate a single layer: candidate collection, color gate (with
/// entity-level fallback), then the type/geometry/text gate.
///
/// A layer accepted through the entity-level fallback is not final yet: it
/// must still have at least one fully compliant candidate rule to be Valid.
fn validate_layer(
    layer: &LayerRecord,
    catalogue: &Catalogue,
    occupancy: &OccupancyColorSet,
) -> LayerOutcome {
    let candidates = catalogue.candidates(&layer.name);

    if candidates.is_empty() {
        return LayerOutcome {
            verdict: LayerVerdict {
                name: layer.name.clone(),
                status: VerdictStatus::Warning,
                messages: vec!["Layer not found in master guidelines".to_string()],
                data_attributes: Vec::new(),
            },
            errors: Vec::new(),
            warnings: vec![format!(
                "Layer '{}': Unknown layer not in guidelines",
                layer.name
            )],
            fix_action: None,
        };
    }

    // Color gate: first candidate rule in catalogue order whose spec accepts
    // the layer's own colors wins
    let direct_pass = candidates
        .iter()
        .any(|cr| color_matches(&cr.rule.color_spec, layer.color, layer.true_color, occupancy));

    // Entity-level fallback: every entity must carry an explicit color lying
    // in the union of all candidate specs
    let fallback_pass = if !direct_pass && !layer.entities.is_empty() {
        let domain = ColorDomain::from_candidates(&candidates, occupancy);
        layer.entities.iter().all(|e| domain.accepts_entity(e))
    } else {
        false
    };

    if !direct_pass && !fallback_pass {
        return color_error_outcome(layer, &candidates, occupancy);
    }

    // Type/geometry/text gate across all candidate rules
    let gate = check_candidate_rules(layer, &candidates);

    if !gate.compliant_found {
        let mut messages: Vec<String> = gate
            .type_errors
            .into_iter()
            .take(MAX_MESSAGES_PER_CLASS)
            .collect();
        messages.extend(gate.geometry_errors.into_iter().take(MAX_MESSAGES_PER_CLASS));
        return LayerOutcome {
            verdict: LayerVerdict {
                name: layer.name.clone(),
                status: VerdictStatus::Error,
                messages,
                data_attributes: Vec::new(),
            },
            errors: Vec::new(),
            warnings: Vec::new(),
            fix_action: None,
        };
    }

    // Valid: attach display data, subject to the voltage single-value
    // constraint
    let mut messages = Vec::new();
    let mut data_attributes = Vec::new();
    let mut status = VerdictStatus::Valid;

    if gate.area > 0.0 {
        data_attributes.push(format!("Area: {:.2} sq.m", gate.area));
    }

    if !gate.texts.is_empty() {
        let unique_texts: Vec<String> = {
            let set: BTreeSet<String> = gate.texts.iter().cloned().collect();
            set.into_iter().collect()
        };

        let is_voltage_layer = candidates
            .iter()
            .any(|cr| cr.rule.name_template.contains("VOLTAGE"));
        if is_voltage_layer && distinct_voltage_values(&gate.texts) > 1 {
            status = VerdictStatus::Error;
            messages.push(format!(
                "Multiple values found for Voltage: {}. Expected single unique value.",
                unique_texts.join(", ")
            ));
        } else {
            let shown = unique_texts
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            let suffix = if unique_texts.len() > 3 { "..." } else { "" };
            data_attributes.push(format!("Text: {shown}{suffix}"));
        }
    }

    LayerOutcome {
        verdict: LayerVerdict {
            name: layer.name.clone(),
            status,
            messages,
            data_attributes,
        },
        errors: Vec::new(),
        warnings: Vec::new(),
        fix_action: None,
    }
}

/// Aggregated result of checking every candidate rule against a layer
struct GateResult {
    compliant_found: bool,
    /// Accumulated closed-polygon area from a compliant Polygon rule
    area: f64,
    /// Text values collected under a compliant Text rule
    texts: Vec<String>,
    type_errors: BTreeSet<String>,
    geometry_errors: BTreeSet<String>,
}

fn check_candidate_rules(layer: &LayerRecord, candidates: &[&CompiledRule]) -> GateResult {
    let mut result = GateResult {
        // A layer with no entities has nothing to violate
        compliant_found: layer.entities.is_empty(),
        area: 0.0,
        texts: Vec::new(),
        type_errors: BTreeSet::new(),
        geometry_errors: BTreeSet::new(),
    };
    if layer.entities.is_empty() {
        return result;
    }

    for cr in candidates {
        let category = cr.rule.category;
        let mut type_ok = true;
        let mut geometry_ok = true;
        let mut text_ok = true;
        let mut rule_area = 0.0;
        let mut rule_texts = Vec::new();

        for entity in &layer.entities {
            if !category.allows_kind(&entity.kind) {
                type_ok = false;
                result.type_errors.insert(format!(
                    "Invalid Entity: Found '{}' on layer requiring '{}'",
                    entity.kind,
                    category.label()
                ));
                continue;
            }

            if category == EntityCategory::Polygon {
                if entity_is_closed(entity) {
                    rule_area += entity
                        .area
                        .map(f64::abs)
                        .unwrap_or_else(|| shoelace_area(&entity.points));
                } else {
                    geometry_ok = false;
                    result
                        .geometry_errors
                        .insert("Open Polygon detected. Area cannot be calculated.".to_string());
                }
            }

            if category == EntityCategory::Text {
                // Entities with unreadable text are skipped for this check
                if let Some(text) = &entity.text {
                    if let Err(msg) = validate_text_content(text, &layer.name) {
                        text_ok = false;
                        result
                            .type_errors
                            .insert(format!("Invalid Text: '{text}' ({msg})"));
                    }
                    rule_texts.push(text.clone());
                }
            }
        }

        if type_ok && geometry_ok && text_ok {
            result.compliant_found = true;
            if category == EntityCategory::Polygon && rule_area > 0.0 {
                result.area = rule_area;
            }
            if category == EntityCategory::Text && !rule_texts.is_empty() {
                result.texts = rule_texts;
            }
        }
    }

    result
}

/// Number of distinct voltage values among the collected texts, comparing by
/// normalized numeric value so "11" and "11KV" count once
fn distinct_voltage_values(texts: &[String]) -> usize {
    let keys: BTreeSet<String> = texts
        .iter()
        .map(|t| match voltage_value(t) {
            Some(v) => format!("{v}"),
            None => t.trim().to_uppercase(),
        })
        .collect();
    keys.len()
}

/// Error outcome for a layer failing both the direct color gate and the
/// entity-level fallback
fn color_error_outcome(
    layer: &LayerRecord,
    candidates: &[&CompiledRule],
    occupancy: &OccupancyColorSet,
) -> LayerOutcome {
    let expected: Vec<String> = {
        let set: BTreeSet<String> = candidates
            .iter()
            .map(|cr| describe_color_spec(&cr.rule.color_spec, occupancy))
            .collect();
        set.into_iter().collect()
    };

    let mut msg = format!(
        "Incorrect color. Expected one of: {}, Found: {}",
        expected.join(", "),
        layer.color
    );
    if let Some(tc) = layer.true_color {
        msg.push_str(&format!(" (True Color {tc})"));
    }

    // First concrete candidate color becomes the recolor target
    let fix_action = candidates
        .iter()
        .find_map(|cr| match &cr.rule.color_spec {
            ColorSpec::Exact(code) => Some(code.to_string()),
            ColorSpec::CodeList(codes) => codes.first().map(|c| c.to_string()),
            ColorSpec::Rgb(r, g, b) => Some(format!("T {r},{g},{b}")),
            ColorSpec::Any | ColorSpec::DerivedFromOccupancy => None,
        })
        .map(|color| FixAction {
            kind: FixKind::FixColor,
            layer: layer.name.clone(),
            color,
        });

    LayerOutcome {
        verdict: LayerVerdict {
            name: layer.name.clone(),
            status: VerdictStatus::Error,
            messages: vec![msg.clone()],
            data_attributes: Vec::new(),
        },
        errors: vec![format!("Layer '{}': {}", layer.name, msg)],
        warnings: Vec::new(),
        fix_action,
    }
}

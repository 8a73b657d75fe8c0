// End-to-end validation run: JSON catalogue, mixed layer set, unit headers
use layeraudit::record::{EntityRecord, LayerRecord, Point};
use layeraudit::validate::{validate_layers, DrawingUnits, FixKind, VerdictStatus};
use layeraudit::Catalogue;
use serde_json::json;
use std::time::Instant;

#[cfg(test)]
mod tests {
    use super::*;

    fn master_rules() -> Catalogue {
        let doc = json!([
            {
                "Layer Name": "BLK_n_FLR_n_BLT_UP_AREA",
                "Color Code": "As per Sub-Occupancy",
                "Type": "Polygon",
                "Requirement": "Mandatory for all proposals",
                "Feature": "Built-up area"
            },
            {
                "Layer Name": "PLOT_BOUNDARY",
                "Color Code": "1",
                "Type": "Line",
                "Requirement": "Mandatory",
                "Feature": "Plot boundary"
            },
            {
                "Layer Name": "UNITFA_n",
                "Color Code": "As per Sub-Occupancy",
                "Type": "Polygon",
                "Requirement": "Optional",
                "Feature": "Unit floor area"
            },
            {
                "Layer Name": "STAIR_n",
                "Color Code": "3",
                "Type": "Polygon",
                "Requirement": "Mandatory",
                "Feature": "Staircase"
            },
            {
                "Layer Name": "HT_OF_BLDG",
                "Color Code": "Any",
                "Type": "Text",
                "Requirement": "Optional",
                "Feature": "Building height"
            }
        ]);
        Catalogue::from_json(&doc).expect("catalogue should load")
    }

    fn closed_polygon(kind: &str, size: f64) -> EntityRecord {
        let mut e = EntityRecord::of_kind(kind);
        e.points = vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ];
        e.is_closed = Some(true);
        e
    }

    fn line_entity() -> EntityRecord {
        let mut e = EntityRecord::of_kind("LINE");
        e.points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        e
    }

    fn sample_drawing() -> Vec<LayerRecord> {
        let mut occupancy = LayerRecord::new("BLK_1_FLR_1_BLT_UP_AREA", 30);
        occupancy.entities.push(closed_polygon("LWPOLYLINE", 10.0));

        let mut boundary = LayerRecord::new("PLOT_BOUNDARY", 1);
        boundary.entities.push(line_entity());

        // Sub-occupancy layer colored from the occupancy domain
        let mut unit = LayerRecord::new("UNITFA_1", 30);
        unit.entities.push(closed_polygon("HATCH", 4.0));

        // Wrong color and no entity-level evidence
        let mut stair = LayerRecord::new("STAIR_2", 9);
        stair.entities.push(closed_polygon("POLYLINE", 2.0));

        let unknown = LayerRecord::new("RANDOM_SCRIBBLES", 7);
        let ignored = LayerRecord::new("Defpoints", 7);

        vec![occupancy, boundary, unit, stair, unknown, ignored]
    }

    #[test]
    fn test_full_validation_run() {
        let catalogue = master_rules();
        let layers = sample_drawing();

        let start = Instant::now();
        let report = validate_layers(&catalogue, &layers, None);
        println!(
            "Validated {} layers in {:.3}ms",
            report.count,
            start.elapsed().as_secs_f64() * 1000.0
        );

        assert_eq!(report.count, 6);
        // Ignored layer carries no verdict, all others do, sorted by name
        assert_eq!(report.layers.len(), 5);
        let names: Vec<&str> = report.layers.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "BLK_1_FLR_1_BLT_UP_AREA",
                "PLOT_BOUNDARY",
                "RANDOM_SCRIBBLES",
                "STAIR_2",
                "UNITFA_1"
            ]
        );

        let by_name = |n: &str| report.layers.iter().find(|v| v.name == n).unwrap();

        // Occupancy layer validates against its own derived domain
        assert_eq!(by_name("BLK_1_FLR_1_BLT_UP_AREA").status, VerdictStatus::Valid);
        assert_eq!(
            by_name("BLK_1_FLR_1_BLT_UP_AREA").data_attributes,
            vec!["Area: 100.00 sq.m"]
        );
        assert_eq!(by_name("PLOT_BOUNDARY").status, VerdictStatus::Valid);
        assert_eq!(by_name("UNITFA_1").status, VerdictStatus::Valid);
        assert_eq!(by_name("RANDOM_SCRIBBLES").status, VerdictStatus::Warning);

        let stair = by_name("STAIR_2");
        assert_eq!(stair.status, VerdictStatus::Error);
        assert!(stair.messages[0].contains("Incorrect color"));
        assert!(stair.messages[0].contains("Found: 9"));

        // One recolor fix for the stair layer
        let fix = report
            .fix_actions
            .iter()
            .find(|f| f.kind == FixKind::FixColor)
            .expect("expected a recolor fix");
        assert_eq!(fix.layer, "STAIR_2");
        assert_eq!(fix.color, "3");

        // Analysis table lists every layer, ignored ones included
        assert_eq!(report.layer_analysis.len(), 6);
    }

    #[test]
    fn test_missing_mandatory_layers_reported() {
        let catalogue = master_rules();
        // Only the optional unit layer is present
        let mut unit = LayerRecord::new("UNITFA_1", 30);
        unit.entities.push(closed_polygon("HATCH", 4.0));

        let report = validate_layers(&catalogue, &[unit], None);

        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("Missing Mandatory Layer: BLK_n_FLR_n_BLT_UP_AREA")));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("Missing Mandatory Layer: PLOT_BOUNDARY (Feature: Plot boundary)")));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("Missing Mandatory Layer: STAIR_n")));

        // Occupancy-derived rules get no create fix, concrete colors do
        let create_layers: Vec<&str> = report
            .fix_actions
            .iter()
            .filter(|f| f.kind == FixKind::CreateLayer)
            .map(|f| f.layer.as_str())
            .collect();
        assert_eq!(create_layers, vec!["PLOT_BOUNDARY", "STAIR_n"]);
    }

    #[test]
    fn test_unit_header_findings() {
        let catalogue = master_rules();
        let layers = sample_drawing();
        let units = DrawingUnits {
            insunits: 4,
            lunits: 2,
            aunits: 0,
            luprec: 4,
        };

        let report = validate_layers(&catalogue, &layers, Some(&units));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("$INSUNITS=6") && e.contains("Millimeters")));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("$LUPREC=2") && w.contains("4")));
    }

    #[test]
    fn test_report_serializes_with_lowercase_statuses() {
        let catalogue = master_rules();
        let report = validate_layers(&catalogue, &sample_drawing(), None);

        let value = serde_json::to_value(&report).expect("report should serialize");
        let layers = value["layers"].as_array().unwrap();
        assert_eq!(layers.len(), 5);
        assert_eq!(layers[0]["status"], "valid");

        let stair = layers
            .iter()
            .find(|l| l["name"] == "STAIR_2")
            .unwrap();
        assert_eq!(stair["status"], "error");

        let fixes = value["fix_actions"].as_array().unwrap();
        assert!(fixes.iter().any(|f| f["type"] == "fix_color"));
    }

    #[test]
    fn test_occupancy_error_names_available_colors() {
        let catalogue = master_rules();
        // Unit layer colored outside the derived domain
        let occupancy = LayerRecord::new("BLK_1_FLR_1_BLT_UP_AREA", 30);
        let mut unit = LayerRecord::new("UNITFA_1", 99);
        unit.entities.push(closed_polygon("HATCH", 4.0));

        let report = validate_layers(&catalogue, &[occupancy, unit], None);
        let verdict = report
            .layers
            .iter()
            .find(|v| v.name == "UNITFA_1")
            .unwrap();
        assert_eq!(verdict.status, VerdictStatus::Error);
        assert!(verdict.messages[0].contains("As per Sub-Occupancy (30)"));
        assert!(verdict.messages[0].contains("Found: 99"));
    }
}

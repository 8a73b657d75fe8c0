//! Drawing unit header checks
//!
//! Compliance drawings must use metric decimal units: meters ($INSUNITS=6),
//! decimal lengths ($LUNITS=2), decimal-degree angles ($AUNITS=0). Precision
//! ($LUPREC) other than two places is only a warning.

/// Unit-related header variables from the drawing, supplied by the parsing
/// collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawingUnits {
    pub insunits: i32,
    pub lunits: i32,
    pub aunits: i32,
    pub luprec: i32,
}

fn insunits_name(code: i32) -> String {
    match code {
        0 => "Unitless".to_string(),
        1 => "Inches".to_string(),
        2 => "Feet".to_string(),
        4 => "Millimeters".to_string(),
        5 => "Centimeters".to_string(),
        6 => "Meters".to_string(),
        other => format!("Custom ({other})"),
    }
}

fn lunits_name(code: i32) -> String {
    match code {
        1 => "Scientific".to_string(),
        2 => "Decimal".to_string(),
        3 => "Engineering".to_string(),
        4 => "Architectural".to_string(),
        5 => "Fractional".to_string(),
        other => other.to_string(),
    }
}

fn aunits_name(code: i32) -> String {
    match code {
        0 => "Decimal Degrees".to_string(),
        1 => "Deg/Min/Sec".to_string(),
        2 => "Gradians".to_string(),
        3 => "Radians".to_string(),
        4 => "Surveyor".to_string(),
        other => other.to_string(),
    }
}

/// Check unit headers, appending findings to the catalogue-level error and
/// warning lists
pub fn check_units(units: &DrawingUnits, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if units.insunits != 6 {
        errors.push(format!(
            "Drawing unit must be Meter ($INSUNITS=6). Found: {}",
            insunits_name(units.insunits)
        ));
    }
    if units.lunits != 2 {
        errors.push(format!(
            "Drawing unit length type must be Decimal ($LUNITS=2). Found: {}",
            lunits_name(units.lunits)
        ));
    }
    if units.aunits != 0 {
        errors.push(format!(
            "Drawing unit angle type must be Decimal Degrees ($AUNITS=0). Found: {}",
            aunits_name(units.aunits)
        ));
    }
    if units.luprec != 2 {
        warnings.push(format!(
            "Linear unit precision should be 0.00 ($LUPREC=2). Found: {}",
            units.luprec
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_decimal_passes() {
        let units = DrawingUnits {
            insunits: 6,
            lunits: 2,
            aunits: 0,
            luprec: 2,
        };
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        check_units(&units, &mut errors, &mut warnings);
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_imperial_units_flagged() {
        let units = DrawingUnits {
            insunits: 1,
            lunits: 4,
            aunits: 3,
            luprec: 4,
        };
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        check_units(&units, &mut errors, &mut warnings);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("Inches"));
        assert!(errors[1].contains("Architectural"));
        assert!(errors[2].contains("Radians"));
        assert_eq!(warnings.len(), 1);
    }
}

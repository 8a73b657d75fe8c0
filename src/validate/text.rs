//! Text content conventions
//!
//! Text-category layers encode numeric values whose expected form is driven
//! by the layer name: capacity layers hold integers with an optional litre
//! unit, voltage layers hold decimals with an optional KV unit, and
//! height/width/slope layers hold decimals with optional trailing letters or
//! a percent sign. Texts are trimmed and uppercased before checking.

/// Validate a text value against the conventions implied by its layer name.
/// Returns an error message when the value violates a convention; layers with
/// no recognized suffix accept any text.
pub fn validate_text_content(text: &str, layer_name: &str) -> Result<(), String> {
    let clean = text.trim().to_uppercase();

    if layer_name.contains("CAPACITY_L") {
        if !is_capacity(&clean) {
            return Err("Expected numeric capacity (e.g. '5000' or '5000L')".to_string());
        }
    } else if layer_name.contains("VOLTAGE_KV") {
        if !is_voltage(&clean) {
            return Err("Expected numeric voltage (e.g. '11' or '11KV')".to_string());
        }
    } else if ["_HEIGHT", "_WIDTH", "_SLOPE"]
        .iter()
        .any(|suffix| layer_name.contains(suffix))
        && !is_measure(&clean)
    {
        return Err("Expected numeric value".to_string());
    }

    Ok(())
}

/// Numeric value of a voltage text ("11", "11KV", "11.5 KV"), for the
/// layer-level single-value constraint. "11" and "11KV" normalize equal.
pub fn voltage_value(text: &str) -> Option<f64> {
    let clean = text.trim().to_uppercase();
    let (value, rest) = take_decimal(&clean)?;
    let rest = rest.trim_start();
    if rest.is_empty() || rest == "KV" {
        Some(value)
    } else {
        None
    }
}

/// Integer, optional spaces, optional single 'L'
fn is_capacity(s: &str) -> bool {
    let bytes = s.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    let rest = s[digits..].trim_start();
    rest.is_empty() || rest == "L"
}

/// Decimal, optional spaces, optional "KV"
fn is_voltage(s: &str) -> bool {
    voltage_value(s).is_some()
}

/// Decimal, optional spaces, then zero or more uppercase letters / '%'
fn is_measure(s: &str) -> bool {
    match take_decimal(s) {
        Some((_, rest)) => rest
            .trim_start()
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '%'),
        None => false,
    }
}

/// Parse a leading unsigned decimal number (`\d+(\.\d+)?`), returning the
/// value and the remaining string
fn take_decimal(s: &str) -> Option<(f64, &str)> {
    let bytes = s.as_bytes();
    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    if bytes.get(end) == Some(&b'.') {
        let frac = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac == 0 {
            return None;
        }
        end += 1 + frac;
    }
    s[..end].parse::<f64>().ok().map(|v| (v, &s[end..]))
}

//! Layer analysis table
//!
//! Produces the per-layer display rows (color token, RGB swatch, linetype,
//! visibility) shown alongside validation results. Standard AutoCAD index
//! colors are mapped through a fixed table; unmapped codes fall back to a
//! deterministic generated color so every row gets a swatch.

use super::types::LayerAnalysis;
use crate::record::{LayerRecord, COLOR_BY_BLOCK, COLOR_BY_LAYER};

/// Standard AutoCAD index colors (subset in common use)
const ACI_COLORS: &[(i32, (u8, u8, u8))] = &[
    (0, (0, 0, 0)),
    (1, (255, 0, 0)),
    (2, (255, 255, 0)),
    (3, (0, 255, 0)),
    (4, (0, 255, 255)),
    (5, (0, 0, 255)),
    (6, (255, 0, 255)),
    (7, (255, 255, 255)),
    (8, (128, 128, 128)),
    (9, (192, 192, 192)),
    (10, (255, 0, 0)),
    (30, (0, 127, 0)),
    (40, (127, 0, 0)),
    (50, (127, 63, 0)),
    (80, (127, 127, 0)),
    (100, (255, 127, 0)),
    (120, (127, 0, 127)),
    (140, (0, 127, 127)),
    (160, (192, 192, 192)),
    (180, (128, 128, 128)),
];

/// Resolve a display RGB for a color code, preferring the true color
pub fn color_rgb(color_code: i32, true_color: Option<i32>) -> (u8, u8, u8) {
    if let Some(tc) = true_color {
        if tc > 0 {
            return (
                ((tc >> 16) & 0xFF) as u8,
                ((tc >> 8) & 0xFF) as u8,
                (tc & 0xFF) as u8,
            );
        }
    }
    if let Some(&(_, rgb)) = ACI_COLORS.iter().find(|(code, _)| *code == color_code) {
        return rgb;
    }
    if color_code == COLOR_BY_LAYER {
        return (128, 128, 128);
    }
    if color_code == COLOR_BY_BLOCK {
        return (0, 0, 0);
    }
    // Deterministic generated color for unmapped codes
    (
        ((color_code * 47) % 256) as u8,
        ((color_code * 113) % 256) as u8,
        ((color_code * 179) % 256) as u8,
    )
}

/// Build the analysis row list for all layers, sorted by name
pub fn layer_analysis(layers: &[LayerRecord]) -> Vec<LayerAnalysis> {
    let mut rows: Vec<LayerAnalysis> = layers
        .iter()
        .map(|layer| {
            let (r, g, b) = color_rgb(layer.color, layer.true_color);
            let color_integer = match layer.true_color {
                Some(tc) if tc > 0 => tc.to_string(),
                _ => layer.color.to_string(),
            };
            LayerAnalysis {
                layer_name: layer.name.clone(),
                color_integer,
                color_swatch: format!("rgb({r}, {g}, {b})"),
                line_type: layer.linetype.clone(),
                visibility: if layer.visible {
                    "Visible".to_string()
                } else {
                    "Hidden".to_string()
                },
            }
        })
        .collect();

    rows.sort_by(|a, b| a.layer_name.cmp(&b.layer_name));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aci_lookup_and_true_color_override() {
        assert_eq!(color_rgb(1, None), (255, 0, 0));
        assert_eq!(color_rgb(5, None), (0, 0, 255));
        assert_eq!(color_rgb(1, Some(0x00FF00)), (0, 255, 0));
        assert_eq!(color_rgb(COLOR_BY_LAYER, None), (128, 128, 128));
    }

    #[test]
    fn test_generated_color_is_deterministic() {
        assert_eq!(color_rgb(42, None), color_rgb(42, None));
    }

    #[test]
    fn test_rows_sorted_and_labeled() {
        let mut hidden = LayerRecord::new("Z_LAYER", 3);
        hidden.visible = false;
        let mut truecolor = LayerRecord::new("A_LAYER", 1);
        truecolor.true_color = Some(0xFF0000);

        let rows = layer_analysis(&[hidden, truecolor]);
        assert_eq!(rows[0].layer_name, "A_LAYER");
        assert_eq!(rows[0].color_integer, 0xFF0000.to_string());
        assert_eq!(rows[0].color_swatch, "rgb(255, 0, 0)");
        assert_eq!(rows[1].visibility, "Hidden");
    }
}

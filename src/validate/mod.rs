//! Rule-matching validation engine
//!
//! Decides, per layer, whether its name, color, entity-type mix, geometry,
//! and text content satisfy a rule catalogue, including multi-rule ambiguity
//! resolution and the occupancy-derived color domain.
//!
//! # Submodules
//! - `types` - Verdicts, fix actions, report structures
//! - `occupancy` - Occupancy color domain collection
//! - `color` - Color requirement evaluation and the entity-level fallback
//! - `text` - Text content conventions
//! - `units` - Drawing unit header checks
//! - `analysis` - Layer analysis display rows
//! - `runner` - Validation entry point

mod analysis;
mod color;
mod occupancy;
mod runner;
mod text;
mod types;
mod units;

pub use analysis::{color_rgb, layer_analysis};
pub use color::{color_matches, describe_color_spec, ColorDomain};
pub use occupancy::{collect_occupancy_colors, OccupancyColorSet, BUILT_UP_AREA_TEMPLATE};
pub use runner::validate_layers;
pub use text::{validate_text_content, voltage_value};
pub use types::{
    is_ignored_layer, FixAction, FixKind, LayerAnalysis, LayerVerdict, ValidationReport,
    VerdictStatus, IGNORED_LAYERS,
};
pub use units::{check_units, DrawingUnits};

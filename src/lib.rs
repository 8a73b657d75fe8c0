//! Layer-level audit engine for building-plan CAD drawings
//!
//! Two subsystems over caller-supplied, in-memory drawing data:
//!
//! - [`validate`]: checks every layer of a drawing against a rule catalogue
//!   (name templates, color requirements, entity types, geometry closure,
//!   text conventions) and reports per-layer verdicts plus advisory fixes.
//! - [`compare`]: diffs two layer snapshots of the same drawing, classifies
//!   each change by severity, and summarises the result for revision review.
//!
//! File parsing, rendering, and persistence are the caller's concern; this
//! crate never touches the filesystem.

pub mod catalogue;
pub mod compare;
pub mod metrics;
pub mod record;
pub mod validate;

pub use catalogue::{Catalogue, ColorSpec, EntityCategory, NamePattern, Requirement, Rule};
pub use compare::{Comparator, ComparisonSummary, LayerChange, LayerState, SnapshotMap};
pub use metrics::{extract_metrics, MetricVector};
pub use record::{EntityRecord, LayerRecord, Point};
pub use validate::{validate_layers, DrawingUnits, ValidationReport};

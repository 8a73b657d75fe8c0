//! Structural comparison engine
//!
//! Diffs two versions of a drawing at the layer level and classifies every
//! difference for plan-revision review.
//!
//! # Submodules
//! - `types` - Snapshot states, change records, summary
//! - `significance` - Keyword tiers and severity classification
//! - `engine` - The diff algorithm
//! - `insights` - Review guidance text

mod engine;
mod insights;
mod significance;
mod types;

pub use engine::Comparator;
pub use insights::generate_insights;
pub use significance::{
    classify_modification, classify_presence, CRITICAL_KEYWORDS, HIGH_PRIORITY_KEYWORDS,
    MEDIUM_PRIORITY_KEYWORDS,
};
pub use types::{ChangeType, ComparisonSummary, LayerChange, LayerState, Significance, SnapshotMap};

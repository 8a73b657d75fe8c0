//! Rule catalogue loading and name-template compilation
//!
//! # Submodules
//! - `pattern` - Layer-name template compiler (numeric placeholder grammar)
//! - `rule` - Rule records, color specs, entity categories, catalogue loading

mod pattern;
mod rule;

pub use pattern::NamePattern;
pub use rule::{Catalogue, ColorSpec, CompiledRule, EntityCategory, Requirement, Rule};

//! Rule catalogue records
//!
//! A catalogue is an ordered list of naming/color/type requirements loaded
//! from an external JSON document. Record fields follow the master-rules
//! format: `Layer Name`, `Color Code`, `Type`, `Requirement`, `Feature`.
//! Catalogue order matters: when several rules match the same layer name, the
//! color gate accepts the first satisfying rule in catalogue order.

use super::pattern::NamePattern;
use anyhow::{bail, Context};
use serde_json::Value;

/// How a rule's color requirement is expressed
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// A single plain color code
    Exact(i32),
    /// Any of several plain color codes
    CodeList(Vec<i32>),
    /// An explicit RGB triple, matched against the packed 24-bit true color
    Rgb(u8, u8, u8),
    /// No color constraint
    Any,
    /// Color must belong to the occupancy color domain derived from
    /// BLK_n_FLR_n_BLT_UP_AREA layers
    DerivedFromOccupancy,
}

impl ColorSpec {
    /// Parse the catalogue's `Color Code` string encoding.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let trimmed = raw.trim();
        match trimmed {
            "Any" | "ANY" | "NA" | "N/A" => return Ok(ColorSpec::Any),
            "As per Sub-Occupancy" | "As per sub-occupancy type" => {
                return Ok(ColorSpec::DerivedFromOccupancy)
            }
            _ => {}
        }

        if let Some(rest) = trimmed.strip_prefix("RGB") {
            let parts: Vec<&str> = rest.split(',').map(|p| p.trim()).collect();
            if parts.len() != 3 {
                bail!("RGB color spec '{trimmed}' must have exactly 3 components");
            }
            let mut rgb = [0u8; 3];
            for (i, part) in parts.iter().enumerate() {
                rgb[i] = part
                    .parse::<u8>()
                    .with_context(|| format!("invalid RGB component '{part}' in '{trimmed}'"))?;
            }
            return Ok(ColorSpec::Rgb(rgb[0], rgb[1], rgb[2]));
        }

        // Comma-separated code list; each part contributes its first digit
        // run so parenthetical annotations like "1 (M)" are tolerated
        let mut codes = Vec::new();
        for part in trimmed.split(',') {
            if let Some(code) = first_digit_run(part) {
                codes.push(code);
            }
        }
        match codes.len() {
            0 => bail!("unparseable color spec '{trimmed}'"),
            1 => Ok(ColorSpec::Exact(codes[0])),
            _ => Ok(ColorSpec::CodeList(codes)),
        }
    }

    /// Pack an RGB triple into the 24-bit true-color integer form
    pub fn pack_rgb(r: u8, g: u8, b: u8) -> i32 {
        ((r as i32) << 16) | ((g as i32) << 8) | (b as i32)
    }
}

/// First run of ASCII digits in a string, parsed as an integer
fn first_digit_run(s: &str) -> Option<i32> {
    let bytes = s.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map(|off| start + off)
        .unwrap_or(bytes.len());
    s[start..end].parse().ok()
}

/// Entity category a rule constrains its layer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCategory {
    Polygon,
    Line,
    Text,
    Dimension,
    /// No entity-kind constraint (unknown or absent `Type` label)
    Unconstrained,
}

impl EntityCategory {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Polygon" => EntityCategory::Polygon,
            "Line" => EntityCategory::Line,
            "Text" => EntityCategory::Text,
            "Dimension" => EntityCategory::Dimension,
            _ => EntityCategory::Unconstrained,
        }
    }

    /// Acceptable concrete entity kinds for this category
    pub fn allowed_kinds(&self) -> &'static [&'static str] {
        match self {
            EntityCategory::Polygon => &["LWPOLYLINE", "POLYLINE", "HATCH", "MPOLYGON"],
            EntityCategory::Line => &["LINE", "LWPOLYLINE", "POLYLINE"],
            EntityCategory::Text => &["TEXT", "MTEXT"],
            EntityCategory::Dimension => &["DIMENSION", "ARC_DIMENSION", "LEADER", "MLEADER"],
            EntityCategory::Unconstrained => &[],
        }
    }

    /// Whether an entity kind is acceptable under this category.
    /// `Unconstrained` accepts everything.
    pub fn allows_kind(&self, kind: &str) -> bool {
        match self {
            EntityCategory::Unconstrained => true,
            _ => self.allowed_kinds().contains(&kind),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityCategory::Polygon => "Polygon",
            EntityCategory::Line => "Line",
            EntityCategory::Text => "Text",
            EntityCategory::Dimension => "Dimension",
            EntityCategory::Unconstrained => "Any",
        }
    }
}

/// Whether a rule's layer must exist in the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Mandatory,
    Optional,
}

impl Requirement {
    /// The catalogue flags a rule mandatory when the lowercase `Requirement`
    /// field starts with "mandatory"
    pub fn from_label(label: &str) -> Self {
        if label.trim().to_lowercase().starts_with("mandatory") {
            Requirement::Mandatory
        } else {
            Requirement::Optional
        }
    }
}

/// One catalogue rule. Identity is the `name_template` text.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name_template: String,
    pub color_spec: ColorSpec,
    pub category: EntityCategory,
    pub requirement: Requirement,
    /// Free-text feature label used in messages
    pub feature_label: String,
}

/// A rule with its compiled name matcher
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    pub pattern: NamePattern,
}

/// Ordered, compiled rule catalogue
#[derive(Debug, Clone)]
pub struct Catalogue {
    rules: Vec<CompiledRule>,
}

impl Catalogue {
    /// Compile a catalogue from already-constructed rules
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let pattern = NamePattern::compile(&rule.name_template);
                CompiledRule { rule, pattern }
            })
            .collect();
        Self { rules }
    }

    /// Build a catalogue from an already-loaded master-rules JSON document
    /// (an array of rule records). A record missing `Layer Name` or carrying
    /// an unparseable `Color Code` aborts the load; validation cannot
    /// proceed safely on a partial catalogue.
    pub fn from_json(value: &Value) -> anyhow::Result<Self> {
        let records = value
            .as_array()
            .context("master rules document must be a JSON array")?;

        let mut rules = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let obj = record
                .as_object()
                .with_context(|| format!("rule record {idx} is not a JSON object"))?;

            let name_template = obj
                .get("Layer Name")
                .and_then(Value::as_str)
                .with_context(|| format!("rule record {idx} is missing 'Layer Name'"))?
                .to_string();

            let color_raw = match obj.get("Color Code") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => "Any".to_string(),
            };
            let color_spec = ColorSpec::parse(&color_raw)
                .with_context(|| format!("rule '{name_template}'"))?;

            let category = obj
                .get("Type")
                .and_then(Value::as_str)
                .map(EntityCategory::from_label)
                .unwrap_or(EntityCategory::Unconstrained);

            let requirement = obj
                .get("Requirement")
                .and_then(Value::as_str)
                .map(Requirement::from_label)
                .unwrap_or(Requirement::Optional);

            let feature_label = obj
                .get("Feature")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string();

            rules.push(Rule {
                name_template,
                color_spec,
                category,
                requirement,
                feature_label,
            });
        }

        Ok(Self::from_rules(rules))
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// All rules whose compiled pattern matches a concrete layer name, in
    /// catalogue order. Overlapping matches are expected, not an error.
    pub fn candidates(&self, layer_name: &str) -> Vec<&CompiledRule> {
        self.rules
            .iter()
            .filter(|cr| cr.pattern.matches(layer_name))
            .collect()
    }

    /// Mandatory rules in catalogue order
    pub fn mandatory_rules(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules
            .iter()
            .filter(|cr| cr.rule.requirement == Requirement::Mandatory)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

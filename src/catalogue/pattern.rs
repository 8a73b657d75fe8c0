//! Layer-name template compiler
//!
//! Rule catalogues write layer names as templates containing the numeric
//! placeholder token `n` (e.g. `BLK_n_FLR_n_BLT_UP_AREA`, `STAIR_n`,
//! `CAPACITY_L=n`). A template is tokenized once into literal and placeholder
//! segments and then matched against concrete layer names without any regex
//! machinery. `n` is only a placeholder when it stands alone between segment
//! boundaries, so names like "Green" or "Open" can never be mistaken for
//! templates.

/// One segment of a compiled template
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Literal text that must match exactly (case-sensitive)
    Literal(String),
    /// An optionally-signed integer literal (`-?[0-9]+`)
    Number,
}

/// A compiled layer-name matcher
#[derive(Debug, Clone)]
pub struct NamePattern {
    segments: Vec<Segment>,
}

impl NamePattern {
    /// Compile a template. A `n` character is treated as a placeholder iff it
    /// is preceded by the start of the template, `_`, or `=`, and followed by
    /// `_` or the end. Templates with no placeholder require an exact match.
    pub fn compile(template: &str) -> Self {
        let chars: Vec<char> = template.chars().collect();
        let mut segments = Vec::new();
        let mut literal = String::new();

        for (i, &c) in chars.iter().enumerate() {
            let boundary_before = i == 0 || matches!(chars[i - 1], '_' | '=');
            let boundary_after = i + 1 == chars.len() || chars[i + 1] == '_';
            if c == 'n' && boundary_before && boundary_after {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Number);
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// True when the template contains at least one numeric placeholder
    pub fn has_placeholder(&self) -> bool {
        self.segments.iter().any(|s| *s == Segment::Number)
    }

    /// Match a concrete layer name against the compiled template.
    ///
    /// Placeholders consume a maximal run of digits (with an optional leading
    /// minus sign); since digits never appear inside a placeholder's
    /// delimiting literals, greedy consumption is unambiguous.
    pub fn matches(&self, name: &str) -> bool {
        let bytes = name.as_bytes();
        let mut pos = 0usize;

        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => {
                    if !name[pos..].starts_with(lit.as_str()) {
                        return false;
                    }
                    pos += lit.len();
                }
                Segment::Number => {
                    if pos < bytes.len() && bytes[pos] == b'-' {
                        pos += 1;
                    }
                    let digit_start = pos;
                    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                        pos += 1;
                    }
                    if pos == digit_start {
                        return false;
                    }
                }
            }
        }

        pos == name.len()
    }
}

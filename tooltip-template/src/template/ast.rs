//! AST types for tooltip templates

use serde::{Deserialize, Serialize};

/// A parsed template containing literal text and placeholders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// The segments of the template (literals and placeholders)
    pub segments: Vec<Segment>,
    /// The original template string (for display/debugging)
    #[serde(default)]
    pub source: String,
}

impl Template {
    /// Create a new template
    pub fn new(segments: Vec<Segment>, source: String) -> Self {
        Self { segments, source }
    }

    /// Create a template with just a literal string (no placeholders)
    pub fn literal(s: impl Into<String>) -> Self {
        let s = s.into();
        Self {
            segments: vec![Segment::Literal(s.clone())],
            source: s,
        }
    }

    /// Get all column names referenced by field placeholders
    ///
    /// Rendering layers use this to know which columns a template needs
    /// before fetching data.
    pub fn field_names(&self) -> Vec<&str> {
        self.names(PlaceholderKind::Field)
    }

    /// Get all special variable names referenced in this template
    pub fn special_var_names(&self) -> Vec<&str> {
        self.names(PlaceholderKind::SpecialVar)
    }

    fn names(&self, kind: PlaceholderKind) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(p) if p.kind == kind => Some(p.name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// A part of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Literal text, preserved byte-for-byte
    Literal(String),
    /// A reference to substitute
    Placeholder(Placeholder),
}

/// A single `@name{format}` or `$name{format}` reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub name: String,
    /// Text inside the `{...}` block following the name, if any
    pub format: Option<String>,
}

/// What a placeholder resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceholderKind {
    /// `@name`: a column in the data source at the current row
    Field,
    /// `$name`: a caller-supplied special variable
    SpecialVar,
}

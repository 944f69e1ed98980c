//! Placeholder resolution and assembly

use std::collections::HashMap;

use crate::escape::escape_html;
use crate::format::{FieldFormatter, FormatConfig, FormatterError, format_value};
use crate::source::ColumnSource;
use crate::value::Value;

use super::ast::{PlaceholderKind, Segment, Template};
use super::parser::parse_template;

/// Interpolate a template against a data source at `row`
///
/// Formatting uses the default configuration (UTC datetimes). The call
/// fails only on formatter errors; unknown references render as `???`.
pub fn interpolate(
    template: &str,
    source: &dyn ColumnSource,
    row: usize,
    formatters: &HashMap<String, FieldFormatter>,
    special_vars: &HashMap<String, String>,
) -> Result<String, FormatterError> {
    interpolate_with(
        &FormatConfig::default(),
        template,
        source,
        row,
        formatters,
        special_vars,
    )
}

/// Interpolate with an explicit formatting configuration
pub fn interpolate_with(
    config: &FormatConfig,
    template: &str,
    source: &dyn ColumnSource,
    row: usize,
    formatters: &HashMap<String, FieldFormatter>,
    special_vars: &HashMap<String, String>,
) -> Result<String, FormatterError> {
    render(
        &parse_template(template),
        config,
        source,
        row,
        formatters,
        special_vars,
    )
}

/// Render a pre-parsed template
///
/// Parse once with [`parse_template`] and call this per row when the same
/// template is rendered for many rows.
pub fn render(
    template: &Template,
    config: &FormatConfig,
    source: &dyn ColumnSource,
    row: usize,
    formatters: &HashMap<String, FieldFormatter>,
    special_vars: &HashMap<String, String>,
) -> Result<String, FormatterError> {
    let mut out = String::new();

    for segment in &template.segments {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Placeholder(p) => {
                let resolved = resolve(p.kind, &p.name, source, row, special_vars);
                if resolved.is_none() {
                    log::debug!("unresolved {:?} reference '{}' at row {}", p.kind, p.name, row);
                }
                let formatted = format_value(
                    config,
                    resolved,
                    &p.name,
                    p.format.as_deref(),
                    formatters,
                    special_vars,
                )?;
                if formatted.safe {
                    out.push_str(&formatted.text);
                } else {
                    out.push_str(&escape_html(&formatted.text));
                }
            }
        }
    }

    Ok(out)
}

/// Look up a placeholder's raw value; `None` means missing
fn resolve(
    kind: PlaceholderKind,
    name: &str,
    source: &dyn ColumnSource,
    row: usize,
    special_vars: &HashMap<String, String>,
) -> Option<Value> {
    match kind {
        // A stored null cell counts as missing, same as an absent column
        PlaceholderKind::Field => source.get(name, row).filter(|v| !v.is_null()),
        PlaceholderKind::SpecialVar => special_vars.get(name).map(|s| Value::String(s.clone())),
    }
}

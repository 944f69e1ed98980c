//! Formatter dispatch for placeholder values

pub mod datetime;
pub mod numeral;
pub mod printf;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

pub use datetime::Timezone;

/// Format spec keyword that bypasses HTML escaping
const SAFE: &str = "safe";

/// Error from formatting operations
///
/// Any formatter failure aborts the whole interpolation call; there is no
/// partial output.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterError {
    /// Name of the field or special variable being formatted
    pub field: String,
    pub message: String,
}

impl FormatterError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FormatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FormatterError {}

/// Custom formatting capability supplied by the caller
///
/// Receives the raw value, the format spec (if any) and the call's special
/// variables. The returned string is escaped like any other non-`safe`
/// result; only the `safe` keyword bypasses escaping.
pub trait CustomFormatter: Send + Sync {
    fn format(
        &self,
        value: &Value,
        format: Option<&str>,
        special_vars: &HashMap<String, String>,
    ) -> String;
}

/// Per-field formatter selection: a named backend or a custom capability
#[derive(Clone)]
pub enum FieldFormatter {
    /// A backend tag: `"numeral"`, `"datetime"` or `"printf"`
    ///
    /// Any other tag fails the interpolation with [`FormatterError`].
    Tag(String),
    /// Caller-supplied formatting code
    Custom(Arc<dyn CustomFormatter>),
}

impl FieldFormatter {
    /// Shorthand for a backend tag
    pub fn tag(name: impl Into<String>) -> Self {
        FieldFormatter::Tag(name.into())
    }

    /// Wrap a custom formatter
    pub fn custom(formatter: impl CustomFormatter + 'static) -> Self {
        FieldFormatter::Custom(Arc::new(formatter))
    }
}

impl fmt::Debug for FieldFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldFormatter::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            FieldFormatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Configuration for formatter dispatch
///
/// Supplied per call; the engine holds no global formatter state.
#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    /// Timezone used by the datetime backend
    pub timezone: Timezone,
}

/// Formatted placeholder text plus its escaping state
///
/// `safe` text is inserted verbatim by the assembler; everything else is
/// HTML-escaped first.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatted {
    pub text: String,
    pub safe: bool,
}

impl Formatted {
    fn safe(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            safe: true,
        }
    }

    fn needs_escape(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            safe: false,
        }
    }
}

/// Select and invoke a formatter for a resolved placeholder value
///
/// `resolved` is `None` for missing references, which render as the plain
/// `???` sentinel. Dispatch order: missing sentinel, the `safe` keyword,
/// the field's entry in `formatters` (custom capability or backend tag),
/// then the default (numeral for numeric values with a spec, plain string
/// conversion otherwise).
pub fn format_value(
    config: &FormatConfig,
    resolved: Option<Value>,
    name: &str,
    format: Option<&str>,
    formatters: &HashMap<String, FieldFormatter>,
    special_vars: &HashMap<String, String>,
) -> Result<Formatted, FormatterError> {
    let Some(value) = resolved else {
        return Ok(Formatted::safe("???"));
    };

    if format == Some(SAFE) {
        return Ok(Formatted::safe(value.to_string()));
    }

    match formatters.get(name) {
        Some(FieldFormatter::Custom(custom)) => Ok(Formatted::needs_escape(
            custom.format(&value, format, special_vars),
        )),
        Some(FieldFormatter::Tag(tag)) => {
            let text = match tag.as_str() {
                "numeral" => numeral::format(&value, format),
                "datetime" => datetime::format(&value, format, &config.timezone),
                "printf" => printf::format(&value, format),
                other => Err(format!("unknown formatter '{}'", other)),
            }
            .map_err(|message| {
                log::debug!("formatter '{}' failed for '{}': {}", tag, name, message);
                FormatterError::new(name, message)
            })?;
            Ok(Formatted::needs_escape(text))
        }
        // No formatter for this name: numeral handles numeric values that
        // carry a spec, everything else is the default string conversion
        None => match format {
            Some(spec) if value.as_float().is_some() => numeral::format(&value, Some(spec))
                .map(Formatted::needs_escape)
                .map_err(|message| FormatterError::new(name, message)),
            _ => Ok(Formatted::needs_escape(value.to_string())),
        },
    }
}

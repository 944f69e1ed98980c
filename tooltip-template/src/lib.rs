//! Template-string interpolation and formatting for tooltips and labels
//!
//! Resolves `@column` and `$variable` references against a row of tabular
//! data, formats each value through a pluggable backend (numeral-style
//! numbers, strftime datetimes, printf conversions, or caller-supplied
//! code) and HTML-escapes the result unless a placeholder opts out with
//! `{safe}`. Unknown references render as `???` rather than failing the
//! call.
//!
//! ```
//! use std::collections::HashMap;
//! use serde_json::json;
//! use tooltip_template::{ColumnData, interpolate};
//!
//! let source = ColumnData::from_json(&json!({"price": [1234.5]}));
//! let s = interpolate("@price{0,0.00}", &source, 0, &HashMap::new(), &HashMap::new()).unwrap();
//! assert_eq!(s, "1,234.50");
//! ```
//!
//! The engine is stateless: every call is a pure function of the template,
//! the data source, the row index, the formatter map and the special
//! variables, so it can be driven from multiple threads without
//! coordination.

pub mod escape;
pub mod format;
pub mod source;
pub mod template;
pub mod value;

pub use escape::escape_html;
pub use format::{
    CustomFormatter, FieldFormatter, FormatConfig, Formatted, FormatterError, Timezone,
};
pub use source::{ColumnData, ColumnSource};
pub use template::{
    Placeholder, PlaceholderKind, Segment, Template, interpolate, interpolate_with, parse_template,
    render,
};
pub use value::Value;

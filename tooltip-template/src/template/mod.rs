//! Tooltip template parsing and interpolation
//!
//! Supports:
//! - Field references: `@column`, `@{column with spaces}`
//! - Special variables: `$name`
//! - Format specs: `@price{(0.00 %)}`, `@when{%F %T}`, `@id{%x}`
//! - `{safe}` to insert a raw value without HTML escaping

mod ast;
mod interp;
mod parser;

pub use ast::{Placeholder, PlaceholderKind, Segment, Template};
pub use interp::{interpolate, interpolate_with, render};
pub use parser::parse_template;

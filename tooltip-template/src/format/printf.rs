//! C-style conversion formatting for the `printf` backend
//!
//! Supports literal text around `%` directives with flags `-+0#`, width,
//! precision and the conversions `d i f e x X o b s %`. A numeric
//! conversion applied to a non-numeric value passes the stringified value
//! through unchanged instead of failing the render.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::value::Value;

/// A single parsed `%` conversion
#[derive(Debug, Clone, Default)]
struct Directive {
    left_align: bool,
    sign_plus: bool,
    zero_pad: bool,
    alt: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

/// Render a value with a printf-style spec
///
/// Without a spec this is the default string conversion.
pub fn format(value: &Value, spec: Option<&str>) -> Result<String, String> {
    let Some(spec) = spec else {
        return Ok(value.to_string());
    };

    let mut out = String::new();
    let mut chars = spec.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        if let Some(&(_, '%')) = chars.peek() {
            chars.next();
            out.push('%');
            continue;
        }
        let directive = parse_directive(spec, pos, &mut chars)?;
        out.push_str(&apply(&directive, value)?);
    }

    Ok(out)
}

fn parse_directive(
    spec: &str,
    start: usize,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<Directive, String> {
    let mut directive = Directive::default();

    // Flags (the space flag is accepted and ignored)
    while let Some(&(_, c)) = chars.peek() {
        match c {
            '-' => directive.left_align = true,
            '+' => directive.sign_plus = true,
            '0' => directive.zero_pad = true,
            '#' => directive.alt = true,
            ' ' => {}
            _ => break,
        }
        chars.next();
    }

    // Width
    let mut width = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_digit() {
            width.push(c);
            chars.next();
        } else {
            break;
        }
    }
    if !width.is_empty() {
        directive.width = width.parse().ok();
    }

    // Precision
    if let Some(&(_, '.')) = chars.peek() {
        chars.next();
        let mut precision = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_ascii_digit() {
                precision.push(c);
                chars.next();
            } else {
                break;
            }
        }
        directive.precision = Some(precision.parse().unwrap_or(0));
    }

    let Some((_, conversion)) = chars.next() else {
        return Err(format!(
            "incomplete conversion at byte {} in '{}'",
            start, spec
        ));
    };
    directive.conversion = conversion;

    Ok(directive)
}

/// Integer view for the integral conversions, truncating floats
fn int_value(value: &Value) -> Option<i64> {
    value.as_float().map(|n| n.trunc() as i64)
}

fn apply(directive: &Directive, value: &Value) -> Result<String, String> {
    let body = match directive.conversion {
        's' => value.to_string(),
        'd' | 'i' => match int_value(value) {
            Some(i) => {
                if directive.sign_plus && i >= 0 {
                    format!("+{}", i)
                } else {
                    i.to_string()
                }
            }
            None => return Ok(value.to_string()),
        },
        'f' => match value.as_float() {
            Some(n) => {
                let precision = directive.precision.unwrap_or(6);
                let s = format!("{:.prec$}", n, prec = precision);
                if directive.sign_plus && n >= 0.0 {
                    format!("+{}", s)
                } else {
                    s
                }
            }
            None => return Ok(value.to_string()),
        },
        'e' => match value.as_float() {
            Some(n) => {
                let precision = directive.precision.unwrap_or(6);
                format!("{:.prec$e}", n, prec = precision)
            }
            None => return Ok(value.to_string()),
        },
        'x' => match int_value(value) {
            Some(i) if directive.alt => format!("0x{:x}", i),
            Some(i) => format!("{:x}", i),
            None => return Ok(value.to_string()),
        },
        'X' => match int_value(value) {
            Some(i) if directive.alt => format!("0X{:X}", i),
            Some(i) => format!("{:X}", i),
            None => return Ok(value.to_string()),
        },
        'o' => match int_value(value) {
            Some(i) if directive.alt => format!("0{:o}", i),
            Some(i) => format!("{:o}", i),
            None => return Ok(value.to_string()),
        },
        'b' => match int_value(value) {
            Some(i) => format!("{:b}", i),
            None => return Ok(value.to_string()),
        },
        other => return Err(format!("unsupported conversion '%{}'", other)),
    };

    Ok(pad(body, directive))
}

fn pad(body: String, directive: &Directive) -> String {
    let Some(width) = directive.width else {
        return body;
    };
    if body.len() >= width {
        return body;
    }
    let fill = width - body.len();

    if directive.left_align {
        format!("{}{}", body, " ".repeat(fill))
    } else if directive.zero_pad {
        // Keep any sign ahead of the zeros
        if let Some(rest) = body.strip_prefix('-') {
            format!("-{}{}", "0".repeat(fill), rest)
        } else if let Some(rest) = body.strip_prefix('+') {
            format!("+{}{}", "0".repeat(fill), rest)
        } else {
            format!("{}{}", "0".repeat(fill), body)
        }
    } else {
        format!("{}{}", " ".repeat(fill), body)
    }
}

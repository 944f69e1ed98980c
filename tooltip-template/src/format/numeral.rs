//! Numeral-style numeric pattern formatting
//!
//! Implements the pattern subset tooltip templates actually use:
//! `0,0.00`, `$0,0.00`, `(0.000 %)`, `0.0[00]`. Parentheses render
//! negative values in parens, `%` multiplies the value by 100 and keeps
//! the pattern's spacing before the sign.

use crate::value::Value;

/// Parsed display pattern
#[derive(Debug, Clone, Default, PartialEq)]
struct Pattern {
    /// Negative values in parentheses instead of a minus sign
    paren_negatives: bool,
    /// Currency prefix with its spacing, e.g. `"$ "`
    currency: Option<String>,
    /// Thousands grouping
    thousands_sep: bool,
    /// Forced decimal places
    precision: usize,
    /// Additional `[00]` decimal places, trimmed when zero
    optional_precision: usize,
    /// Percent suffix with its spacing, e.g. `" %"`
    percent: Option<String>,
}

/// Render a numeric value with a numeral-style pattern
///
/// Without a spec this is the default string conversion. Non-numeric
/// values are an error.
pub fn format(value: &Value, spec: Option<&str>) -> Result<String, String> {
    let Some(n) = value.as_float() else {
        return Err(format!(
            "numeral formatter expects a numeric value, got {}",
            value.type_name()
        ));
    };

    let Some(spec) = spec else {
        return Ok(value.to_string());
    };

    let pattern = parse_pattern(spec)?;
    Ok(render(n, &pattern))
}

fn parse_pattern(spec: &str) -> Result<Pattern, String> {
    let mut pattern = Pattern::default();
    let mut rest = spec;

    if let Some(inner) = rest.strip_prefix('(') {
        let Some(inner) = inner.strip_suffix(')') else {
            return Err(format!("unbalanced parentheses in pattern '{}'", spec));
        };
        pattern.paren_negatives = true;
        rest = inner;
    }

    if let Some(stripped) = rest.strip_prefix('$') {
        let spaces = stripped.len() - stripped.trim_start().len();
        pattern.currency = Some(format!("${}", &stripped[..spaces]));
        rest = &stripped[spaces..];
    }

    if let Some(stripped) = rest.strip_suffix('%') {
        let trimmed = stripped.trim_end();
        pattern.percent = Some(format!("{}%", &stripped[trimmed.len()..]));
        rest = trimmed;
    }

    let (int_part, dec_part) = match rest.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (rest, None),
    };

    if !int_part.chars().all(|c| matches!(c, '0' | '#' | ',')) {
        return Err(format!("unrecognized numeral pattern '{}'", spec));
    }
    pattern.thousands_sep = int_part.contains(',');

    if let Some(dec) = dec_part {
        // Forced zeros, then an optional [0...] group
        let forced = dec.chars().take_while(|c| *c == '0').count();
        let tail = &dec[forced..];
        let optional = match tail.strip_prefix('[') {
            Some(inner) => {
                let Some(zeros) = inner.strip_suffix(']') else {
                    return Err(format!("unrecognized numeral pattern '{}'", spec));
                };
                if zeros.is_empty() || !zeros.chars().all(|c| c == '0') {
                    return Err(format!("unrecognized numeral pattern '{}'", spec));
                }
                zeros.len()
            }
            None if tail.is_empty() => 0,
            None => return Err(format!("unrecognized numeral pattern '{}'", spec)),
        };
        pattern.precision = forced;
        pattern.optional_precision = optional;
    }

    Ok(pattern)
}

fn render(n: f64, pattern: &Pattern) -> String {
    let mut n = n;
    if pattern.percent.is_some() {
        n *= 100.0;
    }

    let negative = n < 0.0;
    let magnitude = n.abs();

    let max_precision = pattern.precision + pattern.optional_precision;
    let mut digits = format!("{:.prec$}", magnitude, prec = max_precision);

    if pattern.optional_precision > 0 {
        if let Some(dot) = digits.find('.') {
            // Trim optional zeros, never below the forced precision
            let min_keep = if pattern.precision == 0 {
                dot + 1
            } else {
                dot + 1 + pattern.precision
            };
            let mut keep = digits.len();
            while keep > min_keep && digits.as_bytes()[keep - 1] == b'0' {
                keep -= 1;
            }
            if keep == dot + 1 {
                keep = dot;
            }
            digits.truncate(keep);
        }
    }

    if pattern.thousands_sep {
        digits = add_thousands_sep(&digits);
    }

    let mut out = String::new();
    if let Some(currency) = &pattern.currency {
        out.push_str(currency);
    }
    out.push_str(&digits);
    if let Some(percent) = &pattern.percent {
        out.push_str(percent);
    }

    if negative {
        if pattern.paren_negatives {
            format!("({})", out)
        } else {
            format!("-{}", out)
        }
    } else {
        out
    }
}

/// Add thousands separator to a non-negative number string
fn add_thousands_sep(s: &str) -> String {
    let (int_part, dec_part) = match s.find('.') {
        Some(pos) => (&s[..pos], Some(&s[pos..])),
        None => (s, None),
    };

    let mut result = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let int_with_sep: String = result.chars().rev().collect();

    format!("{}{}", int_with_sep, dec_part.unwrap_or(""))
}

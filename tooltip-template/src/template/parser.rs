//! Scanner for tooltip templates

use super::ast::{Placeholder, PlaceholderKind, Segment, Template};

/// Parse a template string into literal and placeholder segments
///
/// Scanning never fails: a bare `@` or `$`, an empty `@{}`, and an
/// unterminated `{` block all stay literal text.
pub fn parse_template(input: &str) -> Template {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '@' && ch != '$' {
            literal.push(ch);
            continue;
        }

        match scan_placeholder(input, pos, ch) {
            Some((placeholder, end)) => {
                // Save any accumulated literal
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(placeholder));

                // Skip past the scanned placeholder
                while let Some(&(i, _)) = chars.peek() {
                    if i < end {
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
            // Not a placeholder after all, the sigil is literal text
            None => literal.push(ch),
        }
    }

    // Don't forget trailing literal
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Template::new(segments, input.to_string())
}

/// Try to scan a placeholder whose sigil sits at byte offset `pos`
///
/// Returns the placeholder and the byte offset just past it, or `None`
/// when no well-formed placeholder starts here.
fn scan_placeholder(input: &str, pos: usize, sigil: char) -> Option<(Placeholder, usize)> {
    let kind = match sigil {
        '@' => PlaceholderKind::Field,
        _ => PlaceholderKind::SpecialVar,
    };

    let after_sigil = pos + sigil.len_utf8();
    let rest = &input[after_sigil..];

    let (name, name_end) = if kind == PlaceholderKind::Field && rest.starts_with('{') {
        // Braced field name: `@{anything but braces}`, for column names
        // containing spaces or punctuation
        let inner = &rest[1..];
        let close = inner.find('}')?;
        let name = &inner[..close];
        if name.is_empty() || name.contains('{') {
            return None;
        }
        (name.to_string(), after_sigil + 1 + close + 1)
    } else {
        // Plain identifier: letters, digits, underscore
        let len: usize = rest
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .map(|c| c.len_utf8())
            .sum();
        if len == 0 {
            return None;
        }
        (rest[..len].to_string(), after_sigil + len)
    };

    // Optional format spec, only when the braces immediately follow the
    // name, are non-empty, and close before any nested `{`
    let mut end = name_end;
    let mut format = None;
    if let Some(inner) = input[name_end..].strip_prefix('{') {
        if let Some(close) = inner.find('}') {
            let spec = &inner[..close];
            if !spec.is_empty() && !spec.contains('{') {
                format = Some(spec.to_string());
                end = name_end + 1 + close + 1;
            }
        }
    }

    Some((Placeholder { kind, name, format }, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(template: &Template, index: usize) -> &Placeholder {
        match &template.segments[index] {
            Segment::Placeholder(p) => p,
            other => panic!("expected placeholder at segment {}, got {:?}", index, other),
        }
    }

    #[test]
    fn test_parse_literal_only() {
        let template = parse_template("Hello, World!");
        assert_eq!(template.segments.len(), 1);
        assert_eq!(
            template.segments[0],
            Segment::Literal("Hello, World!".to_string())
        );
    }

    #[test]
    fn test_parse_empty_template() {
        let template = parse_template("");
        assert!(template.segments.is_empty());
        assert_eq!(template.to_string(), "");
    }

    #[test]
    fn test_parse_simple_field() {
        let template = parse_template("@foo");
        assert_eq!(template.segments.len(), 1);
        let p = placeholder(&template, 0);
        assert_eq!(p.kind, PlaceholderKind::Field);
        assert_eq!(p.name, "foo");
        assert_eq!(p.format, None);
    }

    #[test]
    fn test_parse_special_var() {
        let template = parse_template("$index");
        let p = placeholder(&template, 0);
        assert_eq!(p.kind, PlaceholderKind::SpecialVar);
        assert_eq!(p.name, "index");
    }

    #[test]
    fn test_parse_mixed_literal_and_placeholders() {
        let template = parse_template("x: @x, y: @y");
        assert_eq!(template.segments.len(), 4);
        assert_eq!(template.segments[0], Segment::Literal("x: ".to_string()));
        assert_eq!(placeholder(&template, 1).name, "x");
        assert_eq!(template.segments[2], Segment::Literal(", y: ".to_string()));
        assert_eq!(placeholder(&template, 3).name, "y");
    }

    #[test]
    fn test_parse_format_spec() {
        let template = parse_template("@price{(0.000 %)}");
        let p = placeholder(&template, 0);
        assert_eq!(p.name, "price");
        assert_eq!(p.format.as_deref(), Some("(0.000 %)"));
    }

    #[test]
    fn test_parse_braced_field_name() {
        let template = parse_template("@{adjusted close}");
        let p = placeholder(&template, 0);
        assert_eq!(p.kind, PlaceholderKind::Field);
        assert_eq!(p.name, "adjusted close");
    }

    #[test]
    fn test_parse_braced_name_with_format() {
        let template = parse_template("@{adjusted close}{0,0.00}");
        let p = placeholder(&template, 0);
        assert_eq!(p.name, "adjusted close");
        assert_eq!(p.format.as_deref(), Some("0,0.00"));
    }

    #[test]
    fn test_name_stops_at_punctuation() {
        let template = parse_template("(@x, @y)");
        assert_eq!(template.segments.len(), 5);
        assert_eq!(template.segments[0], Segment::Literal("(".to_string()));
        assert_eq!(placeholder(&template, 1).name, "x");
        assert_eq!(template.segments[2], Segment::Literal(", ".to_string()));
        assert_eq!(placeholder(&template, 3).name, "y");
        assert_eq!(template.segments[4], Segment::Literal(")".to_string()));
    }

    #[test]
    fn test_bare_sigils_are_literal() {
        let template = parse_template("100% @ the $ sign");
        assert_eq!(template.segments.len(), 1);
        assert_eq!(
            template.segments[0],
            Segment::Literal("100% @ the $ sign".to_string())
        );
    }

    #[test]
    fn test_sigil_at_end_is_literal() {
        let template = parse_template("mail me @");
        assert_eq!(
            template.segments,
            vec![Segment::Literal("mail me @".to_string())]
        );
    }

    #[test]
    fn test_dollar_followed_by_digits_is_placeholder() {
        // `$5` scans as a special var named "5"; it resolves to ??? unless
        // the caller supplies it
        let template = parse_template("$5");
        let p = placeholder(&template, 0);
        assert_eq!(p.kind, PlaceholderKind::SpecialVar);
        assert_eq!(p.name, "5");
    }

    #[test]
    fn test_empty_braced_name_is_literal() {
        let template = parse_template("@{}");
        assert_eq!(template.segments, vec![Segment::Literal("@{}".to_string())]);
    }

    #[test]
    fn test_empty_format_block_is_literal() {
        let template = parse_template("@foo{}");
        assert_eq!(template.segments.len(), 2);
        assert_eq!(placeholder(&template, 0).format, None);
        assert_eq!(template.segments[1], Segment::Literal("{}".to_string()));
    }

    #[test]
    fn test_unterminated_format_block_is_literal() {
        let template = parse_template("@foo{0.00");
        assert_eq!(template.segments.len(), 2);
        let p = placeholder(&template, 0);
        assert_eq!(p.name, "foo");
        assert_eq!(p.format, None);
        assert_eq!(template.segments[1], Segment::Literal("{0.00".to_string()));
    }

    #[test]
    fn test_unterminated_braced_name_is_literal() {
        let template = parse_template("@{adjusted close");
        assert_eq!(
            template.segments,
            vec![Segment::Literal("@{adjusted close".to_string())]
        );
    }

    #[test]
    fn test_nested_brace_in_format_is_literal() {
        let template = parse_template("@foo{a{b}");
        assert_eq!(template.segments.len(), 2);
        assert_eq!(placeholder(&template, 0).format, None);
        assert_eq!(template.segments[1], Segment::Literal("{a{b}".to_string()));
    }

    #[test]
    fn test_format_must_immediately_follow_name() {
        let template = parse_template("@foo {safe}");
        assert_eq!(template.segments.len(), 2);
        assert_eq!(placeholder(&template, 0).format, None);
        assert_eq!(template.segments[1], Segment::Literal(" {safe}".to_string()));
    }

    #[test]
    fn test_adjacent_placeholders() {
        let template = parse_template("@a@b$c");
        assert_eq!(template.segments.len(), 3);
        assert_eq!(placeholder(&template, 0).name, "a");
        assert_eq!(placeholder(&template, 1).name, "b");
        assert_eq!(placeholder(&template, 2).name, "c");
    }

    #[test]
    fn test_duplicate_references_stay_separate() {
        let template = parse_template("@foo @foo{0.00}");
        assert_eq!(template.segments.len(), 3);
        assert_eq!(placeholder(&template, 0).format, None);
        assert_eq!(placeholder(&template, 2).format.as_deref(), Some("0.00"));
        assert_eq!(template.field_names(), vec!["foo", "foo"]);
    }

    #[test]
    fn test_source_round_trip() {
        let input = "stuff $foo @foo @foo{(0.000 %)} @baz{%F %T} trailing";
        let template = parse_template(input);
        assert_eq!(template.source, input);
        assert_eq!(template.to_string(), input);
    }
}

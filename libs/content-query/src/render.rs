//! Serializer for the content query language.
//!
//! Every segment owns the whitespace it needs: connectives render as
//! ` AND `/` OR ` and each modifier carries exactly one leading space, so a
//! segment list renders by plain concatenation in call order.

use crate::segment::{Segment, Value};
use std::fmt::{self, Write as _};

/// Escape a literal for a quoted value position.
///
/// Colon separates field and value in the query language, so every `:`
/// becomes `\:`.
#[must_use]
pub fn escape(value: &str) -> String {
    value.replace(':', "\\:")
}

/// Render a single segment.
#[must_use]
pub fn render_segment(segment: &Segment) -> String {
    segment.to_string()
}

/// Render an ordered segment list into query text.
#[must_use]
pub fn render_segments(segments: &[Segment]) -> String {
    Rendered(segments).to_string()
}

/// Display adapter over a segment list.
#[derive(Clone, Copy, Debug)]
pub struct Rendered<'a>(pub &'a [Segment]);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.0 {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

struct Quoted<'a>(&'a Value);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut raw = String::new();
        write!(raw, "{}", self.0)?;
        write!(f, "'{}'", escape(&raw))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Term(text) => f.write_str(text),
            Segment::TypeIs(name) => write!(f, "TypeIs:{name}"),
            Segment::Type(name) => write!(f, "Type:{name}"),
            Segment::InFolder(path) => write!(f, "InFolder:\"{path}\""),
            Segment::InTree(path) => write!(f, "InTree:\"{path}\""),
            Segment::Equals { field, value } => write!(f, "{field}:{}", Quoted(value)),
            Segment::NotEquals { field, value } => write!(f, "NOT({field}:{})", Quoted(value)),
            Segment::Between {
                field,
                from,
                to,
                from_inclusive,
                to_inclusive,
            } => {
                let open = if *from_inclusive { '[' } else { '{' };
                let close = if *to_inclusive { ']' } else { '}' };
                write!(
                    f,
                    "{field}:{open}{} TO {}{close}",
                    Quoted(from),
                    Quoted(to)
                )
            }
            Segment::GreaterThan {
                field,
                value,
                inclusive,
            } => {
                let eq = if *inclusive { "=" } else { "" };
                write!(f, "{field}:>{eq}{}", Quoted(value))
            }
            Segment::LessThan {
                field,
                value,
                inclusive,
            } => {
                let eq = if *inclusive { "=" } else { "" };
                write!(f, "{field}:<{eq}{}", Quoted(value))
            }
            Segment::Group(inner) => write!(f, "({})", Rendered(inner)),
            Segment::Not(inner) => write!(f, "NOT({})", Rendered(inner)),
            Segment::Connective(c) => write!(f, " {} ", c.keyword()),
            Segment::Sort { field, reverse } => {
                let keyword = if *reverse { "REVERSESORT" } else { "SORT" };
                write!(f, " .{keyword}:'{field}'")
            }
            Segment::Top(n) => write!(f, " .TOP:{n}"),
            Segment::Skip(n) => write!(f, " .SKIP:{n}"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::segment::Connective;
    use bigdecimal::BigDecimal;

    fn string(s: &str) -> Value {
        Value::String(s.to_owned())
    }

    #[test]
    fn test_escape_replaces_every_colon() {
        assert_eq!(escape("2017-01-01T00:00:00"), "2017-01-01T00\\:00\\:00");
        assert_eq!(escape("no colon"), "no colon");
    }

    #[test]
    fn test_equals_is_quoted_and_escaped() {
        let segment = Segment::Equals {
            field: "Url".to_owned(),
            value: string("http://x"),
        };
        assert_eq!(render_segment(&segment), "Url:'http\\://x'");
    }

    #[test]
    fn test_between_escapes_each_bound() {
        let segment = Segment::Between {
            field: "Due".to_owned(),
            from: string("a:b"),
            to: string("c:d"),
            from_inclusive: true,
            to_inclusive: false,
        };
        assert_eq!(render_segment(&segment), "Due:['a\\:b' TO 'c\\:d'}");
    }

    #[test]
    fn test_connectives_own_surrounding_spaces() {
        let segments = vec![
            Segment::Term("a".to_owned()),
            Segment::Connective(Connective::Or),
            Segment::Term("b".to_owned()),
        ];
        assert_eq!(render_segments(&segments), "a OR b");
    }

    #[test]
    fn test_modifiers_render_in_call_order() {
        let segments = vec![
            Segment::Skip(10),
            Segment::Top(5),
            Segment::Sort {
                field: "Name".to_owned(),
                reverse: true,
            },
        ];
        assert_eq!(
            render_segments(&segments),
            " .SKIP:10 .TOP:5 .REVERSESORT:'Name'"
        );
    }

    #[test]
    fn test_nested_groups() {
        let inner = vec![
            Segment::Equals {
                field: "Index".to_owned(),
                value: Value::Number(BigDecimal::from(1)),
            },
            Segment::Connective(Connective::And),
            Segment::Not(vec![Segment::TypeIs("Folder".to_owned())]),
        ];
        assert_eq!(
            render_segments(&[Segment::Group(inner)]),
            "(Index:'1' AND NOT(TypeIs:Folder))"
        );
    }

    #[test]
    fn test_empty_sequence_renders_empty() {
        assert_eq!(render_segments(&[]), "");
    }
}

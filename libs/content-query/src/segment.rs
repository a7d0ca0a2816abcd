//! Query segments: the nodes a content query is made of.
//!
//! A built query is an ordered list of [`Segment`]s. Predicates and
//! connectives alternate; sort and paging modifiers trail them. Nested
//! groups carry their own segment list.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::fmt;

/// One renderable fragment of a content query.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// Free text, emitted verbatim.
    Term(String),
    /// `TypeIs:Name`, matches the type and its descendants.
    TypeIs(String),
    /// `Type:Name`, matches the exact type only.
    Type(String),
    InFolder(String),
    InTree(String),
    Equals {
        field: String,
        value: Value,
    },
    NotEquals {
        field: String,
        value: Value,
    },
    Between {
        field: String,
        from: Value,
        to: Value,
        from_inclusive: bool,
        to_inclusive: bool,
    },
    GreaterThan {
        field: String,
        value: Value,
        inclusive: bool,
    },
    LessThan {
        field: String,
        value: Value,
        inclusive: bool,
    },
    /// Parenthesized sub-query.
    Group(Vec<Segment>),
    /// Negated sub-query.
    Not(Vec<Segment>),
    Connective(Connective),
    Sort {
        field: String,
        reverse: bool,
    },
    Top(u64),
    Skip(u64),
}

impl Segment {
    /// Sort and paging segments shape the result set instead of filtering it.
    #[must_use]
    pub fn is_modifier(&self) -> bool {
        matches!(self, Segment::Sort { .. } | Segment::Top(_) | Segment::Skip(_))
    }
}

/// Boolean joiner between two predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }
}

/// A literal compared against a content field.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(BigDecimal),
    String(String),
    /// Rendered in ISO-8601 with millisecond precision and a `Z` suffix.
    DateTime(DateTime<Utc>),
    /// Rendered as `YYYY-MM-DDTHH:MM:SS`, without offset.
    LocalDateTime(NaiveDateTime),
    Date(NaiveDate),
}

/// Unescaped literal text of the value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

//! Fluent content query builder
//!
//! A query alternates between two stages:
//!
//! - [`QueryExpression`]: expects a predicate (`term`, `type_is`, `equals`,
//!   `between`, `query`, `not`, ...). Every predicate returns a
//!   [`QueryOperators`].
//! - [`QueryOperators`]: expects a connective (`and`, `or`) which returns a
//!   [`QueryExpression`] again.
//!
//! Two predicates or two connectives in a row do not type-check, and a query
//! cannot start with a connective. Sort and paging modifiers are available
//! on both stages through [`QuerySegment`] and are rendered in call order.
//!
//! # Example
//!
//! ```rust,ignore
//! use content_query::{QueryExpression, QuerySegment};
//!
//! let query = QueryExpression::new()
//!     .type_is("Task")
//!     .and()
//!     .equals("DisplayName", "Unicorn")
//!     .sort("DisplayName")
//!     .top(5)
//!     .skip(10);
//!
//! assert_eq!(
//!     query.to_string(),
//!     "TypeIs:Task AND DisplayName:'Unicorn' .SORT:'DisplayName' .TOP:5 .SKIP:10"
//! );
//! ```

use crate::content::ContentPath;
use crate::errors::Error;
use crate::render::Rendered;
use crate::schema::{AsFieldName, ContentType, IntoQueryValue};
use crate::segment::{Connective, Segment};
use std::fmt;

/// Accumulated segments plus the first deferred builder error.
#[derive(Clone, Debug, Default, PartialEq)]
struct Chain {
    segments: Vec<Segment>,
    error: Option<Error>,
}

impl Chain {
    fn push(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    fn fail(mut self, error: Option<Error>) -> Self {
        if self.error.is_none() {
            self.error = error;
        }
        self
    }
}

/// Behaviour shared by both builder stages.
pub trait QuerySegment: Sized + fmt::Display {
    /// Segments appended so far, in call order.
    fn segments(&self) -> &[Segment];

    /// First error recorded while building, if any.
    fn error(&self) -> Option<&Error>;

    /// Split into segments and deferred error.
    fn into_parts(self) -> (Vec<Segment>, Option<Error>);

    #[doc(hidden)]
    #[must_use]
    fn push_segment(self, segment: Segment) -> Self;

    /// Append ` .SORT:'field'`.
    #[must_use]
    fn sort(self, field: impl AsFieldName) -> Self {
        self.push_segment(Segment::Sort {
            field: field.as_field_name().to_owned(),
            reverse: false,
        })
    }

    /// Append ` .REVERSESORT:'field'`.
    #[must_use]
    fn reverse_sort(self, field: impl AsFieldName) -> Self {
        self.push_segment(Segment::Sort {
            field: field.as_field_name().to_owned(),
            reverse: true,
        })
    }

    /// Append ` .TOP:n`.
    #[must_use]
    fn top(self, n: u64) -> Self {
        self.push_segment(Segment::Top(n))
    }

    /// Append ` .SKIP:n`.
    #[must_use]
    fn skip(self, n: u64) -> Self {
        self.push_segment(Segment::Skip(n))
    }

    /// Check the query for deferred builder errors.
    ///
    /// # Errors
    /// Returns the first error recorded while building, e.g.
    /// `Error::EmptyPath` from an `in_folder` with an empty path.
    fn validate(&self) -> Result<(), Error> {
        self.error().map_or(Ok(()), |e| Err(e.clone()))
    }
}

/// Builder stage expecting a predicate.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct QueryExpression {
    chain: Chain,
}

/// Builder stage expecting a connective or a modifier.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct QueryOperators {
    chain: Chain,
}

impl QueryExpression {
    /// Start an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    fn then(self, segment: Segment) -> QueryOperators {
        QueryOperators {
            chain: self.chain.push(segment),
        }
    }

    /// Free-text term, emitted verbatim.
    pub fn term(self, text: impl Into<String>) -> QueryOperators {
        self.then(Segment::Term(text.into()))
    }

    /// `TypeIs:Name`: the content type or any of its descendants.
    pub fn type_is(self, type_name: impl Into<String>) -> QueryOperators {
        self.then(Segment::TypeIs(type_name.into()))
    }

    pub fn type_is_of<C: ContentType>(self) -> QueryOperators {
        self.type_is(C::NAME)
    }

    /// `Type:Name`: exactly this content type.
    pub fn exact_type(self, type_name: impl Into<String>) -> QueryOperators {
        self.then(Segment::Type(type_name.into()))
    }

    pub fn exact_type_of<C: ContentType>(self) -> QueryOperators {
        self.exact_type(C::NAME)
    }

    /// `InFolder:"path"`: direct children of the folder.
    ///
    /// An empty path still renders but is reported by `validate` and
    /// rejected when the query is bound to a repository.
    pub fn in_folder(self, path: impl Into<ContentPath>) -> QueryOperators {
        let (path, error) = containment(path.into());
        let mut next = self.then(Segment::InFolder(path));
        next.chain = next.chain.fail(error);
        next
    }

    /// `InTree:"path"`: the whole subtree below the path.
    pub fn in_tree(self, path: impl Into<ContentPath>) -> QueryOperators {
        let (path, error) = containment(path.into());
        let mut next = self.then(Segment::InTree(path));
        next.chain = next.chain.fail(error);
        next
    }

    /// `field:'value'`
    pub fn equals(self, field: impl AsFieldName, value: impl IntoQueryValue) -> QueryOperators {
        self.then(Segment::Equals {
            field: field.as_field_name().to_owned(),
            value: value.into_query_value(),
        })
    }

    /// `NOT(field:'value')`
    pub fn not_equals(
        self,
        field: impl AsFieldName,
        value: impl IntoQueryValue,
    ) -> QueryOperators {
        self.then(Segment::NotEquals {
            field: field.as_field_name().to_owned(),
            value: value.into_query_value(),
        })
    }

    /// Range with both bounds exclusive: `field:{'from' TO 'to'}`.
    pub fn between(
        self,
        field: impl AsFieldName,
        from: impl IntoQueryValue,
        to: impl IntoQueryValue,
    ) -> QueryOperators {
        self.between_with(field, from, to, false, false)
    }

    /// Range with independently inclusive bounds; an inclusive lower bound
    /// opens with `[`, an inclusive upper bound closes with `]`.
    pub fn between_with(
        self,
        field: impl AsFieldName,
        from: impl IntoQueryValue,
        to: impl IntoQueryValue,
        from_inclusive: bool,
        to_inclusive: bool,
    ) -> QueryOperators {
        self.then(Segment::Between {
            field: field.as_field_name().to_owned(),
            from: from.into_query_value(),
            to: to.into_query_value(),
            from_inclusive,
            to_inclusive,
        })
    }

    /// `field:>'value'`
    pub fn greater_than(self, field: impl AsFieldName, value: impl IntoQueryValue) -> QueryOperators {
        self.compare_gt(field, value, false)
    }

    /// `field:>='value'`
    pub fn greater_than_or_equal(
        self,
        field: impl AsFieldName,
        value: impl IntoQueryValue,
    ) -> QueryOperators {
        self.compare_gt(field, value, true)
    }

    /// `field:<'value'`
    pub fn less_than(self, field: impl AsFieldName, value: impl IntoQueryValue) -> QueryOperators {
        self.compare_lt(field, value, false)
    }

    /// `field:<='value'`
    pub fn less_than_or_equal(
        self,
        field: impl AsFieldName,
        value: impl IntoQueryValue,
    ) -> QueryOperators {
        self.compare_lt(field, value, true)
    }

    fn compare_gt(
        self,
        field: impl AsFieldName,
        value: impl IntoQueryValue,
        inclusive: bool,
    ) -> QueryOperators {
        self.then(Segment::GreaterThan {
            field: field.as_field_name().to_owned(),
            value: value.into_query_value(),
            inclusive,
        })
    }

    fn compare_lt(
        self,
        field: impl AsFieldName,
        value: impl IntoQueryValue,
        inclusive: bool,
    ) -> QueryOperators {
        self.then(Segment::LessThan {
            field: field.as_field_name().to_owned(),
            value: value.into_query_value(),
            inclusive,
        })
    }

    /// Parenthesized sub-query built on a fresh expression.
    ///
    /// The sub-query must end in a predicate, so `()` is never emitted.
    ///
    /// ```rust,ignore
    /// q.query(|inner| inner.type_is("Folder").or().type_is("Task"))
    /// // (TypeIs:Folder OR TypeIs:Task)
    /// ```
    pub fn query<F>(self, build: F) -> QueryOperators
    where
        F: FnOnce(QueryExpression) -> QueryOperators,
    {
        self.group(build(QueryExpression::new()))
    }

    /// Parenthesized sub-query from an already built expression.
    pub fn group(self, inner: QueryOperators) -> QueryOperators {
        let (inner, error) = inner.into_parts();
        let mut next = self.then(Segment::Group(inner));
        next.chain = next.chain.fail(error);
        next
    }

    /// Negated sub-query: `NOT(...)`.
    pub fn not<F>(self, build: F) -> QueryOperators
    where
        F: FnOnce(QueryExpression) -> QueryOperators,
    {
        let (inner, error) = build(QueryExpression::new()).into_parts();
        let mut next = self.then(Segment::Not(inner));
        next.chain = next.chain.fail(error);
        next
    }
}

fn containment(path: ContentPath) -> (String, Option<Error>) {
    let error = path.is_empty().then_some(Error::EmptyPath);
    (path.into_inner(), error)
}

impl QueryOperators {
    fn join(self, connective: Connective) -> QueryExpression {
        QueryExpression {
            chain: self.chain.push(Segment::Connective(connective)),
        }
    }

    /// Append ` AND ` and expect the next predicate.
    pub fn and(self) -> QueryExpression {
        self.join(Connective::And)
    }

    /// Append ` OR ` and expect the next predicate.
    pub fn or(self) -> QueryExpression {
        self.join(Connective::Or)
    }
}

impl QuerySegment for QueryExpression {
    fn segments(&self) -> &[Segment] {
        &self.chain.segments
    }

    fn error(&self) -> Option<&Error> {
        self.chain.error.as_ref()
    }

    fn into_parts(self) -> (Vec<Segment>, Option<Error>) {
        (self.chain.segments, self.chain.error)
    }

    fn push_segment(self, segment: Segment) -> Self {
        Self {
            chain: self.chain.push(segment),
        }
    }
}

impl QuerySegment for QueryOperators {
    fn segments(&self) -> &[Segment] {
        &self.chain.segments
    }

    fn error(&self) -> Option<&Error> {
        self.chain.error.as_ref()
    }

    fn into_parts(self) -> (Vec<Segment>, Option<Error>) {
        (self.chain.segments, self.chain.error)
    }

    fn push_segment(self, segment: Segment) -> Self {
        Self {
            chain: self.chain.push(segment),
        }
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Rendered(&self.chain.segments), f)
    }
}

impl fmt::Display for QueryOperators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Rendered(&self.chain.segments), f)
    }
}

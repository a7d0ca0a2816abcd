//! Reference field picker search.
//!
//! Reference fields restrict their targets by content type and by
//! selection roots. The picker searches the whole repository by text and
//! applies both restrictions only when they are configured.

use crate::config::SdkConfig;
use crate::odata::ODataParams;
use crate::query::Query;
use crate::repository::Repository;
use content_query::{Error, QueryExpression, QueryOperators, QuerySegment};
use std::sync::Arc;

/// Default page size of a picker search.
pub const DEFAULT_PICKER_TOP: u64 = 10;

/// Field the repository indexes all text of a content under.
const TEXT_FIELD: &str = "_Text";

/// Search for candidate targets of a reference field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct ReferenceSearch {
    pub term: String,
    /// Content type names the field accepts; empty means any type.
    pub allowed_types: Vec<String>,
    /// Subtrees the targets must live in; empty means anywhere.
    pub selection_roots: Vec<String>,
    pub top: u64,
    pub skip: u64,
}

impl ReferenceSearch {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            allowed_types: Vec::new(),
            selection_roots: Vec::new(),
            top: DEFAULT_PICKER_TOP,
            skip: 0,
        }
    }

    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_selection_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_paging(mut self, top: u64, skip: u64) -> Self {
        self.top = top;
        self.skip = skip;
        self
    }

    /// Append the search to an empty expression.
    ///
    /// ```text
    /// _Text:'*term*' AND (InTree:"/Root/a" OR InTree:"/Root/b") AND (TypeIs:Task) .TOP:10 .SKIP:0
    /// ```
    pub fn build(&self, q: QueryExpression) -> QueryOperators {
        let mut query = q.equals(TEXT_FIELD, format!("*{}*", self.term));
        if let Some(roots) = any_of(&self.selection_roots, |q, root| q.in_tree(root)) {
            query = query.and().group(roots);
        }
        if let Some(types) = any_of(&self.allowed_types, |q, name| q.type_is(name)) {
            query = query.and().group(types);
        }
        query.top(self.top).skip(self.skip)
    }

    /// Bind the search to the repository root with all fields selected.
    ///
    /// # Errors
    /// Returns `Error::EmptyPath` if the configured root path is empty, or
    /// a builder error from an empty selection root.
    pub fn into_query<R: Repository>(
        self,
        repository: Arc<R>,
        config: &SdkConfig,
    ) -> Result<Query<R>, Error> {
        Query::new(
            |q| self.build(q),
            repository,
            config.root_path.as_str(),
            Some(ODataParams::select_all()),
        )
    }
}

/// `a OR b OR ...` over `items`; `None` when there is nothing to match.
fn any_of<F>(items: &[String], predicate: F) -> Option<QueryOperators>
where
    F: Fn(QueryExpression, &str) -> QueryOperators,
{
    let (first, rest) = items.split_first()?;
    let chain = predicate(QueryExpression::new(), first.as_str());
    Some(
        rest.iter()
            .fold(chain, |chain, item| predicate(chain.or(), item.as_str())),
    )
}

//! Executable content queries.
//!
//! A [`Query`] binds a built expression to a collection path and a
//! [`Repository`]. It is immutable: every [`Query::exec`] renders the same
//! text and issues a fresh request.
//!
//! # Example
//!
//! ```rust,ignore
//! use content_sdk::query::Query;
//! use content_query::QuerySegment;
//!
//! let query = Query::new(
//!     |q| q.type_is("Task").and().equals("DisplayName", "Unicorn").top(5),
//!     repository.clone(),
//!     "/Root/Sites",
//!     None,
//! )?
//! .map_results(|raw| raw["DisplayName"].as_str().unwrap_or_default().to_owned());
//!
//! let result = query.exec().await?;
//! println!("{} of {}", result.results.len(), result.count);
//! ```

use crate::odata::ODataParams;
use crate::repository::{FetchRequest, RawRecord, Repository};
use content_query::render::Rendered;
use content_query::{ContentEntity, ContentPath, Error, QueryExpression, QuerySegment, Segment};
use std::fmt;
use std::sync::Arc;

type Mapper<T> = Arc<dyn Fn(RawRecord) -> T + Send + Sync>;

/// Result of one query execution, in server order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult<T> {
    /// Total number of matches on the server, regardless of paging.
    pub count: u64,
    pub results: Vec<T>,
}

/// A content query bound to a repository and a collection path.
pub struct Query<R: Repository, T = RawRecord> {
    segments: Vec<Segment>,
    path: String,
    params: Option<ODataParams>,
    repository: Arc<R>,
    mapper: Mapper<T>,
}

impl<R: Repository> Query<R> {
    /// Build a query rooted at `path`.
    ///
    /// `build` receives an empty expression and may return either builder
    /// stage. Nothing is sent to the repository until [`Query::exec`].
    ///
    /// # Errors
    /// Returns `Error::EmptyPath` if `path` is empty, or the first error
    /// recorded while building (e.g. an `in_folder` with an empty path).
    pub fn new<F, Q>(
        build: F,
        repository: Arc<R>,
        path: impl Into<ContentPath>,
        params: Option<ODataParams>,
    ) -> Result<Self, Error>
    where
        F: FnOnce(QueryExpression) -> Q,
        Q: QuerySegment,
    {
        let path = path.into().resolve()?;
        let (segments, error) = build(QueryExpression::new()).into_parts();
        if let Some(error) = error {
            return Err(error);
        }
        Ok(Self {
            segments,
            path,
            params,
            repository,
            mapper: Arc::new(|raw: RawRecord| raw),
        })
    }

    /// Build a query over the children of a content item.
    ///
    /// # Errors
    /// Returns `Error::EmptyPath` if the content has no path.
    pub fn from_content<C, F, Q>(
        content: &C,
        build: F,
        repository: Arc<R>,
        params: Option<ODataParams>,
    ) -> Result<Self, Error>
    where
        C: ContentEntity + ?Sized,
        F: FnOnce(QueryExpression) -> Q,
        Q: QuerySegment,
    {
        Self::new(build, repository, ContentPath::of(content), params)
    }
}

impl<R: Repository, T> Query<R, T> {
    /// Map every returned record with `mapper`.
    #[must_use]
    pub fn map_results<U, M>(self, mapper: M) -> Query<R, U>
    where
        M: Fn(RawRecord) -> U + Send + Sync + 'static,
    {
        Query {
            segments: self.segments,
            path: self.path,
            params: self.params,
            repository: self.repository,
            mapper: Arc::new(mapper),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn params(&self) -> Option<&ODataParams> {
        self.params.as_ref()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The request `exec` sends.
    #[must_use]
    pub fn request(&self) -> FetchRequest {
        FetchRequest {
            path: self.path.clone(),
            query: self.to_string(),
            params: self.params.clone(),
        }
    }

    /// Execute the query: one repository fetch per call.
    ///
    /// # Errors
    /// Returns the repository error unchanged.
    pub async fn exec(&self) -> Result<QueryResult<T>, R::Error> {
        let request = self.request();
        tracing::debug!(path = %request.path, query = %request.query, "executing content query");
        let response = self.repository.fetch(request).await?;
        Ok(QueryResult {
            count: response.total_count,
            results: response.items.into_iter().map(&*self.mapper).collect(),
        })
    }
}

impl<R: Repository, T> Clone for Query<R, T> {
    fn clone(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            path: self.path.clone(),
            params: self.params.clone(),
            repository: Arc::clone(&self.repository),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

impl<R: Repository, T> fmt::Debug for Query<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("query", &self.to_string())
            .field("path", &self.path)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl<R: Repository, T> fmt::Display for Query<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Rendered(&self.segments), f)
    }
}

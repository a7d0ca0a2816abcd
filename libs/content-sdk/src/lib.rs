#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! # `content-sdk` - client SDK for the content repository
//!
//! This crate binds content queries built with `content-query` to a
//! repository connection:
//!
//! - **Executable queries** (`query` module) - `Query` renders once-built
//!   expressions and fetches one page per `exec`
//! - **Transport boundary** (`repository` module) - the `Repository` trait
//!   implemented by HTTP clients
//! - **OData parameters** (`odata` module) - `$select`/`$expand`/paging
//!   options and their URL form
//! - **Reference field search** (`reference` module)
//!
//! ## Example
//!
//! ```rust,ignore
//! use content_sdk::prelude::*;
//!
//! let tasks = Query::new(
//!     |q| q.type_is("Task").and().in_tree("/Root/Sites").sort("DisplayName").top(20),
//!     repository,
//!     "/Root",
//!     Some(ODataParams::new().with_defaults(&SdkConfig::default())),
//! )?;
//!
//! let page = tasks.exec().await?;
//! ```

pub mod config;
pub mod odata;
pub mod paths;
pub mod query;
pub mod reference;
pub mod repository;

pub use config::SdkConfig;
pub use odata::{FieldSelection, ODataParams};
pub use query::{Query, QueryResult};
pub use reference::ReferenceSearch;
pub use repository::{CollectionResponse, FetchRequest, RawRecord, Repository};

/// Builder and SDK types needed to write and run queries.
pub mod prelude {
    pub use crate::config::SdkConfig;
    pub use crate::odata::{FieldSelection, ODataParams};
    pub use crate::query::{Query, QueryResult};
    pub use crate::repository::Repository;
    pub use content_query::{ContentEntity, ContentType, QueryExpression, QueryOperators, QuerySegment};
}

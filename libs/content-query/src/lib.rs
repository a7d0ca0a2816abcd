#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! # `content-query` - content query language builder
//!
//! Builds query text for the content repository's query language, e.g.
//!
//! ```text
//! TypeIs:Task AND DisplayName:'Unicorn' .SORT:'DisplayName' .TOP:5 .SKIP:10
//! ```
//!
//! The crate is pure: it never performs I/O. Binding a query to a
//! repository and executing it lives in `content-sdk`.

pub mod builder;
pub mod content;
pub mod errors;
pub mod render;
pub mod schema;
pub mod segment;

pub use builder::{QueryExpression, QueryOperators, QuerySegment};
pub use content::{ContentEntity, ContentPath};
pub use errors::Error;
pub use render::{escape, render_segments};
pub use schema::{AsFieldName, ContentType, FieldRef, IntoQueryValue, Schema};
pub use segment::{Connective, Segment, Value};

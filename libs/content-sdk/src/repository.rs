//! Transport boundary of the SDK.
//!
//! The SDK never talks HTTP itself. A [`Repository`] implementation owns the
//! connection, authentication and timeouts; queries only hand it a
//! [`FetchRequest`] and receive a [`CollectionResponse`].

use crate::config::SdkConfig;
use crate::odata::ODataParams;
use crate::paths::join_paths;
use async_trait::async_trait;
use serde::Deserialize;

/// One content item as returned by the service, before mapping.
pub type RawRecord = serde_json::Value;

/// Error produced while turning a request into a URL.
#[derive(thiserror::Error, Debug)]
pub enum UrlError {
    #[error(transparent)]
    Path(#[from] content_query::Error),

    #[error("failed to encode request parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

/// A collection read issued by a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// Collection path, e.g. `/Root/Sites`.
    pub path: String,
    /// Rendered content query text.
    pub query: String,
    pub params: Option<ODataParams>,
}

impl FetchRequest {
    /// Relative request URL: `/<service>/<path>?query=<text>&<params>`.
    ///
    /// # Errors
    /// Returns `UrlError::Path` if the path is empty and `UrlError::Encode`
    /// if the parameters cannot be URL-encoded.
    pub fn to_url(&self, config: &SdkConfig) -> Result<String, UrlError> {
        if self.path.is_empty() {
            return Err(content_query::Error::EmptyPath.into());
        }
        let mut pairs = vec![("query", self.query.clone())];
        if let Some(params) = &self.params {
            pairs.extend(params.to_query_pairs());
        }
        let encoded = serde_urlencoded::to_string(pairs)?;
        Ok(format!(
            "/{}?{encoded}",
            join_paths(&[config.service_token.as_str(), self.path.as_str()])
        ))
    }
}

/// Response to a collection read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionResponse {
    pub total_count: u64,
    pub items: Vec<RawRecord>,
}

impl CollectionResponse {
    /// Parse the service's collection envelope:
    /// `{"d": {"__count": 2, "results": [...]}}`.
    ///
    /// # Errors
    /// Returns a JSON error if the body is not a collection envelope.
    pub fn from_odata_json(body: RawRecord) -> serde_json::Result<Self> {
        #[derive(Deserialize)]
        struct Envelope {
            d: Collection,
        }

        #[derive(Deserialize)]
        struct Collection {
            #[serde(rename = "__count", default)]
            count: Option<u64>,
            #[serde(default)]
            results: Vec<RawRecord>,
        }

        let envelope: Envelope = serde_json::from_value(body)?;
        let items = envelope.d.results;
        Ok(Self {
            total_count: envelope.d.count.unwrap_or(items.len() as u64),
            items,
        })
    }
}

/// Connection to a content repository.
///
/// Errors are the implementation's own and reach query callers unchanged.
#[async_trait]
pub trait Repository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one page of a content collection.
    async fn fetch(&self, request: FetchRequest) -> Result<CollectionResponse, Self::Error>;
}

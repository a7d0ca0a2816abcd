//! OData response-shaping parameters
//!
//! `ODataParams` carries the `$select`/`$expand`/`$orderby`/paging options
//! sent alongside a content query. The query text itself travels
//! separately (see [`crate::repository::FetchRequest`]).
//!
//! ```rust,ignore
//! let params = ODataParams::new()
//!     .with_select(FieldSelection::fields(["DisplayName", "Owner"]))
//!     .with_expand(["Owner"])
//!     .with_defaults(&SdkConfig::default());
//!
//! assert_eq!(
//!     params.to_query_string()?,
//!     "%24select=Id%2CPath%2CName%2CType%2CDisplayName%2COwner&%24expand=Owner&%24top=10000&%24inlinecount=allpages&metadata=no"
//! );
//! ```

use crate::config::SdkConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields every content request selects, whatever the caller asks for.
pub const REQUIRED_FIELDS: [&str; 4] = ["Id", "Path", "Name", "Type"];

/// `$select` value: all fields, or an explicit field list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldSelection {
    /// `*`
    All,
    Fields(Vec<String>),
}

impl FieldSelection {
    #[must_use]
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSelection::Fields(fields.into_iter().map(Into::into).collect())
    }
}

impl From<String> for FieldSelection {
    fn from(raw: String) -> Self {
        if raw.trim() == "*" {
            return FieldSelection::All;
        }
        FieldSelection::fields(
            raw.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_owned),
        )
    }
}

impl From<FieldSelection> for String {
    fn from(selection: FieldSelection) -> Self {
        selection.to_string()
    }
}

impl fmt::Display for FieldSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSelection::All => f.write_str("*"),
            FieldSelection::Fields(fields) => f.write_str(&fields.join(",")),
        }
    }
}

/// Merge field lists, keeping the first occurrence of every field.
///
/// `All` absorbs everything else.
#[must_use]
pub fn combine_field_parameters(selections: &[&FieldSelection]) -> FieldSelection {
    let mut combined: Vec<String> = Vec::new();
    for selection in selections {
        match selection {
            FieldSelection::All => return FieldSelection::All,
            FieldSelection::Fields(fields) => {
                for field in fields {
                    if !combined.contains(field) {
                        combined.push(field.clone());
                    }
                }
            }
        }
    }
    FieldSelection::Fields(combined)
}

/// `metadata` request parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metadata {
    #[default]
    No,
    Minimal,
    Full,
}

impl Metadata {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Metadata::No => "no",
            Metadata::Minimal => "minimal",
            Metadata::Full => "full",
        }
    }
}

/// `$inlinecount` request parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineCount {
    #[default]
    AllPages,
    None,
}

impl InlineCount {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InlineCount::AllPages => "allpages",
            InlineCount::None => "none",
        }
    }
}

/// Response-shaping options of a collection request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[must_use]
pub struct ODataParams {
    #[serde(rename = "$select", skip_serializing_if = "Option::is_none")]
    pub select: Option<FieldSelection>,
    #[serde(rename = "$expand", skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,
    #[serde(rename = "$orderby", skip_serializing_if = "Option::is_none")]
    pub orderby: Option<Vec<String>>,
    #[serde(rename = "$top", skip_serializing_if = "Option::is_none")]
    pub top: Option<u64>,
    #[serde(rename = "$skip", skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(rename = "$filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(rename = "$format", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "$inlinecount", skip_serializing_if = "Option::is_none")]
    pub inlinecount: Option<InlineCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl ODataParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters selecting every field (`$select=*`).
    pub fn select_all() -> Self {
        Self::new().with_select(FieldSelection::All)
    }

    pub fn with_select(mut self, select: FieldSelection) -> Self {
        self.select = Some(select);
        self
    }

    pub fn with_expand<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Order clauses, e.g. `"DisplayName desc"`.
    pub fn with_orderby<I, S>(mut self, clauses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.orderby = Some(clauses.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_top(mut self, top: u64) -> Self {
        self.top = Some(top);
        self
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_inlinecount(mut self, inlinecount: InlineCount) -> Self {
        self.inlinecount = Some(inlinecount);
        self
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// Fill unset parameters from the SDK configuration.
    ///
    /// The selection always includes [`REQUIRED_FIELDS`] first.
    pub fn with_defaults(mut self, config: &SdkConfig) -> Self {
        let requested = self
            .select
            .take()
            .unwrap_or_else(|| FieldSelection::fields(config.default_select.iter().cloned()));
        let required = FieldSelection::fields(REQUIRED_FIELDS);
        self.select = Some(combine_field_parameters(&[&required, &requested]));
        self.metadata.get_or_insert(config.default_metadata);
        self.inlinecount.get_or_insert(config.default_inlinecount);
        self.top.get_or_insert(config.default_top);
        self
    }

    /// Parameters as ordered URL query pairs.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(select) = &self.select {
            pairs.push(("$select", select.to_string()));
        }
        if let Some(expand) = &self.expand {
            pairs.push(("$expand", expand.join(",")));
        }
        if let Some(orderby) = &self.orderby {
            pairs.push(("$orderby", orderby.join(",")));
        }
        if let Some(top) = self.top {
            pairs.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("$skip", skip.to_string()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("$filter", filter.clone()));
        }
        if let Some(format) = &self.format {
            pairs.push(("$format", format.clone()));
        }
        if let Some(inlinecount) = self.inlinecount {
            pairs.push(("$inlinecount", inlinecount.as_str().to_owned()));
        }
        if let Some(metadata) = self.metadata {
            pairs.push(("metadata", metadata.as_str().to_owned()));
        }
        if let Some(scenario) = &self.scenario {
            pairs.push(("scenario", scenario.clone()));
        }
        pairs
    }

    /// URL-encoded query string, without the leading `?`.
    ///
    /// # Errors
    /// Returns a `serde_urlencoded` error if encoding fails.
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self.to_query_pairs())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_field_selection_parsing() {
        assert_eq!(FieldSelection::from("*".to_owned()), FieldSelection::All);
        assert_eq!(
            FieldSelection::from(" DisplayName , Icon,".to_owned()),
            FieldSelection::fields(["DisplayName", "Icon"])
        );
        assert_eq!(FieldSelection::fields(["A", "B"]).to_string(), "A,B");
    }

    #[test]
    fn test_combine_keeps_first_occurrence() {
        let a = FieldSelection::fields(["Id", "Name"]);
        let b = FieldSelection::fields(["Name", "Icon", "Id"]);
        assert_eq!(
            combine_field_parameters(&[&a, &b]),
            FieldSelection::fields(["Id", "Name", "Icon"])
        );
    }

    #[test]
    fn test_combine_all_wins() {
        let a = FieldSelection::fields(["Id"]);
        assert_eq!(
            combine_field_parameters(&[&a, &FieldSelection::All]),
            FieldSelection::All
        );
    }

    #[test]
    fn test_with_defaults_fills_unset_only() {
        let params = ODataParams::new()
            .with_top(5)
            .with_defaults(&SdkConfig::default());

        assert_eq!(
            params.select,
            Some(FieldSelection::fields([
                "Id",
                "Path",
                "Name",
                "Type",
                "DisplayName",
                "Description",
                "Icon"
            ]))
        );
        assert_eq!(params.top, Some(5));
        assert_eq!(params.metadata, Some(Metadata::No));
        assert_eq!(params.inlinecount, Some(InlineCount::AllPages));
    }

    #[test]
    fn test_with_defaults_keeps_select_all() {
        let params = ODataParams::select_all().with_defaults(&SdkConfig::default());
        assert_eq!(params.select, Some(FieldSelection::All));
    }

    #[test]
    fn test_query_pairs_order() {
        let params = ODataParams::new()
            .with_select(FieldSelection::fields(["DisplayName"]))
            .with_expand(["Owner", "Manager"])
            .with_orderby(["DisplayName desc"])
            .with_skip(20)
            .with_metadata(Metadata::Full)
            .with_scenario("ListItems");

        let keys: Vec<&str> = params.to_query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["$select", "$expand", "$orderby", "$skip", "metadata", "scenario"]
        );
    }

    #[test]
    fn test_query_string_is_url_encoded() {
        let params = ODataParams::new()
            .with_select(FieldSelection::fields(["Id", "Name"]))
            .with_top(3);
        assert_eq!(
            params.to_query_string().unwrap(),
            "%24select=Id%2CName&%24top=3"
        );
    }

    #[test]
    fn test_empty_params_render_nothing() {
        assert_eq!(ODataParams::new().to_query_string().unwrap(), "");
    }

    #[test]
    fn test_deserialize_wire_names() {
        let params: ODataParams = serde_json::from_value(serde_json::json!({
            "$select": "DisplayName,Icon",
            "$expand": ["Owner"],
            "$top": 20,
            "metadata": "minimal",
            "$inlinecount": "none"
        }))
        .unwrap();

        assert_eq!(
            params.select,
            Some(FieldSelection::fields(["DisplayName", "Icon"]))
        );
        assert_eq!(params.expand, Some(vec!["Owner".to_owned()]));
        assert_eq!(params.top, Some(20));
        assert_eq!(params.metadata, Some(Metadata::Minimal));
        assert_eq!(params.inlinecount, Some(InlineCount::None));
    }
}

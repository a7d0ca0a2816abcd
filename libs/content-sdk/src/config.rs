use serde::Deserialize;

/// Name of the OData service endpoint on the repository host.
pub const DEFAULT_SERVICE_TOKEN: &str = "odata.svc";

/// Root of the content tree.
pub const DEFAULT_ROOT_PATH: &str = "/Root";

/// Fields requested when a request does not specify `$select`.
pub const DEFAULT_SELECT: [&str; 3] = ["DisplayName", "Description", "Icon"];

/// Default `$top` applied to collection requests.
pub const DEFAULT_TOP: u64 = 10_000;

/// SDK-wide request defaults.
///
/// Every field has a default, so a partial configuration section is enough:
///
/// ```yaml
/// content_sdk:
///   service_token: odata.svc
///   default_select: [DisplayName, Icon]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// OData service segment of request URLs (default: `odata.svc`)
    pub service_token: String,

    /// Fields selected when `$select` is not set (default: `DisplayName`, `Description`, `Icon`)
    pub default_select: Vec<String>,

    /// Metadata level requested when not set (default: `no`)
    pub default_metadata: crate::odata::Metadata,

    /// Inline count mode requested when not set (default: `allpages`)
    pub default_inlinecount: crate::odata::InlineCount,

    /// `$top` applied when not set (default: 10000)
    pub default_top: u64,

    /// Collection path used by repository-wide searches (default: `/Root`)
    pub root_path: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            service_token: DEFAULT_SERVICE_TOKEN.to_owned(),
            default_select: DEFAULT_SELECT.iter().map(|f| (*f).to_owned()).collect(),
            default_metadata: crate::odata::Metadata::No,
            default_inlinecount: crate::odata::InlineCount::AllPages,
            default_top: DEFAULT_TOP,
            root_path: DEFAULT_ROOT_PATH.to_owned(),
        }
    }
}

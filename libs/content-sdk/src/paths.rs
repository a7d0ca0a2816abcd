//! Repository path and OData resource URL helpers.

use content_query::Error;

/// Whether the path already addresses a single item, e.g. `/Root('Sites')`.
#[must_use]
pub fn is_item_path(path: &str) -> bool {
    path.contains("('") && path.ends_with("')")
}

/// Entity URL of the content at `path`.
///
/// The last segment becomes the item key: `/Root/Sites/Default` →
/// `/Root/Sites('Default')`. Root-level names keep a separator:
/// `/Root` → `/('Root')`. Item paths are returned unchanged.
///
/// # Errors
/// Returns `Error::InvalidPath` if the path has no `/` or is shorter than
/// two characters.
pub fn content_url_by_path(path: &str) -> Result<String, Error> {
    if path.len() <= 1 || !path.contains('/') {
        return Err(Error::InvalidPath(path.to_owned()));
    }
    if is_item_path(path) {
        return Ok(path.to_owned());
    }
    let (parent, name) = path.rsplit_once('/').unwrap_or(("", path));
    if parent.is_empty() {
        return Ok(format!("/('{name}')"));
    }
    Ok(format!("{parent}('{name}')"))
}

/// Entity URL of the content with the given id.
#[must_use]
pub fn content_url_by_id(id: u64) -> String {
    format!("/content({id})")
}

/// Join path parts with a single `/`, trimming slashes at both ends of each part.
#[must_use]
pub fn join_paths<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

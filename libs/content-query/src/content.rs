//! Content entities and containment paths.

use crate::errors::Error;

/// A loaded repository content item.
///
/// Content instances are provided by the client using this crate; queries
/// only need their identity and location.
pub trait ContentEntity {
    fn id(&self) -> Option<u64>;

    /// Repository path, e.g. `/Root/Sites/Default_Site`.
    fn path(&self) -> Option<&str>;
}

/// Path argument of `InFolder`/`InTree` predicates and query roots.
///
/// Built from a literal path or from a content entity's `Path`. An empty or
/// missing path is kept as-is and reported by [`ContentPath::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentPath(String);

impl ContentPath {
    /// Path of a content entity; empty when the content has no path yet.
    #[must_use]
    pub fn of<C: ContentEntity + ?Sized>(content: &C) -> Self {
        Self(content.path().unwrap_or_default().to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the path, failing when it is empty.
    ///
    /// # Errors
    /// Returns `Error::EmptyPath` if no path was provided.
    pub fn resolve(self) -> Result<String, Error> {
        if self.0.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(self.0)
    }
}

impl From<&str> for ContentPath {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}

impl From<String> for ContentPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&String> for ContentPath {
    fn from(path: &String) -> Self {
        Self(path.clone())
    }
}

impl From<Option<&str>> for ContentPath {
    fn from(path: Option<&str>) -> Self {
        Self(path.unwrap_or_default().to_owned())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    struct Folder {
        path: Option<String>,
    }

    impl ContentEntity for Folder {
        fn id(&self) -> Option<u64> {
            Some(1)
        }

        fn path(&self) -> Option<&str> {
            self.path.as_deref()
        }
    }

    #[test]
    fn test_literal_path_resolves() {
        assert_eq!(ContentPath::from("/Root/a").resolve(), Ok("/Root/a".to_owned()));
    }

    #[test]
    fn test_content_path_resolves() {
        let folder = Folder {
            path: Some("/Root/Sites".to_owned()),
        };
        assert_eq!(ContentPath::of(&folder).as_str(), "/Root/Sites");
    }

    #[test]
    fn test_missing_paths_fail() {
        let folder = Folder { path: None };
        assert_eq!(ContentPath::of(&folder).resolve(), Err(Error::EmptyPath));
        assert_eq!(ContentPath::from("").resolve(), Err(Error::EmptyPath));
        assert!(ContentPath::from(None).is_empty());
    }
}

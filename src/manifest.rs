//! Install-time asset manifest.

use url::Url;

use crate::error::Result;

/// The fixed, ordered list of relative URLs pre-populated into the cache at
/// install time.
///
/// Entries are resolved against the worker's own origin. The list is defined
/// at configuration time and immutable afterwards; listing an unreachable
/// asset fails the entire install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    urls: Vec<String>,
}

impl AssetManifest {
    /// Creates a manifest from an ordered list of relative URLs.
    #[must_use]
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the relative URLs in manifest order.
    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Returns the number of manifest entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns `true` if the manifest lists no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Returns `true` if the manifest lists the given relative URL.
    ///
    /// Leading `./` and `/` prefixes are ignored so that `./index.html`,
    /// `/index.html`, and `index.html` all name the same asset.
    #[must_use]
    pub fn contains(&self, relative: &str) -> bool {
        let wanted = normalize(relative);
        self.urls.iter().any(|u| normalize(u) == wanted)
    }

    /// Resolves every entry against `origin`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry does not form a valid URL when joined
    /// with the origin.
    pub fn resolve(&self, origin: &Url) -> Result<Vec<Url>> {
        self.urls
            .iter()
            .map(|u| origin.join(u).map_err(Into::into))
            .collect()
    }
}

/// Strips leading `./` and `/` so differently-written relative URLs compare
/// equal.
fn normalize(relative: &str) -> &str {
    relative
        .strip_prefix("./")
        .unwrap_or(relative)
        .trim_start_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn preserves_order() {
        let manifest = AssetManifest::new(["index.html", "styles.css", "img/logo.png"]);
        assert_eq!(
            manifest.urls(),
            &["index.html", "styles.css", "img/logo.png"]
        );
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn resolves_against_origin() {
        let manifest = AssetManifest::new(["./index.html", "img/logo.png"]);
        let resolved = manifest.resolve(&origin()).unwrap();
        assert_eq!(resolved[0].as_str(), "https://example.com/index.html");
        assert_eq!(resolved[1].as_str(), "https://example.com/img/logo.png");
    }

    #[test]
    fn contains_ignores_leading_dot_slash() {
        let manifest = AssetManifest::new(["./index.html"]);
        assert!(manifest.contains("index.html"));
        assert!(manifest.contains("/index.html"));
        assert!(manifest.contains("./index.html"));
        assert!(!manifest.contains("other.html"));
    }

    #[test]
    fn empty_manifest() {
        let manifest = AssetManifest::new(Vec::<String>::new());
        assert!(manifest.is_empty());
        assert!(manifest.resolve(&origin()).unwrap().is_empty());
    }
}

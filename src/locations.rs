//! Resource location resolution
//!
//! Every schema and WSDL document is identified by a canonical URI. This
//! module turns command line sources and `schemaLocation`/`location`
//! references into such URIs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

use crate::catalog::XmlCatalog;
use crate::error::{Error, Result};

/// Resource location - can be a URL, file path, or string identifier
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (http, https, file, ...)
    Url(Url),
    /// String identifier (for in-memory resources)
    String(String),
}

impl Location {
    /// Classify a string as URL, path or identifier
    pub fn parse(s: &str) -> Self {
        if let Ok(url) = Url::parse(s) {
            // Single letter schemes are Windows drive letters, not URLs
            if url.scheme().len() > 1 {
                return Location::Url(url);
            }
        }

        let path = PathBuf::from(s);
        if path.exists() || s.starts_with('/') || s.starts_with('.') {
            return Location::Path(path);
        }

        Location::String(s.to_string())
    }

    /// Canonical URI for this location
    pub fn to_uri(&self) -> Result<String> {
        match self {
            Location::Path(p) => path_to_uri(p),
            Location::Url(u) => Ok(u.to_string()),
            Location::String(s) => Ok(s.clone()),
        }
    }

    /// Check if this is a remote location (URL other than file:)
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(u) if u.scheme() != "file")
    }

    /// Check if this is a local file
    pub fn is_file(&self) -> bool {
        match self {
            Location::Path(_) => true,
            Location::Url(u) => u.scheme() == "file",
            Location::String(_) => false,
        }
    }
}

/// Convert a filesystem path into an absolute `file:` URI
pub fn path_to_uri(path: &Path) -> Result<String> {
    let absolute = if path.exists() {
        path.canonicalize()?
    } else if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    Url::from_file_path(&absolute)
        .map(|u| u.to_string())
        .map_err(|_| Error::Resource(format!("Cannot convert '{}' to a URI", absolute.display())))
}

/// Last path segment of a URI, for log messages
pub fn file_name(uri: &str) -> &str {
    uri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(uri)
}

/// Resolve a reference found in `base` into a canonical URI
///
/// Absolute URLs are normalized and returned as is; relative references are
/// joined onto the base document's URI. Without a base the reference is
/// treated as a filesystem path.
pub fn resolve_location(base: Option<&str>, reference: &str) -> Result<String> {
    if let Location::Url(url) = Location::parse(reference) {
        return Ok(url.to_string());
    }

    match base {
        Some(base) => match Url::parse(base) {
            Ok(base_url) => Ok(base_url.join(reference)?.to_string()),
            Err(_) => {
                let parent = Path::new(base).parent().unwrap_or_else(|| Path::new(""));
                path_to_uri(&parent.join(reference))
            }
        },
        None => path_to_uri(Path::new(reference)),
    }
}

/// Expand a command line source into entry point URIs.
///
/// A directory yields its immediate `*.xsd` files in sorted order and is
/// rejected in WSDL mode; a file yields its `file:` URI; anything else is
/// taken as a URI.
pub fn resolve_source(source: &str, wsdl: bool) -> Result<Vec<String>> {
    let path = Path::new(source);

    if path.is_dir() {
        if wsdl {
            return Err(Error::Config(
                "WSDL mode doesn't support scanning directories".to_string(),
            ));
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().map_or(false, |ext| ext == "xsd"))
            .collect();
        files.sort();

        return files.iter().map(|p| path_to_uri(p)).collect();
    }

    if path.is_file() {
        return Ok(vec![path_to_uri(path)?]);
    }

    Location::parse(source).to_uri().map(|uri| vec![uri])
}

/// Resolves document references, consulting an XML catalog first
#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    catalog: Option<Arc<XmlCatalog>>,
}

impl LocationResolver {
    /// Create a resolver without a catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given catalog for URN style references
    pub fn with_catalog(mut self, catalog: XmlCatalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Resolve `reference` as found in the document at `base`
    pub fn resolve(&self, base: Option<&str>, reference: &str) -> Result<String> {
        if let Some(mapped) = self.catalog.as_ref().and_then(|c| c.resolve(reference)) {
            return Ok(mapped.to_string());
        }
        resolve_location(base, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_url() {
        let loc = Location::parse("http://example.com/schema.xsd");
        assert!(matches!(loc, Location::Url(_)));
        assert!(loc.is_remote());
    }

    #[test]
    fn test_location_from_path() {
        let loc = Location::parse("/tmp/schema.xsd");
        assert!(matches!(loc, Location::Path(_)));
        assert!(loc.is_file());
        assert_eq!(loc.to_uri().unwrap(), "file:///tmp/schema.xsd");
    }

    #[test]
    fn test_file_url_is_local() {
        let loc = Location::parse("file:///a/b.xsd");
        assert!(loc.is_file());
        assert!(!loc.is_remote());
    }

    #[test]
    fn test_resolve_relative_reference() {
        let uri = resolve_location(Some("file:///a/b/main.xsd"), "../common/types.xsd").unwrap();
        assert_eq!(uri, "file:///a/common/types.xsd");

        let uri = resolve_location(Some("http://example.com/s/main.xsd"), "sub.xsd").unwrap();
        assert_eq!(uri, "http://example.com/s/sub.xsd");
    }

    #[test]
    fn test_resolve_absolute_reference() {
        let uri = resolve_location(
            Some("file:///a/main.xsd"),
            "http://www.w3.org/2001/xml.xsd",
        )
        .unwrap();
        assert_eq!(uri, "http://www.w3.org/2001/xml.xsd");
    }

    #[test]
    fn test_resolve_against_plain_path() {
        let uri = resolve_location(Some("/a/b/main.xsd"), "types.xsd").unwrap();
        assert_eq!(uri, "file:///a/b/types.xsd");
    }

    #[test]
    fn test_resolve_source_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.xsd"), "<schema/>").unwrap();
        std::fs::write(dir.path().join("a.xsd"), "<schema/>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.xsd")).unwrap();

        let source = dir.path().to_str().unwrap();
        let uris = resolve_source(source, false).unwrap();

        assert_eq!(uris.len(), 2);
        assert!(uris[0].ends_with("/a.xsd"));
        assert!(uris[1].ends_with("/b.xsd"));
        assert!(uris.iter().all(|u| u.starts_with("file:///")));

        assert!(matches!(resolve_source(source, true), Err(Error::Config(_))));
    }

    #[test]
    fn test_resolve_source_url_passthrough() {
        let uris = resolve_source("http://example.com/service.wsdl", true).unwrap();
        assert_eq!(uris, vec!["http://example.com/service.wsdl".to_string()]);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("file:///a/b/main.xsd"), "main.xsd");
        assert_eq!(file_name("main.xsd"), "main.xsd");
    }
}

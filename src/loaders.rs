//! Document fetching
//!
//! The transformer reads every document through the [`Fetcher`] trait so a
//! run can be pointed at the filesystem, the network, or an in-memory set
//! of documents.

use std::collections::HashMap;
use std::fs;

use url::Url;

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::locations::Location;

/// Retrieves the raw bytes of a document by URI
pub trait Fetcher {
    /// Fetch the document identified by `uri`
    fn fetch(&self, uri: &str) -> Result<Vec<u8>>;
}

/// Resource loader for local and remote documents
#[derive(Debug, Clone)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
    /// Whether to allow remote resources
    allow_remote: bool,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            allow_remote: true,
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set whether to allow remote resources
    pub fn with_allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    fn load_url(&self, url: &Url) -> Result<Vec<u8>> {
        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|_| Error::Resource(format!("Invalid file URI '{}'", url)))?;
            return fs::read(&path).map_err(|e| {
                Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
            });
        }

        if !self.allow_remote {
            return Err(Error::Resource(format!(
                "Remote resources are not allowed: {}",
                url
            )));
        }

        self.load_remote(url)
    }

    #[cfg(feature = "remote")]
    fn load_remote(&self, url: &Url) -> Result<Vec<u8>> {
        let response = reqwest::blocking::get(url.as_str())
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Resource(format!("Failed to fetch '{}': {}", url, e)))?;
        let bytes = response
            .bytes()
            .map_err(|e| Error::Resource(format!("Failed to read '{}': {}", url, e)))?;
        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "remote"))]
    fn load_remote(&self, url: &Url) -> Result<Vec<u8>> {
        Err(Error::Resource(format!(
            "Remote loading requires the `remote` feature: {}",
            url
        )))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for Loader {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>> {
        let content = match Location::parse(uri) {
            Location::Url(url) => self.load_url(&url)?,
            Location::Path(path) => fs::read(&path).map_err(|e| {
                Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
            })?,
            Location::String(s) => {
                return Err(Error::Resource(format!("Not a fetchable location: {}", s)))
            }
        };

        self.limits.check_document_size(content.len())?;

        Ok(content)
    }
}

/// Serves documents from memory, keyed by URI
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `uri`
    pub fn with_document(mut self, uri: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(uri, content);
        self
    }

    /// Register a document under `uri`
    pub fn insert(&mut self, uri: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.documents.insert(uri.into(), content.into());
    }
}

impl Fetcher for MemoryLoader {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>> {
        self.documents
            .get(uri)
            .cloned()
            .ok_or_else(|| Error::Resource(format!("Document not found: {}", uri)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::path_to_uri;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file_uri() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "<schema/>").unwrap();

        let uri = path_to_uri(file.path()).unwrap();
        let content = Loader::new().fetch(&uri).unwrap();

        assert!(String::from_utf8_lossy(&content).contains("<schema/>"));
    }

    #[test]
    fn test_missing_file_is_a_resource_error() {
        let result = Loader::new().fetch("file:///definitely/not/here.xsd");
        assert!(matches!(result, Err(Error::Resource(_))));
    }

    #[test]
    fn test_remote_disallowed() {
        let loader = Loader::new().with_allow_remote(false);
        let result = loader.fetch("http://example.com/schema.xsd");
        assert!(matches!(result, Err(Error::Resource(_))));
    }

    #[test]
    fn test_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        let large_content = "x".repeat(11 * 1024 * 1024); // 11 MB
        write!(file, "{}", large_content).unwrap();

        let uri = path_to_uri(file.path()).unwrap();
        let loader = Loader::new().with_limits(Limits::strict());

        assert!(matches!(loader.fetch(&uri), Err(Error::LimitExceeded(_))));
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with_document("mem://a.xsd", "<schema/>");
        assert_eq!(loader.fetch("mem://a.xsd").unwrap(), b"<schema/>");
        assert!(loader.fetch("mem://b.xsd").is_err());
    }
}

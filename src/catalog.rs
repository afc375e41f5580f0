//! XML Catalog support for schema location resolution
//!
//! Implements the subset of OASIS XML Catalogs needed to map URN style
//! `schemaLocation` values onto fetchable URIs.
//!
//! # Supported Elements
//!
//! - `<catalog>` - Root element
//! - `<group>` - Grouping element (inherits base from parent)
//! - `<system>` - Maps system identifiers to URIs
//! - `<uri>` - Maps URN names to URIs
//! - `<nextCatalog>` - Includes another catalog file

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::documents::{Document, Element};
use crate::error::{Error, ParseError, Result};
use crate::locations::resolve_location;

/// XML Catalog for resolving schema locations
#[derive(Debug, Clone, Default)]
pub struct XmlCatalog {
    /// System ID to URI mappings
    system_mappings: HashMap<String, String>,
    /// URI name to URI mappings
    uri_mappings: HashMap<String, String>,
}

impl XmlCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a file, following `<nextCatalog>` references
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Resource(format!("Failed to read catalog '{}': {}", path.display(), e))
        })?;

        let mut catalog = Self::new();
        catalog.parse_catalog(&content, path)?;
        Ok(catalog)
    }

    fn parse_catalog(&mut self, xml: &str, path: &Path) -> Result<()> {
        let doc = Document::from_string(xml)?;
        let root = doc
            .root()
            .ok_or_else(|| ParseError::new("Empty catalog document").with_location(path.display().to_string()))?;

        if root.local_name() != "catalog" {
            return Err(ParseError::new(format!(
                "Expected catalog root element, got {}",
                root.local_name()
            ))
            .with_location(path.display().to_string())
            .into());
        }

        let base = path.to_string_lossy().to_string();
        self.process_children(&root.children, &base)
    }

    fn process_children(&mut self, children: &[Element], base: &str) -> Result<()> {
        for child in children {
            match child.local_name() {
                "system" => {
                    if let (Some(id), Some(uri)) =
                        (child.get_attribute("systemId"), child.get_attribute("uri"))
                    {
                        let resolved = resolve_location(Some(base), uri)?;
                        self.system_mappings.insert(id.to_string(), resolved);
                    }
                }
                "uri" => {
                    if let (Some(name), Some(uri)) =
                        (child.get_attribute("name"), child.get_attribute("uri"))
                    {
                        let resolved = resolve_location(Some(base), uri)?;
                        self.uri_mappings.insert(name.to_string(), resolved);
                    }
                }
                "nextCatalog" => {
                    if let Some(next) = child.get_attribute("catalog") {
                        let next_path = Path::new(base)
                            .parent()
                            .unwrap_or_else(|| Path::new(""))
                            .join(next);
                        match fs::read_to_string(&next_path) {
                            Ok(content) => {
                                if let Err(e) = self.parse_catalog(&content, &next_path) {
                                    warn!("Ignoring catalog {}: {}", next_path.display(), e);
                                }
                            }
                            Err(e) => warn!("Catalog not found {}: {}", next_path.display(), e),
                        }
                    }
                }
                "group" => self.process_children(&child.children, base)?,
                _ => {}
            }
        }

        Ok(())
    }

    /// Add a system identifier mapping
    pub fn add_system(&mut self, system_id: impl Into<String>, uri: impl Into<String>) {
        self.system_mappings.insert(system_id.into(), uri.into());
    }

    /// Resolve a schema location, trying system IDs before URI names
    pub fn resolve(&self, location: &str) -> Option<&str> {
        self.system_mappings
            .get(location)
            .or_else(|| self.uri_mappings.get(location))
            .map(|s| s.as_str())
    }

    /// Check if this catalog is empty (has no mappings)
    pub fn is_empty(&self) -> bool {
        self.system_mappings.is_empty() && self.uri_mappings.is_empty()
    }

    /// Get the number of mappings
    pub fn len(&self) -> usize {
        self.system_mappings.len() + self.uri_mappings.len()
    }
}

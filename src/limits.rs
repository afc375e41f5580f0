//! Limits and constraints for document graph resolution
//!
//! Guards against oversized documents and runaway inclusion chains.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Resolution limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum size in bytes of a single fetched document
    pub max_document_size: usize,

    /// Maximum depth of include/import/redefine/override chains
    pub max_include_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_document_size: 100 * 1024 * 1024, // 100 MB
            max_include_depth: 100,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_document_size: 10 * 1024 * 1024, // 10 MB
            max_include_depth: 20,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_document_size: 1024 * 1024 * 1024, // 1 GB
            max_include_depth: 1000,
        }
    }

    /// Check if a document size is within limits
    pub fn check_document_size(&self, size: usize) -> Result<()> {
        if size > self.max_document_size {
            Err(Error::LimitExceeded(format!(
                "document size {} bytes exceeds maximum {} bytes",
                size, self.max_document_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if an inclusion depth is within limits
    pub fn check_include_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_include_depth {
            Err(Error::LimitExceeded(format!(
                "include depth {} exceeds maximum {}",
                depth, self.max_include_depth
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_include_depth, 100);
        assert!(limits.check_include_depth(50).is_ok());
        assert!(limits.check_include_depth(150).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_include_depth < Limits::default().max_include_depth);
        assert!(limits.check_document_size(11 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.check_include_depth(500).is_ok());
        assert!(limits.check_document_size(200 * 1024 * 1024).is_ok());
    }

    #[test]
    fn test_limits_from_toml() {
        let limits: Limits = toml::from_str("max_include_depth = 5").unwrap();
        assert_eq!(limits.max_include_depth, 5);
        assert_eq!(limits.max_document_size, Limits::default().max_document_size);
    }
}

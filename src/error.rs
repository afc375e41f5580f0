//! Error types for xsdgen
//!
//! This module defines all error types used throughout the library.
//! Per-document fetch and parse failures are absorbed by the transformer;
//! only configuration errors and fatal generation errors reach the caller.

use std::fmt;
use thiserror::Error;

/// Result type alias using xsdgen Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsdgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema or definitions document could not be read into a tree
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Configuration rejected before any document was fetched
    #[error("configuration error: {0}")]
    Config(String),

    /// Fatal code generation error
    #[error("generation error: {0}")]
    Generation(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Output serialization error
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration file error
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Schema or WSDL parsing error
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// URI of the document being parsed
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " ({})", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

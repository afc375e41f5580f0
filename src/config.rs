//! Generator configuration
//!
//! Settings can come from a TOML file, from builder calls, or both; the
//! command line applies its flags on top of the file values.
//!
//! ```toml
//! package = "models"
//! output = "json"
//! output_dir = "generated"
//!
//! [limits]
//! max_include_depth = 20
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::locations::path_to_uri;

/// Settings of one generation run
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Base package of the generated classes
    pub package: String,
    /// Output format id
    pub output: String,
    /// Print to stdout instead of writing files
    pub print: bool,
    /// Treat the source as a WSDL document
    pub wsdl: bool,
    /// Directory generated files are written to
    pub output_dir: PathBuf,
    /// Directory of bundled schemas, always packaged together
    pub common_schema_dir: Option<PathBuf>,
    /// OASIS XML catalog consulted for schema locations
    pub catalog: Option<PathBuf>,
    /// Resolution limits
    pub limits: Limits,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: "generated".to_string(),
            output: "json".to_string(),
            print: false,
            wsdl: false,
            output_dir: PathBuf::from("."),
            common_schema_dir: None,
            catalog: None,
            limits: Limits::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration for the given base package
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_print(mut self, print: bool) -> Self {
        self.print = print;
        self
    }

    pub fn with_wsdl(mut self, wsdl: bool) -> Self {
        self.wsdl = wsdl;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_common_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.common_schema_dir = Some(dir.into());
        self
    }

    pub fn with_catalog(mut self, catalog: impl Into<PathBuf>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Reject settings that cannot produce a run
    pub fn validate(&self) -> Result<()> {
        if self.package.trim().is_empty() {
            return Err(Error::Config("Package name must not be empty".to_string()));
        }
        if self.package.split('.').any(|segment| segment.is_empty()) {
            return Err(Error::Config(format!(
                "Invalid package name '{}'",
                self.package
            )));
        }
        if self.output.is_empty() {
            return Err(Error::Config("Output format must not be empty".to_string()));
        }
        Ok(())
    }

    /// URI prefix of the common schema directory
    pub fn common_schema_uri(&self) -> Result<Option<String>> {
        self.common_schema_dir
            .as_deref()
            .map(|dir| {
                path_to_uri(dir).map(|mut uri| {
                    if !uri.ends_with('/') {
                        uri.push('/');
                    }
                    uri
                })
            })
            .transpose()
    }
}

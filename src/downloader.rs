//! Schema downloading
//!
//! Mirrors a schema or WSDL document and everything it references into a
//! local directory, without building a class model. Relative references
//! keep their layout; absolute ones are stored next to the referencing
//! document and the reference in the mirrored text is rewritten.

use std::fs;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::Result;
use crate::loaders::{Fetcher, Loader};
use crate::locations::{file_name, Location, LocationResolver};
use crate::parser::{DefinitionsParser, SchemaParser};

/// Text of one mirrored document
#[derive(Debug, Clone)]
pub struct SchemaSource {
    /// Where the document is written
    pub target: PathBuf,
    /// Document text
    pub text: String,
    /// Whether a reference in the text was rewritten
    pub modified: bool,
}

impl SchemaSource {
    /// Create a new schema source
    pub fn new(target: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            text: text.into(),
            modified: false,
        }
    }

    /// Rewrite a `schemaLocation` or WSDL `location` value
    pub fn replace_location(&mut self, old_location: &str, new_location: &str) {
        if old_location == new_location {
            return;
        }

        for attr in ["schemaLocation", "location"] {
            for quote in ['"', '\''] {
                let pattern = format!("{}={}{}{}", attr, quote, old_location, quote);
                let replacement = format!("{}={}{}{}", attr, quote, new_location, quote);
                if self.text.contains(&pattern) {
                    self.text = self.text.replace(&pattern, &replacement);
                    self.modified = true;
                }
            }
        }
    }
}

/// A reference found in a mirrored document
#[derive(Debug, Clone, PartialEq)]
struct Reference {
    /// Resolved URI
    location: String,
    /// Value as written in the document
    raw: String,
}

/// Lexically normalize `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Downloads schemas with all their dependencies
pub struct SchemaDownloader {
    output_dir: PathBuf,
    fetcher: Box<dyn Fetcher>,
    resolver: LocationResolver,
    downloaded: IndexMap<String, PathBuf>,
}

impl std::fmt::Debug for SchemaDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaDownloader")
            .field("output_dir", &self.output_dir)
            .field("downloaded", &self.downloaded)
            .finish()
    }
}

impl SchemaDownloader {
    /// Create a downloader writing under `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            fetcher: Box::new(Loader::new()),
            resolver: LocationResolver::new(),
            downloaded: IndexMap::new(),
        }
    }

    /// Read documents through `fetcher`
    pub fn with_fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    /// Resolve references through `resolver`
    pub fn with_resolver(mut self, resolver: LocationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Mirror every document reachable from `uris` into
    /// `output_dir/<package as path>/` and return the written files
    pub fn process(&mut self, uris: &[String], package: &str) -> Result<Vec<PathBuf>> {
        let root: PathBuf = self.output_dir.join(package.split('.').collect::<PathBuf>());

        for uri in uris {
            let target = root.join(file_name(uri));
            self.wget(uri, target, &root)?;
        }

        Ok(self.downloaded.values().cloned().collect())
    }

    fn wget(&mut self, uri: &str, target: PathBuf, root: &Path) -> Result<()> {
        if self.downloaded.contains_key(uri) {
            return Ok(());
        }

        let input = match self.fetcher.fetch(uri) {
            Ok(input) => input,
            Err(e) => {
                warn!("Skipping {}: {}", uri, e);
                return Ok(());
            }
        };
        self.downloaded.insert(uri.to_string(), target.clone());

        let mut source = SchemaSource::new(target, String::from_utf8_lossy(&input).into_owned());
        let dir = source
            .target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());

        for reference in self.references(uri, &input) {
            let relative = match Location::parse(&reference.raw) {
                Location::Url(_) => {
                    let local = file_name(&reference.location).to_string();
                    source.replace_location(&reference.raw, &local);
                    local
                }
                _ => reference.raw.clone(),
            };

            let mut sub_target = normalize(&dir.join(&relative));
            if !sub_target.starts_with(root) {
                sub_target = root.join(file_name(&reference.location));
            }
            self.wget(&reference.location, sub_target, root)?;
        }

        if let Some(parent) = source.target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&source.target, &source.text)?;
        info!("Writing {}", source.target.display());
        Ok(())
    }

    fn references(&self, uri: &str, input: &[u8]) -> Vec<Reference> {
        if uri.ends_with("wsdl") {
            let definitions = match DefinitionsParser::new(Some(uri.to_string()))
                .with_resolver(self.resolver.clone())
                .parse(input)
            {
                Ok(definitions) => definitions,
                Err(e) => {
                    warn!("Definitions not parsed {}: {}", uri, e);
                    return Vec::new();
                }
            };

            let imports = definitions.imports.iter().filter_map(|import| {
                Some(Reference {
                    location: import.location.clone()?,
                    raw: import.raw_location.clone()?,
                })
            });
            let included = definitions
                .schemas()
                .iter()
                .flat_map(|schema| schema.included())
                .filter_map(|r| {
                    Some(Reference {
                        location: r.location.clone()?,
                        raw: r.schema_location.clone()?,
                    })
                });
            return included.chain(imports).collect();
        }

        match SchemaParser::new(Some(uri.to_string()))
            .with_resolver(self.resolver.clone())
            .parse(input)
        {
            Ok(schema) => schema
                .included()
                .filter_map(|r| {
                    Some(Reference {
                        location: r.location.clone()?,
                        raw: r.schema_location.clone()?,
                    })
                })
                .collect(),
            Err(e) => {
                warn!("Schema not parsed {}: {}", uri, e);
                Vec::new()
            }
        }
    }
}

//! # xsdgen
//!
//! Compiles XML Schema (XSD) and WSDL 1.1 documents into a language-neutral
//! class model and renders it through pluggable code writers.
//!
//! A run walks the document graph reachable from its entry points (schema
//! imports, includes, redefines, overrides and WSDL imports), builds the
//! raw classes of every document exactly once, groups the documents into
//! packages by their directory layout and hands the result to an analyzer
//! and a writer.
//!
//! ## Example
//!
//! ```rust,ignore
//! use xsdgen::{GeneratorConfig, SchemaTransformer};
//!
//! let config = GeneratorConfig::new("api.models").with_output_dir("generated");
//! let mut transformer = SchemaTransformer::new(config)?;
//!
//! let uris = xsdgen::resolve_source("schemas/", false)?;
//! let classes = transformer.process_schemas(&uris)?;
//! ```

#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;
pub mod config;

// Names and locations
pub mod namespaces;
pub mod names;
pub mod locations;
pub mod catalog;

// Resource loading and parsing
pub mod loaders;
pub mod documents;
pub mod parser;

// Class model
pub mod models;
pub mod builder;
pub mod aggregator;
pub mod packages;
pub mod analyzer;
pub mod writer;

// Drivers
pub mod transformer;
pub mod downloader;

pub use aggregator::{count_classes, ClassMap};
pub use analyzer::{Analyzer, ClassAnalyzer};
pub use builder::ClassBuilder;
pub use config::GeneratorConfig;
pub use downloader::SchemaDownloader;
pub use error::{Error, ParseError, Result};
pub use limits::Limits;
pub use loaders::{Fetcher, Loader, MemoryLoader};
pub use locations::resolve_source;
pub use models::{Attr, Class, Package, Tag};
pub use packages::{assign_package, assign_packages};
pub use parser::{DefinitionsParser, SchemaParser};
pub use transformer::SchemaTransformer;
pub use writer::{CodeWriter, Generator, JsonGenerator};

/// Version of the xsdgen library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

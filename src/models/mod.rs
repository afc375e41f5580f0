//! Data models
//!
//! - [`codegen`]: the class model handed to analyzers and writers
//! - [`xsd`]: parsed schema documents
//! - [`wsdl`]: parsed service definitions
//! - [`soap`]: SOAP binding extensions of service definitions

pub mod codegen;
pub mod soap;
pub mod wsdl;
pub mod xsd;

pub use codegen::{Attr, Class, Package, RestrictionValue, Tag, UNBOUNDED};
pub use wsdl::Definitions;
pub use xsd::{ReferenceKind, Schema, SchemaReference};

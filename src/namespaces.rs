//! XML namespace handling
//!
//! Qualified names and prefix mappings used to tell built-in XSD types apart
//! from types declared by the schemas being compiled.

use std::collections::HashMap;
use std::fmt;

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// WSDL 1.1 namespace
pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";

/// SOAP 1.1 binding namespace
pub const SOAP_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap/";

/// SOAP 1.2 binding namespace
pub const SOAP12_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<String>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Whether this name belongs to the XML Schema namespace
    pub fn is_builtin(&self) -> bool {
        self.namespace.as_deref() == Some(XSD_NAMESPACE)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Namespace context for resolving prefixes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceContext {
    prefixes: HashMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Copy the declarations of `parent` that this context does not override
    pub fn inherit(&mut self, parent: &NamespaceContext) {
        for (prefix, uri) in &parent.prefixes {
            self.prefixes
                .entry(prefix.clone())
                .or_insert_with(|| uri.clone());
        }
        if self.default_namespace.is_none() {
            self.default_namespace = parent.default_namespace.clone();
        }
    }

    /// Resolve a prefixed name, leaving the namespace empty for unknown prefixes
    pub fn resolve(&self, prefixed_name: &str) -> QName {
        match prefixed_name.split_once(':') {
            Some((prefix, local)) => QName::new(self.get_namespace(prefix), local),
            None => QName::new(self.default_namespace.clone(), prefixed_name),
        }
    }

    /// Iterate over the prefix declarations
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.prefixes.iter()
    }
}

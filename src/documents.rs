//! Raw XML document trees
//!
//! Schema and WSDL parsers work on this small element tree rather than on
//! the event stream. Element names are stored without their prefix; the
//! in-scope namespace declarations travel with every element so prefixed
//! attribute values (`type="xs:string"`) can be resolved later.

use crate::error::{Error, Result};
use crate::namespaces::{NamespaceContext, QName};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Local element name
    pub name: String,
    /// Prefix as written in the source, if any
    pub prefix: Option<String>,
    /// Attributes keyed by local name, in document order
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespace declarations in scope for this element
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Namespace of the element, resolved through its prefix
    pub fn namespace(&self) -> Option<&str> {
        match &self.prefix {
            Some(prefix) => self.namespaces.get_namespace(prefix),
            None => self.namespaces.get_default_namespace(),
        }
    }

    /// Get an attribute value by local name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Resolve a prefixed attribute value against the in-scope namespaces
    pub fn resolve_qname(&self, value: &str) -> QName {
        self.namespaces.resolve(value)
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Find child elements by local name
    pub fn find_children<'a, 'b>(
        &'a self,
        local_name: &'b str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'b> {
        self.children
            .iter()
            .filter(move |e| e.local_name() == local_name)
    }

    /// First child element with the given local name
    pub fn find_child(&self, local_name: &str) -> Option<&Element> {
        self.find_children(local_name).next()
    }

    /// Concatenated text of this element and all its descendants
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            let inner = child.text_content();
            if !inner.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&inner);
            }
        }
        out
    }

    fn append_text(&mut self, text: &str) {
        match self.text {
            Some(ref mut existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut doc = Document::default();
        let mut stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e, stack.last())?;
                    stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.add_child(current),
                            None => doc.root = Some(current),
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e, stack.last())?;
                    match stack.last_mut() {
                        Some(parent) => parent.add_child(element),
                        None => doc.root = Some(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?;
                        if !text.trim().is_empty() {
                            current.append_text(&text);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let raw = e.into_inner();
                        current.append_text(&String::from_utf8_lossy(&raw));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(Error::Xml("Unexpected end of document".to_string()));
        }

        Ok(doc)
    }

    fn parse_element(start: &BytesStart, parent: Option<&Element>) -> Result<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();

        let mut element = match name.split_once(':') {
            Some((prefix, local)) => {
                let mut element = Element::new(local);
                element.prefix = Some(prefix.to_string());
                element
            }
            None => Element::new(name),
        };

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?;

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .to_string();

            if attr_name == "xmlns" {
                element.namespaces.set_default_namespace(attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                element.namespaces.add_prefix(prefix, attr_value);
            } else {
                let local = attr_name
                    .split_once(':')
                    .map(|(_, local)| local)
                    .unwrap_or(attr_name);
                element.attributes.insert(local.to_string(), attr_value);
            }
        }

        if let Some(parent) = parent {
            element.namespaces.inherit(&parent.namespaces);
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Take ownership of the root element
    pub fn into_root(self) -> Option<Element> {
        self.root
    }
}

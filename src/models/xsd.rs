//! Abstract schema tree
//!
//! The output of [`SchemaParser`](crate::parser::SchemaParser): one parsed
//! XSD document with its inclusion edges and global components. Only the
//! parts the class builder needs are kept.

use crate::namespaces::NamespaceContext;

/// Kind of an inclusion edge between two schema documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// xs:import - another namespace
    Import,
    /// xs:include - same or no namespace
    Include,
    /// xs:redefine - include and redefine components
    Redefine,
    /// xs:override - include and replace components
    Override,
}

impl ReferenceKind {
    /// Map an XSD element name onto an edge kind
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "import" => Some(Self::Import),
            "include" => Some(Self::Include),
            "redefine" => Some(Self::Redefine),
            "override" => Some(Self::Override),
            _ => None,
        }
    }

    /// Whether the edge may alter components already declared by the target
    pub fn redefines(&self) -> bool {
        matches!(self, Self::Redefine | Self::Override)
    }
}

/// An import/include/redefine/override edge
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaReference {
    /// Edge kind
    pub kind: ReferenceKind,
    /// Resolved URI of the referenced document, absent for inline edges
    pub location: Option<String>,
    /// `schemaLocation` as written in the document
    pub schema_location: Option<String>,
    /// Declared namespace (imports only)
    pub namespace: Option<String>,
}

/// Constraining facets of a simple type restriction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub min_exclusive: Option<f64>,
    pub min_inclusive: Option<f64>,
    pub max_exclusive: Option<f64>,
    pub max_inclusive: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub length: Option<u64>,
    pub total_digits: Option<u64>,
    pub fraction_digits: Option<u64>,
    pub white_space: Option<String>,
    pub pattern: Option<String>,
}

/// How a simple type is derived
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleVariety {
    /// xs:restriction
    Restriction,
    /// xs:list
    List {
        /// itemType
        item_type: Option<String>,
    },
    /// xs:union
    Union {
        /// memberTypes
        member_types: Vec<String>,
    },
}

/// xs:simpleType
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleType {
    /// Name, absent for anonymous types
    pub name: Option<String>,
    /// Documentation
    pub help: Option<String>,
    /// Restriction base
    pub base: Option<String>,
    /// Derivation
    pub variety: SimpleVariety,
    /// xs:enumeration values in order
    pub enumerations: Vec<String>,
    /// Remaining facets
    pub facets: Facets,
}

impl SimpleType {
    /// An anonymous restriction of `base`
    pub fn restriction(base: Option<String>) -> Self {
        Self {
            name: None,
            help: None,
            base,
            variety: SimpleVariety::Restriction,
            enumerations: Vec::new(),
            facets: Facets::default(),
        }
    }
}

/// Element declaration or reference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementDecl {
    pub name: Option<String>,
    pub ref_name: Option<String>,
    pub type_name: Option<String>,
    pub min_occurs: Option<u64>,
    pub max_occurs: Option<u64>,
    pub default: Option<String>,
    pub fixed: Option<String>,
    pub nillable: bool,
    pub is_abstract: bool,
    pub help: Option<String>,
    /// Anonymous complex type
    pub complex_type: Option<Box<ComplexType>>,
    /// Anonymous simple type
    pub simple_type: Option<Box<SimpleType>>,
}

/// Attribute declaration or reference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeDecl {
    pub name: Option<String>,
    pub ref_name: Option<String>,
    pub type_name: Option<String>,
    pub required: bool,
    pub default: Option<String>,
    pub fixed: Option<String>,
    pub help: Option<String>,
    /// Anonymous simple type
    pub simple_type: Option<SimpleType>,
}

/// A member of a content model, with compositors already flattened
#[derive(Debug, Clone, PartialEq)]
pub enum Particle {
    /// xs:element
    Element(ElementDecl),
    /// xs:group ref
    Group {
        ref_name: String,
        min_occurs: Option<u64>,
        max_occurs: Option<u64>,
    },
    /// xs:any
    Any {
        namespace: Option<String>,
        min_occurs: Option<u64>,
        max_occurs: Option<u64>,
    },
}

/// xs:complexType
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexType {
    pub name: Option<String>,
    pub help: Option<String>,
    pub mixed: bool,
    pub is_abstract: bool,
    /// Base of a complexContent or simpleContent derivation
    pub base: Option<String>,
    /// Whether the content is simpleContent
    pub simple_content: bool,
    pub particles: Vec<Particle>,
    pub attributes: Vec<AttributeDecl>,
    /// attributeGroup references
    pub attribute_groups: Vec<String>,
    pub any_attribute: bool,
}

/// Named model group (xs:group)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub help: Option<String>,
    pub particles: Vec<Particle>,
}

/// Named attribute group (xs:attributeGroup)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeGroup {
    pub name: String,
    pub help: Option<String>,
    pub attributes: Vec<AttributeDecl>,
    pub attribute_groups: Vec<String>,
    pub any_attribute: bool,
}

/// One parsed schema document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Canonical URI of the document
    pub location: Option<String>,
    /// Effective target namespace (own or inherited)
    pub target_namespace: Option<String>,
    /// Namespace declarations of the schema element
    pub namespaces: NamespaceContext,
    /// Inclusion edges in document order
    pub references: Vec<SchemaReference>,
    pub elements: Vec<ElementDecl>,
    pub attributes: Vec<AttributeDecl>,
    pub complex_types: Vec<ComplexType>,
    pub simple_types: Vec<SimpleType>,
    pub groups: Vec<Group>,
    pub attribute_groups: Vec<AttributeGroup>,
}

impl Schema {
    /// Inclusion edges: imports, includes, redefines and overrides
    pub fn included(&self) -> impl Iterator<Item = &SchemaReference> {
        self.references.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_kind_from_element() {
        assert_eq!(ReferenceKind::from_element("import"), Some(ReferenceKind::Import));
        assert_eq!(ReferenceKind::from_element("override"), Some(ReferenceKind::Override));
        assert_eq!(ReferenceKind::from_element("element"), None);
    }

    #[test]
    fn test_redefining_kinds() {
        assert!(ReferenceKind::Override.redefines());
        assert!(!ReferenceKind::Import.redefines());
        assert!(ReferenceKind::Redefine.redefines());
        assert!(!ReferenceKind::Include.redefines());
    }
}

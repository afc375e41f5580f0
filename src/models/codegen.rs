//! Language-neutral class model
//!
//! The builder produces these structures from one schema tree; the
//! analyzer, package assigner and writers consume them.

use indexmap::IndexMap;
use serde::Serialize;

/// `maxOccurs="unbounded"`
pub const UNBOUNDED: u64 = i64::MAX as u64;

/// Schema construct a class or attribute originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    /// xs:element
    Element,
    /// xs:attribute
    Attribute,
    /// xs:enumeration facet
    Enumeration,
    /// Value inherited from a simple base type
    Extension,
    /// xs:restriction of a simple type
    Restriction,
    /// xs:complexType
    ComplexType,
    /// xs:simpleType
    SimpleType,
    /// xs:group (definition or reference)
    Group,
    /// xs:attributeGroup (definition or reference)
    AttributeGroup,
    /// xs:any
    Any,
    /// xs:anyAttribute
    AnyAttribute,
    /// xs:list
    List,
    /// xs:union
    Union,
}

impl Tag {
    /// The XSD element name of this construct
    pub fn cname(&self) -> &'static str {
        match self {
            Tag::Element => "element",
            Tag::Attribute => "attribute",
            Tag::Enumeration => "enumeration",
            Tag::Extension => "extension",
            Tag::Restriction => "restriction",
            Tag::ComplexType => "complexType",
            Tag::SimpleType => "simpleType",
            Tag::Group => "group",
            Tag::AttributeGroup => "attributeGroup",
            Tag::Any => "any",
            Tag::AnyAttribute => "anyAttribute",
            Tag::List => "list",
            Tag::Union => "union",
        }
    }
}

/// A single restriction value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RestrictionValue {
    /// required
    Bool(bool),
    /// occurrences, lengths and digit counts
    Integer(u64),
    /// inclusive/exclusive bounds
    Decimal(f64),
    /// pattern and whiteSpace
    Text(String),
}

/// One schema-derived field of a generated class
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    /// Declared tag name
    pub name: String,
    /// Name used by generated code, defaults to `name`
    pub local_name: String,
    /// Data type name as written in the schema, e.g. `xs:string`
    pub type_name: String,
    /// Construct the attribute was derived from
    pub local_type: Tag,
    /// Alternative type name chosen by a writer
    pub type_alias: Option<String>,
    /// XML namespace of the attribute
    pub namespace: Option<String>,
    /// Documentation
    pub help: Option<String>,
    /// The referenced type is defined later (inner classes)
    pub forward_ref: bool,
    /// Default or fixed value
    pub default: Option<String>,

    pub required: Option<bool>,
    pub min_occurs: Option<u64>,
    pub max_occurs: Option<u64>,
    pub min_exclusive: Option<f64>,
    pub min_inclusive: Option<f64>,
    pub min_length: Option<u64>,
    pub max_exclusive: Option<f64>,
    pub max_inclusive: Option<f64>,
    pub max_length: Option<u64>,
    pub total_digits: Option<u64>,
    pub fraction_digits: Option<u64>,
    pub length: Option<u64>,
    pub white_space: Option<String>,
    pub pattern: Option<String>,
}

impl Attr {
    /// Create an attribute with an empty restriction set
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, local_type: Tag) -> Self {
        let name = name.into();
        Self {
            local_name: name.clone(),
            name,
            type_name: type_name.into(),
            local_type,
            type_alias: None,
            namespace: None,
            help: None,
            forward_ref: false,
            default: None,
            required: None,
            min_occurs: None,
            max_occurs: None,
            min_exclusive: None,
            min_inclusive: None,
            min_length: None,
            max_exclusive: None,
            max_inclusive: None,
            max_length: None,
            total_digits: None,
            fraction_digits: None,
            length: None,
            white_space: None,
            pattern: None,
        }
    }

    /// The restrictions that are actually set, absent ones are omitted
    pub fn restrictions(&self) -> IndexMap<&'static str, RestrictionValue> {
        use RestrictionValue::*;

        let candidates = [
            ("required", self.required.map(Bool)),
            ("min_occurs", self.min_occurs.map(Integer)),
            ("max_occurs", self.max_occurs.map(Integer)),
            ("min_exclusive", self.min_exclusive.map(Decimal)),
            ("max_exclusive", self.max_exclusive.map(Decimal)),
            ("min_inclusive", self.min_inclusive.map(Decimal)),
            ("max_inclusive", self.max_inclusive.map(Decimal)),
            ("min_length", self.min_length.map(Integer)),
            ("max_length", self.max_length.map(Integer)),
            ("length", self.length.map(Integer)),
            ("fraction_digits", self.fraction_digits.map(Integer)),
            ("pattern", self.pattern.clone().map(Text)),
            ("total_digits", self.total_digits.map(Integer)),
            ("white_space", self.white_space.clone().map(Text)),
        ];

        candidates
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect()
    }

    /// Whether the attribute may occur more than once
    pub fn is_list(&self) -> bool {
        self.max_occurs.map_or(false, |max| max > 1)
    }

    /// Whether the attribute is an enumeration member
    pub fn is_enumeration(&self) -> bool {
        self.local_type == Tag::Enumeration
    }
}

/// One generated type
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Declared name
    pub name: String,
    /// Name used by generated code, defaults to `name`
    pub local_name: String,
    /// Construct the class was derived from
    pub class_type: Tag,
    /// Standalone generatable type, as opposed to an auxiliary one
    pub is_root: bool,
    /// Target namespace of the declaring schema
    pub namespace: Option<String>,
    /// Documentation
    pub help: Option<String>,
    /// Base type names, in declaration order
    pub extensions: Vec<String>,
    /// Fields
    pub attrs: Vec<Attr>,
    /// Nested classes for anonymous complex types
    pub inner: Vec<Class>,
    /// Dotted package, set by the package assigner
    pub package: Option<String>,
}

impl Class {
    /// Create an empty class
    pub fn new(name: impl Into<String>, class_type: Tag, is_root: bool) -> Self {
        let name = name.into();
        Self {
            local_name: name.clone(),
            name,
            class_type,
            is_root,
            namespace: None,
            help: None,
            extensions: Vec::new(),
            attrs: Vec::new(),
            inner: Vec::new(),
            package: None,
        }
    }

    /// Whether this class models an enumeration
    pub fn is_enumeration(&self) -> bool {
        self.attrs.first().map_or(false, |attr| attr.is_enumeration())
    }
}

/// A resolved package reference used by import statements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Package {
    /// Dotted package name
    pub name: String,
    /// Identity of the originating definition, written as the generated
    /// name of the class `name` declares
    pub source: String,
    /// Local alias when `source` collides with another import
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

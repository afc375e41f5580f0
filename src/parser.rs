//! XSD and WSDL document parsing
//!
//! Turns raw document bytes into the abstract [`Schema`] and [`Definitions`]
//! trees. Referenced documents are not loaded here; inclusion edges are only
//! resolved to canonical URIs and recorded for the transformer to follow.

use tracing::warn;

use crate::documents::{Document, Element};
use crate::error::{ParseError, Result};
use crate::locations::LocationResolver;
use crate::namespaces::{SOAP12_NAMESPACE, SOAP_NAMESPACE, WSDL_NAMESPACE};
use crate::models::codegen::UNBOUNDED;
use crate::models::soap::{
    BindingStyle, SoapAddress, SoapBinding, SoapBody, SoapFault, SoapHeader, SoapHeaderFault,
    SoapOperation, UseChoice,
};
use crate::models::wsdl::{
    Binding, BindingMessage, BindingOperation, Definitions, Import, Message, Part, PortType,
    PortTypeMessage, PortTypeOperation, Service, ServicePort, Types,
};
use crate::models::xsd::{
    AttributeDecl, AttributeGroup, ComplexType, ElementDecl, Facets, Group, Particle,
    ReferenceKind, Schema, SchemaReference, SimpleType, SimpleVariety,
};

/// XSD element local names
mod xsd_elements {
    pub const SCHEMA: &str = "schema";
    pub const ELEMENT: &str = "element";
    pub const COMPLEX_TYPE: &str = "complexType";
    pub const SIMPLE_TYPE: &str = "simpleType";
    pub const ATTRIBUTE: &str = "attribute";
    pub const ATTRIBUTE_GROUP: &str = "attributeGroup";
    pub const GROUP: &str = "group";
    pub const SEQUENCE: &str = "sequence";
    pub const CHOICE: &str = "choice";
    pub const ALL: &str = "all";
    pub const ANNOTATION: &str = "annotation";
    pub const DOCUMENTATION: &str = "documentation";
    pub const RESTRICTION: &str = "restriction";
    pub const EXTENSION: &str = "extension";
    pub const LIST: &str = "list";
    pub const UNION: &str = "union";
    pub const COMPLEX_CONTENT: &str = "complexContent";
    pub const SIMPLE_CONTENT: &str = "simpleContent";
    pub const ANY: &str = "any";
    pub const ANY_ATTRIBUTE: &str = "anyAttribute";
    pub const ENUMERATION: &str = "enumeration";
}

/// XSD attribute names
mod xsd_attrs {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const REF: &str = "ref";
    pub const TARGET_NAMESPACE: &str = "targetNamespace";
    pub const NILLABLE: &str = "nillable";
    pub const DEFAULT: &str = "default";
    pub const FIXED: &str = "fixed";
    pub const BASE: &str = "base";
    pub const VALUE: &str = "value";
    pub const MIXED: &str = "mixed";
    pub const ABSTRACT: &str = "abstract";
    pub const NAMESPACE: &str = "namespace";
    pub const SCHEMA_LOCATION: &str = "schemaLocation";
    pub const ITEM_TYPE: &str = "itemType";
    pub const MEMBER_TYPES: &str = "memberTypes";
    pub const MIN_OCCURS: &str = "minOccurs";
    pub const MAX_OCCURS: &str = "maxOccurs";
    pub const USE: &str = "use";
}

/// WSDL element local names
mod wsdl_elements {
    pub const DEFINITIONS: &str = "definitions";
    pub const TYPES: &str = "types";
    pub const IMPORT: &str = "import";
    pub const MESSAGE: &str = "message";
    pub const PART: &str = "part";
    pub const PORT_TYPE: &str = "portType";
    pub const BINDING: &str = "binding";
    pub const OPERATION: &str = "operation";
    pub const INPUT: &str = "input";
    pub const OUTPUT: &str = "output";
    pub const FAULT: &str = "fault";
    pub const SERVICE: &str = "service";
    pub const PORT: &str = "port";
    pub const DOCUMENTATION: &str = "documentation";
}

/// SOAP binding extension local names
mod soap_elements {
    pub const BINDING: &str = "binding";
    pub const OPERATION: &str = "operation";
    pub const BODY: &str = "body";
    pub const HEADER: &str = "header";
    pub const HEADER_FAULT: &str = "headerfault";
    pub const FAULT: &str = "fault";
    pub const ADDRESS: &str = "address";
}

/// SOAP binding extension attribute names
mod soap_attrs {
    pub const STYLE: &str = "style";
    pub const TRANSPORT: &str = "transport";
    pub const SOAP_ACTION: &str = "soapAction";
    pub const SOAP_ACTION_REQUIRED: &str = "soapActionRequired";
    pub const PARTS: &str = "parts";
    pub const PART: &str = "part";
    pub const ENCODING_STYLE: &str = "encodingStyle";
    pub const LOCATION: &str = "location";
}

fn attr(elem: &Element, name: &str) -> Option<String> {
    elem.get_attribute(name).map(|s| s.to_string())
}

fn flag(elem: &Element, name: &str) -> bool {
    matches!(elem.get_attribute(name), Some("true") | Some("1"))
}

fn parse_number<T: std::str::FromStr>(elem: &Element, name: &str) -> Option<T> {
    elem.get_attribute(name).and_then(|v| v.trim().parse().ok())
}

fn parse_max_occurs(elem: &Element) -> Option<u64> {
    match elem.get_attribute(xsd_attrs::MAX_OCCURS) {
        Some("unbounded") => Some(UNBOUNDED),
        Some(v) => v.trim().parse().ok(),
        None => None,
    }
}

/// Text of the xs:annotation/xs:documentation children
fn documentation(elem: &Element) -> Option<String> {
    let text: Vec<String> = elem
        .find_children(xsd_elements::ANNOTATION)
        .flat_map(|a| a.find_children(xsd_elements::DOCUMENTATION))
        .map(|d| d.text_content().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text.join("\n"))
    }
}

/// Occurrence bounds of an enclosing compositor
#[derive(Debug, Clone, Copy)]
struct Occurs {
    min: u64,
    max: u64,
    choice: bool,
}

impl Occurs {
    const ONCE: Occurs = Occurs {
        min: 1,
        max: 1,
        choice: false,
    };

    fn nested(self, compositor: &Element) -> Occurs {
        let min = parse_number(compositor, xsd_attrs::MIN_OCCURS).unwrap_or(1);
        let max = parse_max_occurs(compositor).unwrap_or(1);
        Occurs {
            min: if self.optional() { 0 } else { min },
            max: multiply(self.max, max),
            choice: compositor.local_name() == xsd_elements::CHOICE,
        }
    }

    fn optional(&self) -> bool {
        self.choice || self.min == 0
    }

    fn apply(&self, min: Option<u64>, max: Option<u64>) -> (Option<u64>, Option<u64>) {
        let min = if self.optional() { Some(0) } else { min };
        let max = if self.max > 1 {
            Some(multiply(max.unwrap_or(1), self.max))
        } else {
            max
        };
        (min, max)
    }
}

fn multiply(a: u64, b: u64) -> u64 {
    if a >= UNBOUNDED || b >= UNBOUNDED {
        UNBOUNDED
    } else {
        a.saturating_mul(b).min(UNBOUNDED)
    }
}

/// Parses XSD documents into [`Schema`] trees
#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    target_namespace: Option<String>,
    location: Option<String>,
    resolver: LocationResolver,
}

impl SchemaParser {
    /// Create a parser for the document at `location`
    pub fn new(location: Option<String>) -> Self {
        Self {
            location,
            ..Default::default()
        }
    }

    /// Namespace to adopt when the document declares none
    pub fn with_target_namespace(mut self, namespace: Option<String>) -> Self {
        self.target_namespace = namespace;
        self
    }

    /// Resolver used for `schemaLocation` references
    pub fn with_resolver(mut self, resolver: LocationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Parse a schema document from bytes
    pub fn parse(&self, xml: &[u8]) -> Result<Schema> {
        let doc = Document::parse(xml)?;
        let root = doc.root().ok_or_else(|| self.error("Empty document"))?;
        self.parse_schema(root)
    }

    /// Parse an `xs:schema` element, e.g. one embedded in WSDL types
    pub fn parse_schema(&self, elem: &Element) -> Result<Schema> {
        if elem.local_name() != xsd_elements::SCHEMA {
            return Err(self
                .error(format!(
                    "Expected xs:schema root element, got {}",
                    elem.local_name()
                ))
                .into());
        }

        let mut schema = Schema {
            location: self.location.clone(),
            target_namespace: attr(elem, xsd_attrs::TARGET_NAMESPACE)
                .or_else(|| self.target_namespace.clone()),
            namespaces: elem.namespaces.clone(),
            ..Default::default()
        };

        for child in &elem.children {
            if let Some(kind) = ReferenceKind::from_element(child.local_name()) {
                schema.references.push(self.parse_reference(kind, child));
                if kind.redefines() {
                    for component in &child.children {
                        self.parse_component(&mut schema, component);
                    }
                }
            } else {
                self.parse_component(&mut schema, child);
            }
        }

        Ok(schema)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let err = ParseError::new(message);
        match self.location {
            Some(ref loc) => err.with_location(loc.clone()),
            None => err,
        }
    }

    fn parse_reference(&self, kind: ReferenceKind, elem: &Element) -> SchemaReference {
        let schema_location = attr(elem, xsd_attrs::SCHEMA_LOCATION);
        let location = schema_location.as_deref().and_then(|reference| {
            self.resolver
                .resolve(self.location.as_deref(), reference)
                .map_err(|e| warn!("Cannot resolve schemaLocation '{}': {}", reference, e))
                .ok()
        });

        SchemaReference {
            kind,
            location,
            schema_location,
            namespace: attr(elem, xsd_attrs::NAMESPACE),
        }
    }

    fn parse_component(&self, schema: &mut Schema, elem: &Element) {
        match elem.local_name() {
            xsd_elements::ELEMENT => schema.elements.push(parse_element(elem)),
            xsd_elements::ATTRIBUTE => schema.attributes.push(parse_attribute(elem)),
            xsd_elements::COMPLEX_TYPE => schema.complex_types.push(parse_complex_type(elem)),
            xsd_elements::SIMPLE_TYPE => schema.simple_types.push(parse_simple_type(elem)),
            xsd_elements::GROUP => schema.groups.push(parse_group(elem)),
            xsd_elements::ATTRIBUTE_GROUP => {
                schema.attribute_groups.push(parse_attribute_group(elem))
            }
            _ => {}
        }
    }
}

fn parse_element(elem: &Element) -> ElementDecl {
    ElementDecl {
        name: attr(elem, xsd_attrs::NAME),
        ref_name: attr(elem, xsd_attrs::REF),
        type_name: attr(elem, xsd_attrs::TYPE),
        min_occurs: parse_number(elem, xsd_attrs::MIN_OCCURS),
        max_occurs: parse_max_occurs(elem),
        default: attr(elem, xsd_attrs::DEFAULT),
        fixed: attr(elem, xsd_attrs::FIXED),
        nillable: flag(elem, xsd_attrs::NILLABLE),
        is_abstract: flag(elem, xsd_attrs::ABSTRACT),
        help: documentation(elem),
        complex_type: elem
            .find_child(xsd_elements::COMPLEX_TYPE)
            .map(|ct| Box::new(parse_complex_type(ct))),
        simple_type: elem
            .find_child(xsd_elements::SIMPLE_TYPE)
            .map(|st| Box::new(parse_simple_type(st))),
    }
}

fn parse_attribute(elem: &Element) -> AttributeDecl {
    AttributeDecl {
        name: attr(elem, xsd_attrs::NAME),
        ref_name: attr(elem, xsd_attrs::REF),
        type_name: attr(elem, xsd_attrs::TYPE),
        required: elem.get_attribute(xsd_attrs::USE) == Some("required"),
        default: attr(elem, xsd_attrs::DEFAULT),
        fixed: attr(elem, xsd_attrs::FIXED),
        help: documentation(elem),
        simple_type: elem.find_child(xsd_elements::SIMPLE_TYPE).map(parse_simple_type),
    }
}

fn parse_complex_type(elem: &Element) -> ComplexType {
    let mut complex_type = ComplexType {
        name: attr(elem, xsd_attrs::NAME),
        help: documentation(elem),
        mixed: flag(elem, xsd_attrs::MIXED),
        is_abstract: flag(elem, xsd_attrs::ABSTRACT),
        ..Default::default()
    };

    parse_content(elem, &mut complex_type);
    complex_type
}

/// Children shared by complexType and its extension/restriction elements
fn parse_content(elem: &Element, complex_type: &mut ComplexType) {
    for child in &elem.children {
        match child.local_name() {
            xsd_elements::SEQUENCE | xsd_elements::CHOICE | xsd_elements::ALL => {
                parse_particles(child, Occurs::ONCE.nested(child), &mut complex_type.particles)
            }
            xsd_elements::GROUP => {
                if let Some(p) = parse_group_ref(child, Occurs::ONCE) {
                    complex_type.particles.push(p);
                }
            }
            xsd_elements::ATTRIBUTE => complex_type.attributes.push(parse_attribute(child)),
            xsd_elements::ATTRIBUTE_GROUP => {
                if let Some(r) = child.get_attribute(xsd_attrs::REF) {
                    complex_type.attribute_groups.push(r.to_string());
                }
            }
            xsd_elements::ANY_ATTRIBUTE => complex_type.any_attribute = true,
            xsd_elements::COMPLEX_CONTENT | xsd_elements::SIMPLE_CONTENT => {
                complex_type.simple_content = child.local_name() == xsd_elements::SIMPLE_CONTENT;
                if flag(child, xsd_attrs::MIXED) {
                    complex_type.mixed = true;
                }
                for derivation in &child.children {
                    if matches!(
                        derivation.local_name(),
                        xsd_elements::EXTENSION | xsd_elements::RESTRICTION
                    ) {
                        complex_type.base = attr(derivation, xsd_attrs::BASE);
                        parse_content(derivation, complex_type);
                    }
                }
            }
            _ => {}
        }
    }
}

fn parse_group_ref(elem: &Element, occurs: Occurs) -> Option<Particle> {
    let ref_name = attr(elem, xsd_attrs::REF)?;
    let (min_occurs, max_occurs) =
        occurs.apply(parse_number(elem, xsd_attrs::MIN_OCCURS), parse_max_occurs(elem));
    Some(Particle::Group {
        ref_name,
        min_occurs,
        max_occurs,
    })
}

/// Flatten a compositor into `out`, folding its occurrence bounds into
/// those of its members
fn parse_particles(compositor: &Element, occurs: Occurs, out: &mut Vec<Particle>) {
    for child in &compositor.children {
        match child.local_name() {
            xsd_elements::ELEMENT => {
                let mut decl = parse_element(child);
                let (min, max) = occurs.apply(decl.min_occurs, decl.max_occurs);
                decl.min_occurs = min;
                decl.max_occurs = max;
                out.push(Particle::Element(decl));
            }
            xsd_elements::SEQUENCE | xsd_elements::CHOICE | xsd_elements::ALL => {
                parse_particles(child, occurs.nested(child), out)
            }
            xsd_elements::GROUP => {
                if let Some(p) = parse_group_ref(child, occurs) {
                    out.push(p);
                }
            }
            xsd_elements::ANY => {
                let (min_occurs, max_occurs) = occurs
                    .apply(parse_number(child, xsd_attrs::MIN_OCCURS), parse_max_occurs(child));
                out.push(Particle::Any {
                    namespace: attr(child, xsd_attrs::NAMESPACE),
                    min_occurs,
                    max_occurs,
                });
            }
            _ => {}
        }
    }
}

fn parse_simple_type(elem: &Element) -> SimpleType {
    let mut simple_type = SimpleType {
        name: attr(elem, xsd_attrs::NAME),
        help: documentation(elem),
        ..SimpleType::restriction(None)
    };

    for child in &elem.children {
        match child.local_name() {
            xsd_elements::RESTRICTION => {
                simple_type.base = attr(child, xsd_attrs::BASE);
                parse_facets(child, &mut simple_type);
            }
            xsd_elements::LIST => {
                simple_type.variety = SimpleVariety::List {
                    item_type: attr(child, xsd_attrs::ITEM_TYPE),
                };
            }
            xsd_elements::UNION => {
                simple_type.variety = SimpleVariety::Union {
                    member_types: child
                        .get_attribute(xsd_attrs::MEMBER_TYPES)
                        .map(|m| m.split_whitespace().map(str::to_string).collect())
                        .unwrap_or_default(),
                };
            }
            _ => {}
        }
    }

    simple_type
}

fn parse_facets(restriction: &Element, simple_type: &mut SimpleType) {
    let facets: &mut Facets = &mut simple_type.facets;
    let mut patterns = Vec::new();

    for facet in &restriction.children {
        let value = facet.get_attribute(xsd_attrs::VALUE);
        match facet.local_name() {
            xsd_elements::ENUMERATION => {
                if let Some(v) = value {
                    simple_type.enumerations.push(v.to_string());
                }
            }
            "pattern" => patterns.extend(value.map(str::to_string)),
            "whiteSpace" => facets.white_space = value.map(str::to_string),
            "minExclusive" => facets.min_exclusive = parse_number(facet, xsd_attrs::VALUE),
            "minInclusive" => facets.min_inclusive = parse_number(facet, xsd_attrs::VALUE),
            "maxExclusive" => facets.max_exclusive = parse_number(facet, xsd_attrs::VALUE),
            "maxInclusive" => facets.max_inclusive = parse_number(facet, xsd_attrs::VALUE),
            "minLength" => facets.min_length = parse_number(facet, xsd_attrs::VALUE),
            "maxLength" => facets.max_length = parse_number(facet, xsd_attrs::VALUE),
            "length" => facets.length = parse_number(facet, xsd_attrs::VALUE),
            "totalDigits" => facets.total_digits = parse_number(facet, xsd_attrs::VALUE),
            "fractionDigits" => facets.fraction_digits = parse_number(facet, xsd_attrs::VALUE),
            _ => {}
        }
    }

    if !patterns.is_empty() {
        facets.pattern = Some(patterns.join("|"));
    }
}

fn parse_group(elem: &Element) -> Group {
    let mut group = Group {
        name: attr(elem, xsd_attrs::NAME).unwrap_or_default(),
        help: documentation(elem),
        particles: Vec::new(),
    };

    for child in &elem.children {
        if matches!(
            child.local_name(),
            xsd_elements::SEQUENCE | xsd_elements::CHOICE | xsd_elements::ALL
        ) {
            parse_particles(child, Occurs::ONCE.nested(child), &mut group.particles);
        }
    }

    group
}

fn parse_attribute_group(elem: &Element) -> AttributeGroup {
    let mut group = AttributeGroup {
        name: attr(elem, xsd_attrs::NAME).unwrap_or_default(),
        help: documentation(elem),
        ..Default::default()
    };

    for child in &elem.children {
        match child.local_name() {
            xsd_elements::ATTRIBUTE => group.attributes.push(parse_attribute(child)),
            xsd_elements::ATTRIBUTE_GROUP => {
                if let Some(r) = child.get_attribute(xsd_attrs::REF) {
                    group.attribute_groups.push(r.to_string());
                }
            }
            xsd_elements::ANY_ATTRIBUTE => group.any_attribute = true,
            _ => {}
        }
    }

    group
}

/// Parses WSDL 1.1 documents into [`Definitions`] trees
#[derive(Debug, Clone, Default)]
pub struct DefinitionsParser {
    target_namespace: Option<String>,
    location: Option<String>,
    resolver: LocationResolver,
}

impl DefinitionsParser {
    /// Create a parser for the document at `location`
    pub fn new(location: Option<String>) -> Self {
        Self {
            location,
            ..Default::default()
        }
    }

    /// Namespace to adopt when the document declares none
    pub fn with_target_namespace(mut self, namespace: Option<String>) -> Self {
        self.target_namespace = namespace;
        self
    }

    /// Resolver used for import locations
    pub fn with_resolver(mut self, resolver: LocationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Parse a definitions document from bytes
    pub fn parse(&self, xml: &[u8]) -> Result<Definitions> {
        let doc = Document::parse(xml)?;
        let root = doc
            .root()
            .ok_or_else(|| self.error("Empty document"))?;

        if root.local_name() != wsdl_elements::DEFINITIONS {
            return Err(self
                .error(format!(
                    "Expected wsdl:definitions root element, got {}",
                    root.local_name()
                ))
                .into());
        }

        let mut definitions = Definitions {
            location: self.location.clone(),
            name: attr(root, xsd_attrs::NAME),
            target_namespace: attr(root, xsd_attrs::TARGET_NAMESPACE)
                .or_else(|| self.target_namespace.clone()),
            ..Default::default()
        };

        for child in &root.children {
            if child.namespace() != Some(WSDL_NAMESPACE) {
                definitions.extensible_elements.push(child.clone());
                continue;
            }
            match child.local_name() {
                wsdl_elements::TYPES => {
                    let types = definitions.types.get_or_insert_with(Types::default);
                    for schema in child.find_children(xsd_elements::SCHEMA) {
                        let parser = SchemaParser::new(self.location.clone())
                            .with_resolver(self.resolver.clone());
                        types.schemas.push(parser.parse_schema(schema)?);
                    }
                }
                wsdl_elements::IMPORT => definitions.imports.push(self.parse_import(child)),
                wsdl_elements::MESSAGE => definitions.messages.push(parse_message(child)),
                wsdl_elements::PORT_TYPE => definitions.port_types.push(parse_port_type(child)),
                wsdl_elements::BINDING => definitions.bindings.push(parse_binding(child)),
                wsdl_elements::SERVICE => definitions.services.push(parse_service(child)),
                wsdl_elements::DOCUMENTATION => {}
                _ => definitions.extensible_elements.push(child.clone()),
            }
        }

        Ok(definitions)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let err = ParseError::new(message);
        match self.location {
            Some(ref loc) => err.with_location(loc.clone()),
            None => err,
        }
    }

    fn parse_import(&self, elem: &Element) -> Import {
        let raw_location = attr(elem, "location");
        let location = raw_location.as_deref().and_then(|reference| {
            self.resolver
                .resolve(self.location.as_deref(), reference)
                .map_err(|e| warn!("Cannot resolve import location '{}': {}", reference, e))
                .ok()
        });

        Import {
            location,
            raw_location,
            namespace: attr(elem, xsd_attrs::NAMESPACE),
        }
    }
}

/// Whether `elem` is the WSDL 1.1 element `name`
fn is_wsdl(elem: &Element, name: &str) -> bool {
    elem.local_name() == name && elem.namespace() == Some(WSDL_NAMESPACE)
}

fn wsdl_children<'a>(elem: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    elem.children.iter().filter(move |c| is_wsdl(c, name))
}

fn wsdl_child<'a>(elem: &'a Element, name: &'a str) -> Option<&'a Element> {
    wsdl_children(elem, name).next()
}

/// Children outside the WSDL namespace
fn extensible(elem: &Element) -> Vec<Element> {
    elem.children
        .iter()
        .filter(|c| c.namespace() != Some(WSDL_NAMESPACE))
        .cloned()
        .collect()
}

fn is_soap(elem: &Element, name: &str) -> bool {
    elem.local_name() == name
        && matches!(elem.namespace(), Some(SOAP_NAMESPACE) | Some(SOAP12_NAMESPACE))
}

fn soap_children<'a>(
    extensions: &'a [Element],
    name: &'a str,
) -> impl Iterator<Item = &'a Element> {
    extensions.iter().filter(move |e| is_soap(e, name))
}

fn soap_child<'a>(extensions: &'a [Element], name: &'a str) -> Option<&'a Element> {
    soap_children(extensions, name).next()
}

fn binding_style(elem: &Element) -> BindingStyle {
    elem.get_attribute(soap_attrs::STYLE)
        .and_then(BindingStyle::parse)
        .unwrap_or_default()
}

fn use_choice(elem: &Element) -> UseChoice {
    elem.get_attribute(xsd_attrs::USE)
        .and_then(UseChoice::parse)
        .unwrap_or_default()
}

fn parse_soap_operation(elem: &Element) -> SoapOperation {
    SoapOperation {
        action: attr(elem, soap_attrs::SOAP_ACTION),
        style: binding_style(elem),
        transport: attr(elem, soap_attrs::TRANSPORT),
        action_required: !matches!(
            elem.get_attribute(soap_attrs::SOAP_ACTION_REQUIRED),
            Some("false") | Some("0")
        ),
    }
}

fn parse_soap_body(elem: &Element) -> SoapBody {
    SoapBody {
        use_choice: use_choice(elem),
        parts: attr(elem, soap_attrs::PARTS),
        namespace: attr(elem, xsd_attrs::NAMESPACE),
        encoding_style: attr(elem, soap_attrs::ENCODING_STYLE),
    }
}

fn parse_soap_header(elem: &Element) -> SoapHeader {
    SoapHeader {
        use_choice: use_choice(elem),
        part: attr(elem, soap_attrs::PART),
        message: attr(elem, wsdl_elements::MESSAGE),
        namespace: attr(elem, xsd_attrs::NAMESPACE),
        encoding_style: attr(elem, soap_attrs::ENCODING_STYLE),
        faults: soap_children(&elem.children, soap_elements::HEADER_FAULT)
            .map(|f| SoapHeaderFault {
                use_choice: use_choice(f),
                name: attr(f, xsd_attrs::NAME),
                part: attr(f, soap_attrs::PART),
                namespace: attr(f, xsd_attrs::NAMESPACE),
                encoding_style: attr(f, soap_attrs::ENCODING_STYLE),
            })
            .collect(),
    }
}

fn parse_soap_fault(elem: &Element) -> SoapFault {
    SoapFault {
        use_choice: use_choice(elem),
        name: attr(elem, xsd_attrs::NAME),
        namespace: attr(elem, xsd_attrs::NAMESPACE),
        encoding_style: attr(elem, soap_attrs::ENCODING_STYLE),
    }
}

fn parse_message(elem: &Element) -> Message {
    Message {
        name: attr(elem, xsd_attrs::NAME),
        parts: wsdl_children(elem, wsdl_elements::PART)
            .map(|p| Part {
                name: attr(p, xsd_attrs::NAME),
                type_name: attr(p, xsd_attrs::TYPE),
                element: attr(p, xsd_elements::ELEMENT),
            })
            .collect(),
    }
}

fn parse_port_type_message(elem: &Element) -> PortTypeMessage {
    PortTypeMessage {
        name: attr(elem, xsd_attrs::NAME),
        message: attr(elem, wsdl_elements::MESSAGE),
    }
}

fn parse_port_type(elem: &Element) -> PortType {
    PortType {
        name: attr(elem, xsd_attrs::NAME),
        operations: wsdl_children(elem, wsdl_elements::OPERATION)
            .map(|op| PortTypeOperation {
                name: attr(op, xsd_attrs::NAME),
                input: wsdl_child(op, wsdl_elements::INPUT).map(parse_port_type_message),
                output: wsdl_child(op, wsdl_elements::OUTPUT).map(parse_port_type_message),
                faults: wsdl_children(op, wsdl_elements::FAULT)
                    .map(parse_port_type_message)
                    .collect(),
            })
            .collect(),
        extensible_elements: extensible(elem),
    }
}

fn parse_binding_message(elem: &Element) -> BindingMessage {
    let extensible_elements = extensible(elem);
    BindingMessage {
        name: attr(elem, xsd_attrs::NAME),
        soap_body: soap_child(&extensible_elements, soap_elements::BODY).map(parse_soap_body),
        soap_headers: soap_children(&extensible_elements, soap_elements::HEADER)
            .map(parse_soap_header)
            .collect(),
        soap_fault: soap_child(&extensible_elements, soap_elements::FAULT).map(parse_soap_fault),
        extensible_elements,
    }
}

fn parse_binding_operation(op: &Element) -> BindingOperation {
    let extensible_elements = extensible(op);
    BindingOperation {
        name: attr(op, xsd_attrs::NAME),
        input: wsdl_child(op, wsdl_elements::INPUT).map(parse_binding_message),
        output: wsdl_child(op, wsdl_elements::OUTPUT).map(parse_binding_message),
        faults: wsdl_children(op, wsdl_elements::FAULT)
            .map(parse_binding_message)
            .collect(),
        soap_operation: soap_child(&extensible_elements, soap_elements::OPERATION)
            .map(parse_soap_operation),
        extensible_elements,
    }
}

fn parse_binding(elem: &Element) -> Binding {
    let extensible_elements = extensible(elem);
    Binding {
        name: attr(elem, xsd_attrs::NAME),
        type_name: attr(elem, xsd_attrs::TYPE),
        operations: wsdl_children(elem, wsdl_elements::OPERATION)
            .map(parse_binding_operation)
            .collect(),
        soap_binding: soap_child(&extensible_elements, soap_elements::BINDING).map(|b| {
            SoapBinding {
                style: binding_style(b),
                transport: attr(b, soap_attrs::TRANSPORT),
            }
        }),
        extensible_elements,
    }
}

fn parse_service(elem: &Element) -> Service {
    Service {
        name: attr(elem, xsd_attrs::NAME),
        ports: wsdl_children(elem, wsdl_elements::PORT)
            .map(|port| {
                let extensible_elements = extensible(port);
                ServicePort {
                    name: attr(port, xsd_attrs::NAME),
                    binding: attr(port, wsdl_elements::BINDING),
                    soap_address: soap_child(&extensible_elements, soap_elements::ADDRESS)
                        .map(|a| SoapAddress {
                            location: attr(a, soap_attrs::LOCATION),
                        }),
                    extensible_elements,
                }
            })
            .collect(),
    }
}

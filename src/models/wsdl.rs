//! WSDL 1.1 definitions tree
//!
//! Service metadata is carried along so imports can be merged into the root
//! definitions; only the inline schemas in `types` produce classes.

use crate::documents::Element;
use crate::models::soap::{SoapAddress, SoapBinding, SoapBody, SoapFault, SoapHeader, SoapOperation};
use crate::models::xsd::Schema;

/// wsdl:types
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Types {
    /// Inline schemas
    pub schemas: Vec<Schema>,
}

/// wsdl:import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Import {
    /// Resolved URI of the imported definitions
    pub location: Option<String>,
    /// `location` as written in the document
    pub raw_location: Option<String>,
    /// Declared namespace
    pub namespace: Option<String>,
}

/// wsdl:part
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Part {
    pub name: Option<String>,
    pub type_name: Option<String>,
    pub element: Option<String>,
}

/// wsdl:message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub name: Option<String>,
    pub parts: Vec<Part>,
}

/// input/output/fault of a port type operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortTypeMessage {
    pub name: Option<String>,
    pub message: Option<String>,
}

/// wsdl:portType/operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortTypeOperation {
    pub name: Option<String>,
    pub input: Option<PortTypeMessage>,
    pub output: Option<PortTypeMessage>,
    pub faults: Vec<PortTypeMessage>,
}

/// wsdl:portType
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortType {
    pub name: Option<String>,
    pub operations: Vec<PortTypeOperation>,
    pub extensible_elements: Vec<Element>,
}

/// input/output/fault of a binding operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingMessage {
    pub name: Option<String>,
    pub soap_body: Option<SoapBody>,
    pub soap_headers: Vec<SoapHeader>,
    pub soap_fault: Option<SoapFault>,
    pub extensible_elements: Vec<Element>,
}

/// wsdl:binding/operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingOperation {
    pub name: Option<String>,
    pub input: Option<BindingMessage>,
    pub output: Option<BindingMessage>,
    pub faults: Vec<BindingMessage>,
    pub soap_operation: Option<SoapOperation>,
    pub extensible_elements: Vec<Element>,
}

/// wsdl:binding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binding {
    pub name: Option<String>,
    pub type_name: Option<String>,
    pub operations: Vec<BindingOperation>,
    pub soap_binding: Option<SoapBinding>,
    pub extensible_elements: Vec<Element>,
}

/// wsdl:service/port
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicePort {
    pub name: Option<String>,
    pub binding: Option<String>,
    pub soap_address: Option<SoapAddress>,
    pub extensible_elements: Vec<Element>,
}

/// wsdl:service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    pub name: Option<String>,
    pub ports: Vec<ServicePort>,
}

/// wsdl:definitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions {
    /// Canonical URI of the document
    pub location: Option<String>,
    pub name: Option<String>,
    pub target_namespace: Option<String>,
    pub types: Option<Types>,
    pub imports: Vec<Import>,
    pub messages: Vec<Message>,
    pub port_types: Vec<PortType>,
    pub bindings: Vec<Binding>,
    pub services: Vec<Service>,
    /// Children not covered by WSDL 1.1 itself
    pub extensible_elements: Vec<Element>,
}

impl Definitions {
    /// Merge imported definitions into these.
    ///
    /// Inline schemas are adopted wholesale when there are none yet and
    /// appended otherwise; every other list is concatenated in order.
    pub fn merge(&mut self, source: Definitions) {
        if let Some(types) = source.types {
            match self.types {
                Some(ref mut own) => own.schemas.extend(types.schemas),
                None => self.types = Some(types),
            }
        }

        self.messages.extend(source.messages);
        self.port_types.extend(source.port_types);
        self.bindings.extend(source.bindings);
        self.services.extend(source.services);
        self.extensible_elements.extend(source.extensible_elements);
    }

    /// Inline schemas, if any
    pub fn schemas(&self) -> &[Schema] {
        match &self.types {
            Some(types) => &types.schemas,
            None => &[],
        }
    }
}

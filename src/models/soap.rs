//! SOAP 1.1/1.2 binding extensions
//!
//! Typed views of the `soap:` and `soap12:` elements found inside WSDL
//! bindings and service ports.

/// `style` of a binding or operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingStyle {
    #[default]
    Document,
    Rpc,
}

impl BindingStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "document" => Some(Self::Document),
            "rpc" => Some(Self::Rpc),
            _ => None,
        }
    }
}

/// `use` of a body, header or fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UseChoice {
    #[default]
    Literal,
    Encoded,
}

impl UseChoice {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "literal" => Some(Self::Literal),
            "encoded" => Some(Self::Encoded),
            _ => None,
        }
    }
}

/// soap:binding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoapBinding {
    pub style: BindingStyle,
    pub transport: Option<String>,
}

/// soap:operation
#[derive(Debug, Clone, PartialEq)]
pub struct SoapOperation {
    /// soapAction
    pub action: Option<String>,
    pub style: BindingStyle,
    /// SOAP 1.1 only
    pub transport: Option<String>,
    /// soapActionRequired, SOAP 1.2 only
    pub action_required: bool,
}

impl Default for SoapOperation {
    fn default() -> Self {
        Self {
            action: None,
            style: BindingStyle::Document,
            transport: None,
            action_required: true,
        }
    }
}

/// soap:body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoapBody {
    pub use_choice: UseChoice,
    pub parts: Option<String>,
    pub namespace: Option<String>,
    pub encoding_style: Option<String>,
}

/// soap:headerfault
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoapHeaderFault {
    pub use_choice: UseChoice,
    pub name: Option<String>,
    pub part: Option<String>,
    pub namespace: Option<String>,
    pub encoding_style: Option<String>,
}

/// soap:header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoapHeader {
    pub use_choice: UseChoice,
    pub part: Option<String>,
    pub message: Option<String>,
    pub namespace: Option<String>,
    pub encoding_style: Option<String>,
    pub faults: Vec<SoapHeaderFault>,
}

/// soap:fault
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoapFault {
    pub use_choice: UseChoice,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub encoding_style: Option<String>,
}

/// soap:address
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoapAddress {
    pub location: Option<String>,
}

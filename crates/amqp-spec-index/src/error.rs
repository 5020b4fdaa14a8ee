// crates/amqp-spec-index/src/error.rs

use alloc::fmt;
use alloc::string::String;
use core::str::Utf8Error;
use hex::FromHexError;
use quick_xml::Error as XmlError;

/// Errors that can occur while loading and indexing type definitions.
///
/// Every variant is fatal for the load: no partial `ModelSnapshot` is ever
/// produced once one of these has been returned.
#[derive(Debug)]
pub enum DefinitionError {
    /// An error from the underlying `quick-xml` reader (malformed markup).
    XmlParsing(XmlError),

    /// A tag or attribute name was not valid UTF-8.
    Utf8(Utf8Error),

    /// A tag used a namespace prefix that was never declared.
    UnboundPrefix { prefix: String },

    /// The document ended while an element was still open.
    UnclosedElement { tag: String },

    /// A required XML element was missing (e.g., the document root).
    MissingElement { element: &'static str },

    /// A required attribute was missing (e.g., `<type>` without `@name`).
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// A descriptor code half contained invalid hex.
    HexParsing(FromHexError),

    /// A descriptor code did not have the `0xDDDDDDDD:0xIIIIIIII` shape, or
    /// carried digits that the fixed prefix cut would drop.
    InvalidDescriptorCode { code: String },

    /// A code could not be read as a hex number (numeric code ordering only).
    InvalidCode { code: String },

    /// Two primitive encodings computed the same type name.
    DuplicateEncoding { type_name: String },

    /// Two described types share the same long name.
    DuplicateDescribed { long_name: String },

    /// Two enumerated types share the same long name (strict mode only).
    DuplicateEnumerated { long_name: String },
}

impl From<XmlError> for DefinitionError {
    fn from(e: XmlError) -> Self {
        DefinitionError::XmlParsing(e)
    }
}

impl From<Utf8Error> for DefinitionError {
    fn from(e: Utf8Error) -> Self {
        DefinitionError::Utf8(e)
    }
}

impl From<FromHexError> for DefinitionError {
    fn from(e: FromHexError) -> Self {
        DefinitionError::HexParsing(e)
    }
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            DefinitionError::Utf8(e) => write!(f, "Invalid UTF-8 in XML name: {}", e),
            DefinitionError::UnboundPrefix { prefix } => {
                write!(f, "Undeclared namespace prefix: {}", prefix)
            }
            DefinitionError::UnclosedElement { tag } => {
                write!(f, "Document ended inside element: {}", tag)
            }
            DefinitionError::MissingElement { element } => {
                write!(f, "Missing required XML element: {}", element)
            }
            DefinitionError::MissingAttribute { element, attribute } => {
                write!(f, "Missing required attribute @{} on <{}>", attribute, element)
            }
            DefinitionError::HexParsing(e) => write!(f, "Hex parsing error: {}", e),
            DefinitionError::InvalidDescriptorCode { code } => {
                write!(f, "Invalid descriptor code: '{}'", code)
            }
            DefinitionError::InvalidCode { code } => {
                write!(f, "Code is not a hex number: '{}'", code)
            }
            DefinitionError::DuplicateEncoding { type_name } => {
                write!(f, "duplicate encoding type name: '{}'", type_name)
            }
            DefinitionError::DuplicateDescribed { long_name } => {
                write!(f, "duplicate described type: '{}'", long_name)
            }
            DefinitionError::DuplicateEnumerated { long_name } => {
                write!(f, "duplicate enumerated type: '{}'", long_name)
            }
        }
    }
}

impl core::error::Error for DefinitionError {}

#[cfg(test)]
mod tests {
    use super::DefinitionError;
    use alloc::string::ToString;

    #[test]
    fn test_from_xml_error() {
        // A mismatched end tag is rejected by the reader itself
        let mut reader = quick_xml::Reader::from_str("<a></b>");
        let xml_err = loop {
            match reader.read_event() {
                Err(e) => break e,
                Ok(quick_xml::events::Event::Eof) => panic!("expected a mismatched end tag"),
                Ok(_) => {}
            }
        };
        let err: DefinitionError = xml_err.into();
        assert!(matches!(err, DefinitionError::XmlParsing(_)));
    }

    #[test]
    fn test_from_hex_error() {
        let hex_err = hex::decode("Z").unwrap_err();
        let err: DefinitionError = hex_err.into();
        assert!(matches!(err, DefinitionError::HexParsing(_)));
    }

    #[test]
    fn test_from_utf8_error() {
        let bytes = [0xffu8, 0xfe];
        let utf8_err = core::str::from_utf8(&bytes).unwrap_err();
        let err: DefinitionError = utf8_err.into();
        assert!(matches!(err, DefinitionError::Utf8(_)));
    }

    #[test]
    fn test_duplicate_messages_name_the_offender() {
        let err = DefinitionError::DuplicateEncoding {
            type_name: "boolean:true".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate encoding type name: 'boolean:true'");

        let err = DefinitionError::DuplicateDescribed {
            long_name: "transport:performatives open".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate described type: 'transport:performatives open'"
        );
    }

    #[test]
    fn test_missing_attribute_message() {
        let err = DefinitionError::MissingAttribute {
            element: "type",
            attribute: "name",
        };
        assert_eq!(err.to_string(), "Missing required attribute @name on <type>");
    }
}

// crates/amqp-spec-index/src/types.rs

//! Public, typed records for the loaded type definitions.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::Serialize;

/// The three mutually exclusive kinds of type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// `class="primitive"`: a fixed wire encoding, possibly several alternatives.
    Primitive,
    /// Carries a `<descriptor>` and zero or more `<field>`s.
    Described,
    /// Anything else: defined by a closed set of `<choice>`s (possibly empty).
    Enumerated,
}

/// One `<type>` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDef {
    /// `@name`
    pub name: String,
    /// Assigned once, at classification.
    pub category: Category,
    /// `"<document name>:<section name>"`, e.g. `"transport:performatives"`.
    pub section_path: String,
    /// `@class` (`primitive`, `composite`, `restricted`)
    pub class: Option<String>,
    /// `@source`
    pub source: Option<String>,
    /// `@label`
    pub label: Option<String>,
    /// `@provides`, as written. See [`TypeDef::capabilities`].
    pub provides: Option<String>,
    /// Present only for `Described` types.
    pub descriptor: Option<Descriptor>,
    pub fields: Vec<Field>,
    pub choices: Vec<Choice>,
    /// Present only for `Primitive` types.
    pub encodings: Vec<Encoding>,
}

impl TypeDef {
    /// The display/lookup key: section path and bare name, space separated.
    pub fn long_name(&self) -> String {
        format!("{} {}", self.section_path, self.name)
    }

    /// Every capability named in `@provides`.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.provides.as_deref().into_iter().flat_map(split_capabilities)
    }
}

/// A `<descriptor>`: the (name, code) pair identifying a described type on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// `@name`, e.g. `"amqp:open:list"`
    pub name: String,
    /// `@code` as written, e.g. `"0x00000000:0x00000010"`
    pub code: String,
    /// High half of the code, decoded.
    pub domain_id: u32,
    /// Low half of the code, decoded.
    pub descriptor_id: u32,
}

impl Descriptor {
    /// The full 64-bit descriptor value (`domain_id << 32 | descriptor_id`).
    pub fn numeric_code(&self) -> u64 {
        (u64::from(self.domain_id) << 32) | u64::from(self.descriptor_id)
    }
}

/// A `<field>` of a described type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Field {
    pub name: String,
    /// `@type`: the referenced type name, unresolved.
    #[serde(rename = "type")]
    pub type_name: String,
    pub requires: Option<String>,
    pub default: Option<String>,
    pub label: Option<String>,
    pub mandatory: bool,
    pub multiple: bool,
}

impl Field {
    /// Every capability named in `@requires`.
    pub fn required_capabilities(&self) -> impl Iterator<Item = &str> {
        self.requires.as_deref().into_iter().flat_map(split_capabilities)
    }
}

/// A `<choice>` of an enumerated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

/// An `<encoding>` of a primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Encoding {
    /// `@name`; when absent the owning type's name identifies the encoding.
    pub name: Option<String>,
    /// `@code`, e.g. `"0x41"`
    pub code: String,
    /// `@category` (`fixed`, `variable`, `compound`, `array`)
    pub category: Option<String>,
    /// `@width` in bytes
    pub width: Option<String>,
    pub label: Option<String>,
}

impl Encoding {
    /// `owner` alone, or `owner:name` when the encoding is named.
    pub fn type_name(&self, owner: &str) -> String {
        match &self.name {
            Some(name) => format!("{}:{}", owner, name),
            None => String::from(owner),
        }
    }
}

/// Splits a `provides`/`requires` attribute into its capability names.
pub(crate) fn split_capabilities(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_encoding_type_name() {
        let named = Encoding {
            name: Some("true".to_string()),
            code: "0x41".to_string(),
            ..Default::default()
        };
        let unnamed = Encoding {
            code: "0x56".to_string(),
            ..Default::default()
        };
        assert_eq!(named.type_name("boolean"), "boolean:true");
        assert_eq!(unnamed.type_name("boolean"), "boolean");
    }

    #[test]
    fn test_capabilities_split_on_commas() {
        let ty = TypeDef {
            name: "accepted".to_string(),
            category: Category::Described,
            section_path: "messaging:delivery-state".to_string(),
            class: Some("composite".to_string()),
            source: Some("list".to_string()),
            label: None,
            provides: Some("delivery-state, outcome".to_string()),
            descriptor: None,
            fields: vec![],
            choices: vec![],
            encodings: vec![],
        };
        let caps: Vec<_> = ty.capabilities().collect();
        assert_eq!(caps, ["delivery-state", "outcome"]);
        assert_eq!(ty.long_name(), "messaging:delivery-state accepted");
    }

    #[test]
    fn test_required_capabilities() {
        let field = Field {
            name: "address".to_string(),
            type_name: "*".to_string(),
            requires: Some("address".to_string()),
            ..Default::default()
        };
        assert_eq!(field.required_capabilities().collect::<Vec<_>>(), ["address"]);
        assert_eq!(Field::default().required_capabilities().count(), 0);
    }

    #[test]
    fn test_descriptor_numeric_code() {
        let descriptor = Descriptor {
            name: "amqp:open:list".to_string(),
            code: "0x00000000:0x00000010".to_string(),
            domain_id: 0,
            descriptor_id: 0x10,
        };
        assert_eq!(descriptor.numeric_code(), 0x10);
    }
}

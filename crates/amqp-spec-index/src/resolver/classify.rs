// crates/amqp-spec-index/src/resolver/classify.rs

//! Turns `<type>` elements into typed `TypeDef`s and sorts them into categories.

use crate::error::DefinitionError;
use crate::model::Element;
use crate::resolver::provides::CapabilityIndex;
use crate::resolver::utils::{decode_descriptor_code, flag, optional, required};
use crate::types::{Category, Choice, Descriptor, Encoding, Field, TypeDef};
use alloc::format;
use alloc::vec::Vec;
use log::{debug, trace};

/// Everything classification produces, across all documents loaded so far.
///
/// `types` is the `All` collection; the category lists hold positions into it.
#[derive(Debug, Default)]
pub(crate) struct Classification {
    pub(crate) types: Vec<TypeDef>,
    pub(crate) primitive: Vec<usize>,
    pub(crate) described: Vec<usize>,
    pub(crate) enumerated: Vec<usize>,
    pub(crate) provides: CapabilityIndex<usize>,
}

impl Classification {
    /// Appends one classified type and registers what it provides.
    pub(crate) fn push(&mut self, type_def: TypeDef) {
        let id = self.types.len();
        match type_def.category {
            Category::Primitive => self.primitive.push(id),
            Category::Described => self.described.push(id),
            Category::Enumerated => self.enumerated.push(id),
        }
        for capability in type_def.capabilities() {
            self.provides.register(capability, id);
        }
        self.types.push(type_def);
    }
}

/// Parses every `<section>/<type>` of a (namespace-free) document root, in
/// document order.
///
/// Nothing is kept if any type fails to parse.
pub(crate) fn classify_document(root: &Element) -> Result<Vec<TypeDef>, DefinitionError> {
    let document_name = required(root, "amqp", "name")?;
    let mut types = Vec::new();

    for section in root.find_all("section") {
        let section_name = required(section, "section", "name")?;
        let section_path = format!("{}:{}", document_name, section_name);
        debug!("Classifying section {}", section_path);

        for type_element in section.find_all("type") {
            let type_def = parse_type(type_element, &section_path)?;
            trace!(
                "{} {} -> {:?}",
                type_def.section_path, type_def.name, type_def.category
            );
            types.push(type_def);
        }
    }

    Ok(types)
}

/// Decides the category from the element's shape.
fn categorize(element: &Element) -> Category {
    if element.attribute("class") == Some("primitive") {
        Category::Primitive
    } else if element.find("descriptor").is_some() {
        Category::Described
    } else {
        Category::Enumerated
    }
}

/// Parses a `<type>` element and its children into a `TypeDef`.
fn parse_type(element: &Element, section_path: &str) -> Result<TypeDef, DefinitionError> {
    let name = required(element, "type", "name")?;
    let category = categorize(element);

    // Each child kind belongs to one category; elsewhere it is ignored.
    let mut descriptor = None;
    let mut fields = Vec::new();
    let mut choices = Vec::new();
    let mut encodings = Vec::new();
    match category {
        Category::Primitive => {
            encodings = element
                .find_all("encoding")
                .map(parse_encoding)
                .collect::<Result<Vec<_>, _>>()?;
        }
        Category::Described => {
            descriptor = element.find("descriptor").map(parse_descriptor).transpose()?;
            fields = element
                .find_all("field")
                .map(parse_field)
                .collect::<Result<Vec<_>, _>>()?;
        }
        Category::Enumerated => {
            choices = element
                .find_all("choice")
                .map(parse_choice)
                .collect::<Result<Vec<_>, _>>()?;
        }
    }

    Ok(TypeDef {
        name,
        category,
        section_path: section_path.into(),
        class: optional(element, "class"),
        source: optional(element, "source"),
        label: optional(element, "label"),
        provides: optional(element, "provides"),
        descriptor,
        fields,
        choices,
        encodings,
    })
}

fn parse_descriptor(element: &Element) -> Result<Descriptor, DefinitionError> {
    let code = required(element, "descriptor", "code")?;
    let (domain_id, descriptor_id) = decode_descriptor_code(&code)?;
    Ok(Descriptor {
        name: required(element, "descriptor", "name")?,
        code,
        domain_id,
        descriptor_id,
    })
}

fn parse_field(element: &Element) -> Result<Field, DefinitionError> {
    Ok(Field {
        name: required(element, "field", "name")?,
        type_name: required(element, "field", "type")?,
        requires: optional(element, "requires"),
        default: optional(element, "default"),
        label: optional(element, "label"),
        mandatory: flag(element, "mandatory"),
        multiple: flag(element, "multiple"),
    })
}

fn parse_choice(element: &Element) -> Result<Choice, DefinitionError> {
    Ok(Choice {
        name: required(element, "choice", "name")?,
        value: required(element, "choice", "value")?,
    })
}

fn parse_encoding(element: &Element) -> Result<Encoding, DefinitionError> {
    Ok(Encoding {
        name: optional(element, "name"),
        code: required(element, "encoding", "code")?,
        category: optional(element, "category"),
        width: optional(element, "width"),
        label: optional(element, "label"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ty(name: &str) -> Element {
        Element::new("type").with_attribute("name", name)
    }

    fn document(types: Vec<Element>) -> Element {
        let section = types
            .into_iter()
            .fold(Element::new("section").with_attribute("name", "sec"), Element::with_child);
        Element::new("amqp")
            .with_attribute("name", "doc")
            .with_child(section)
    }

    #[test]
    fn test_categorize_by_shape() {
        let primitive = ty("uint").with_attribute("class", "primitive");
        let described = ty("open")
            .with_attribute("class", "composite")
            .with_child(Element::new("descriptor"));
        let enumerated = ty("role").with_attribute("class", "restricted");
        // class="primitive" wins over a descriptor
        let odd = ty("odd")
            .with_attribute("class", "primitive")
            .with_child(Element::new("descriptor"));

        assert_eq!(categorize(&primitive), Category::Primitive);
        assert_eq!(categorize(&described), Category::Described);
        assert_eq!(categorize(&enumerated), Category::Enumerated);
        assert_eq!(categorize(&odd), Category::Primitive);
    }

    #[test]
    fn test_classify_document_sets_section_path_and_order() {
        let root = document(vec![
            ty("null").with_attribute("class", "primitive"),
            ty("role").with_child(
                Element::new("choice")
                    .with_attribute("name", "sender")
                    .with_attribute("value", "false"),
            ),
            ty("open").with_child(
                Element::new("descriptor")
                    .with_attribute("name", "amqp:open:list")
                    .with_attribute("code", "0x00000000:0x00000010"),
            ),
        ]);

        let types = classify_document(&root).unwrap();
        let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["null", "role", "open"]);
        assert!(types.iter().all(|t| t.section_path == "doc:sec"));
        assert_eq!(types[1].choices[0].name, "sender");

        let descriptor = types[2].descriptor.as_ref().unwrap();
        assert_eq!(descriptor.descriptor_id, 0x10);
        assert_eq!(descriptor.name, "amqp:open:list");
    }

    #[test]
    fn test_non_type_children_are_ignored() {
        let root = document(vec![ty("seconds")])
            .with_child(Element::new("doc"));
        let types = classify_document(&root).unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].category, Category::Enumerated);
        assert!(types[0].choices.is_empty());
    }

    #[test]
    fn test_missing_required_attributes_fail_fast() {
        let no_root_name = Element::new("amqp");
        assert!(matches!(
            classify_document(&no_root_name),
            Err(DefinitionError::MissingAttribute {
                element: "amqp",
                attribute: "name"
            })
        ));

        let no_type_name = document(vec![Element::new("type")]);
        assert!(matches!(
            classify_document(&no_type_name),
            Err(DefinitionError::MissingAttribute {
                element: "type",
                attribute: "name"
            })
        ));

        let no_code = document(vec![
            ty("null")
                .with_attribute("class", "primitive")
                .with_child(Element::new("encoding").with_attribute("name", "x")),
        ]);
        assert!(matches!(
            classify_document(&no_code),
            Err(DefinitionError::MissingAttribute {
                element: "encoding",
                attribute: "code"
            })
        ));
    }

    #[test]
    fn test_children_only_kept_for_owning_category() {
        let encoding = || Element::new("encoding").with_attribute("code", "0x40");
        let field = || {
            Element::new("field")
                .with_attribute("name", "f")
                .with_attribute("type", "uint")
        };
        let choice = || {
            Element::new("choice")
                .with_attribute("name", "c")
                .with_attribute("value", "0")
        };
        let root = document(vec![
            ty("null")
                .with_attribute("class", "primitive")
                .with_child(encoding())
                .with_child(field())
                .with_child(choice()),
            ty("open")
                .with_child(
                    Element::new("descriptor")
                        .with_attribute("name", "amqp:open:list")
                        .with_attribute("code", "0x00000000:0x00000010"),
                )
                .with_child(encoding())
                .with_child(field())
                .with_child(choice()),
            ty("role")
                .with_child(encoding())
                .with_child(field())
                .with_child(choice()),
        ]);

        let types = classify_document(&root).unwrap();
        let shape: Vec<_> = types
            .iter()
            .map(|t| (t.category, t.encodings.len(), t.fields.len(), t.choices.len()))
            .collect();
        assert_eq!(
            shape,
            [
                (Category::Primitive, 1, 0, 0),
                (Category::Described, 0, 1, 0),
                (Category::Enumerated, 0, 0, 1),
            ]
        );
        assert!(types[0].descriptor.is_none());
        assert!(types[2].descriptor.is_none());
    }

    #[test]
    fn test_field_defaults() {
        let field = parse_field(
            &Element::new("field")
                .with_attribute("name", "max-frame-size")
                .with_attribute("type", "uint")
                .with_attribute("default", "4294967295"),
        )
        .unwrap();
        assert_eq!(field.default.as_deref(), Some("4294967295"));
        assert_eq!(field.requires, None);
        assert!(!field.mandatory);
        assert!(!field.multiple);
    }

    #[test]
    fn test_classification_registers_provides() {
        let mut classification = Classification::default();
        let root = document(vec![
            ty("accepted").with_attribute("provides", "delivery-state, outcome"),
            ty("received").with_attribute("provides", "delivery-state"),
            ty("plain"),
        ]);
        for type_def in classify_document(&root).unwrap() {
            classification.push(type_def);
        }

        assert_eq!(classification.provides.get("delivery-state"), [0, 1]);
        assert_eq!(classification.provides.get("outcome"), [0]);
        assert_eq!(classification.enumerated, [0, 1, 2]);
        assert!(classification.primitive.is_empty());
    }
}

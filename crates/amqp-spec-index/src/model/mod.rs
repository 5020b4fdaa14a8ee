//! Raw, untyped element tree that a definition document is read into.
//!
//! This is the loader's view of the Definition Source: tags, attributes and
//! children in document order, nothing more. Text content is not kept, since
//! no indexed value lives in it. The classifier turns these trees into the
//! typed records in `crate::types`.

use alloc::string::String;
use alloc::vec::Vec;

pub mod namespace;

/// One XML element: its tag, its attributes and its child elements.
///
/// Tags read from a namespaced document are in Clark notation
/// (`{http://www.amqp.org/schema/amqp.xsd}type`) until
/// [`namespace::trim_namespace`] rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    /// Attributes in document order. Namespace declarations are not included.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper that appends an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style helper that appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child element with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Iterates over all child elements with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup_returns_first_match() {
        let element = Element::new("field")
            .with_attribute("name", "container-id")
            .with_attribute("type", "string")
            .with_attribute("name", "shadowed");

        assert_eq!(element.attribute("name"), Some("container-id"));
        assert_eq!(element.attribute("type"), Some("string"));
        assert_eq!(element.attribute("default"), None);
    }

    #[test]
    fn test_find_and_find_all_keep_document_order() {
        let element = Element::new("type")
            .with_child(Element::new("field").with_attribute("name", "a"))
            .with_child(Element::new("doc"))
            .with_child(Element::new("field").with_attribute("name", "b"));

        assert_eq!(element.find("doc").map(|d| d.tag.as_str()), Some("doc"));
        assert!(element.find("descriptor").is_none());

        let names: Vec<_> = element
            .find_all("field")
            .filter_map(|f| f.attribute("name"))
            .collect();
        assert_eq!(names, ["a", "b"]);
    }
}

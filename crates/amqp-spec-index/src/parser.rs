// crates/amqp-spec-index/src/parser.rs

use crate::error::DefinitionError;
use crate::model::Element;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::num::ParseIntError;
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

/// Reads an XML definition document into an [`Element`] tree.
///
/// Element tags that resolve to a namespace are written in Clark notation
/// (`{uri}local`); unqualified tags are kept as their local name. Namespace
/// declarations are dropped from the attribute lists. Text, comments and
/// processing instructions are skipped.
///
/// # Errors
/// Returns a `DefinitionError` if the markup is malformed, a prefix is
/// undeclared, or the document is empty or truncated.
pub fn parse_document(xml_content: &str) -> Result<Element, DefinitionError> {
    let mut reader = NsReader::from_str(xml_content);

    // Open elements; the last one is the current parent.
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let element = open_element(&reader, &start)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&reader, &start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                // quick-xml has already checked that the end tag matches.
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(DefinitionError::UnclosedElement { tag: open.tag });
    }
    root.ok_or(DefinitionError::MissingElement {
        element: "document root",
    })
}

/// Builds an [`Element`] (without children) from a start or empty tag.
fn open_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Element, DefinitionError> {
    let (resolved, local) = reader.resolve_element(start.name());
    let local = core::str::from_utf8(local.as_ref())?;

    let tag = match resolved {
        ResolveResult::Bound(Namespace(uri)) => {
            format!("{{{}}}{}", core::str::from_utf8(uri)?, local)
        }
        ResolveResult::Unbound => local.to_string(),
        ResolveResult::Unknown(prefix) => {
            return Err(DefinitionError::UnboundPrefix {
                prefix: String::from_utf8_lossy(&prefix).into_owned(),
            });
        }
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = core::str::from_utf8(attr.key.as_ref())?;
        let raw = core::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw).map_err(quick_xml::Error::from)?;
        attributes.push((key.to_string(), value.into_owned()));
    }

    Ok(Element {
        tag,
        attributes,
        children: Vec::new(),
    })
}

/// Appends a finished element to its parent, or makes it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            // Only the first top-level element is the document root.
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

// --- Helper Functions ---

/// Parses a "0x..." or "..." hex string into a u64.
pub fn parse_hex_u64(s: &str) -> Result<u64, ParseIntError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(trimmed, 16)
}

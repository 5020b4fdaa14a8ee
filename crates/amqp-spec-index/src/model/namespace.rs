// crates/amqp-spec-index/src/model/namespace.rs

//! Strips `{namespace}` prefixes from element tags.

use super::Element;
use alloc::string::String;

/// Returns `tag` without a leading `{...}` namespace prefix.
///
/// A tag without a prefix, or with an unterminated `{`, is returned unchanged.
pub fn trim_tag(tag: &str) -> &str {
    if !tag.starts_with('{') {
        return tag;
    }
    match tag.find('}') {
        Some(pos) => &tag[pos + 1..],
        None => tag,
    }
}

/// Rewrites every tag in the subtree rooted at `element` so that it carries
/// no namespace prefix. Running it twice is a no-op.
pub fn trim_namespace(element: &mut Element) {
    let trimmed = trim_tag(&element.tag);
    if trimmed.len() != element.tag.len() {
        element.tag = String::from(trimmed);
    }
    for child in &mut element.children {
        trim_namespace(child);
    }
}

// crates/amqp-spec-index/src/resolver/utils.rs

//! Utility functions for the resolver.

use crate::error::DefinitionError;
use crate::model::Element;
use crate::parser::parse_hex_u64;
use crate::resolver::CodeOrder;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// The literal every descriptor code must start with.
///
/// All AMQP descriptor codes are written `0xDDDDDDDD:0xIIIIIIII`. Cutting this
/// prefix leaves the two trailing hex digits used for display and ordering,
/// so `"0x00000000:0x00000010"` yields `"10"`.
pub const DESCRIPTOR_CODE_PREFIX: &str = "0x00000000:0x000000";

/// Width of [`DESCRIPTOR_CODE_PREFIX`].
pub const DESCRIPTOR_CODE_PREFIX_LEN: usize = 19;

const _: () = assert!(DESCRIPTOR_CODE_PREFIX.len() == DESCRIPTOR_CODE_PREFIX_LEN);

/// Returns the part of a descriptor code after the fixed-width prefix.
///
/// # Errors
/// `InvalidDescriptorCode` if the code is not longer than the prefix, or if
/// the cut would drop a non-zero digit (a domain id, or an id above `0xff`).
pub fn extract_descriptor_code(code: &str) -> Result<&str, DefinitionError> {
    match code.split_at_checked(DESCRIPTOR_CODE_PREFIX_LEN) {
        Some((prefix, suffix)) if prefix == DESCRIPTOR_CODE_PREFIX && !suffix.is_empty() => {
            Ok(suffix)
        }
        _ => Err(DefinitionError::InvalidDescriptorCode {
            code: code.to_string(),
        }),
    }
}

/// Decodes `0xDDDDDDDD:0xIIIIIIII` into its (domain, descriptor) halves.
pub(super) fn decode_descriptor_code(code: &str) -> Result<(u32, u32), DefinitionError> {
    let invalid = || DefinitionError::InvalidDescriptorCode {
        code: code.to_string(),
    };
    let (domain, id) = code.split_once(':').ok_or_else(invalid)?;
    Ok((decode_half(domain).ok_or_else(invalid)??, decode_half(id).ok_or_else(invalid)??))
}

/// Decodes one `0x` + 8 hex digit half. `None` means the shape is wrong,
/// `Some(Err)` means the digits are not hex.
fn decode_half(half: &str) -> Option<Result<u32, DefinitionError>> {
    let digits = half.strip_prefix("0x")?;
    if digits.len() != 8 {
        return None;
    }
    Some(hex::decode(digits).map_err(DefinitionError::from).map(|bytes| {
        bytes
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte))
    }))
}

/// Reads a required attribute, failing fast when it is absent.
pub(super) fn required(
    element: &Element,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<String, DefinitionError> {
    element
        .attribute(attribute)
        .map(String::from)
        .ok_or(DefinitionError::MissingAttribute {
            element: element_name,
            attribute,
        })
}

/// Reads an optional attribute.
pub(super) fn optional(element: &Element, attribute: &str) -> Option<String> {
    element.attribute(attribute).map(String::from)
}

/// Reads a boolean flag attribute. Only `"true"` counts as set.
pub(super) fn flag(element: &Element, attribute: &str) -> bool {
    element.attribute(attribute) == Some("true")
}

/// Returns the positions of `codes` in display order.
///
/// The sort is stable, so equal codes keep their source order.
pub(super) fn order_by_code(codes: &[&str], order: CodeOrder) -> Result<Vec<usize>, DefinitionError> {
    match order {
        CodeOrder::Lexicographic => {
            let mut positions: Vec<usize> = (0..codes.len()).collect();
            positions.sort_by(|&a, &b| codes[a].cmp(codes[b]));
            Ok(positions)
        }
        CodeOrder::Numeric => {
            let values = codes
                .iter()
                .map(|code| {
                    parse_hex_u64(code).map_err(|_| DefinitionError::InvalidCode {
                        code: code.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(order_by_value(&values, codes))
        }
    }
}

/// Returns the positions of `values` in ascending order, ties broken by
/// `codes` and then by source order.
pub(super) fn order_by_value(values: &[u64], codes: &[&str]) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..values.len()).collect();
    positions.sort_by(|&a, &b| values[a].cmp(&values[b]).then_with(|| codes[a].cmp(codes[b])));
    positions
}

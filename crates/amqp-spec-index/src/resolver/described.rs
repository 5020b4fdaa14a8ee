// crates/amqp-spec-index/src/resolver/described.rs

//! Indexes described types by long name and descriptor code, plus their fields.

use crate::error::DefinitionError;
use crate::resolver::CodeOrder;
use crate::resolver::provides::CapabilityIndex;
use crate::resolver::utils::{extract_descriptor_code, order_by_code, order_by_value};
use crate::types::TypeDef;
use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::warn;

#[derive(Debug, Clone)]
pub(crate) struct DescribedEntry {
    /// Descriptor code with the fixed prefix removed, e.g. `"10"`.
    pub(crate) code: String,
    /// Full 64-bit descriptor value, used for numeric ordering.
    pub(crate) value: u64,
    /// `"<section path> <name>"`
    pub(crate) long_name: String,
    pub(crate) owner: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DescribedIndex {
    /// Insertion (source) order.
    pub(crate) entries: Vec<DescribedEntry>,
    pub(crate) by_long_name: BTreeMap<String, usize>,
    /// First entry carrying each code.
    pub(crate) by_code: BTreeMap<String, usize>,
    /// Entry positions sorted by code.
    pub(crate) code_order: Vec<usize>,
    /// `(field name, owning type)` for every field, in source order.
    pub(crate) field_index: Vec<(String, usize)>,
    /// Fields naming a capability in `@requires`, as `(owner, field position)`.
    pub(crate) requires: CapabilityIndex<(usize, usize)>,
}

/// Builds the described index over the types at `ids`.
///
/// # Errors
/// `DuplicateDescribed` on a repeated long name, `InvalidDescriptorCode` if a
/// descriptor code does not start with the fixed prefix.
pub(crate) fn index_described(
    types: &[TypeDef],
    ids: &[usize],
    order: CodeOrder,
) -> Result<DescribedIndex, DefinitionError> {
    let mut index = DescribedIndex::default();

    for &owner in ids {
        let type_def = &types[owner];
        let descriptor = type_def
            .descriptor
            .as_ref()
            .ok_or(DefinitionError::MissingElement {
                element: "descriptor",
            })?;
        let code = extract_descriptor_code(&descriptor.code)?.to_string();
        let long_name = type_def.long_name();
        let entry = index.entries.len();

        match index.by_long_name.entry(long_name.clone()) {
            Entry::Occupied(_) => {
                return Err(DefinitionError::DuplicateDescribed { long_name });
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }

        match index.by_code.entry(code.clone()) {
            Entry::Occupied(first) => warn!(
                "Descriptor code {} of {} already used by {}",
                code, long_name, index.entries[*first.get()].long_name
            ),
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }

        for (position, field) in type_def.fields.iter().enumerate() {
            index.field_index.push((field.name.clone(), owner));
            for capability in field.required_capabilities() {
                index.requires.register(capability, (owner, position));
            }
        }

        index.entries.push(DescribedEntry {
            code,
            value: descriptor.numeric_code(),
            long_name,
            owner,
        });
    }

    let codes: Vec<&str> = index.entries.iter().map(|e| e.code.as_str()).collect();
    index.code_order = match order {
        CodeOrder::Lexicographic => order_by_code(&codes, order)?,
        CodeOrder::Numeric => {
            let values: Vec<u64> = index.entries.iter().map(|e| e.value).collect();
            order_by_value(&values, &codes)
        }
    };

    Ok(index)
}

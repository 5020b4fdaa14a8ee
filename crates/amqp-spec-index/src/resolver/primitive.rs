// crates/amqp-spec-index/src/resolver/primitive.rs

//! Indexes primitive encodings by computed type name and by code.

use crate::error::DefinitionError;
use crate::resolver::CodeOrder;
use crate::resolver::utils::order_by_code;
use crate::types::TypeDef;
use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::string::String;
use alloc::vec::Vec;
use log::warn;

/// One encoding, identified by its position in `types[owner].encodings`.
#[derive(Debug, Clone)]
pub(crate) struct PrimitiveEntry {
    /// `type` or `type:encoding`
    pub(crate) type_name: String,
    pub(crate) owner: usize,
    pub(crate) encoding: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PrimitiveIndex {
    /// Insertion (source) order.
    pub(crate) entries: Vec<PrimitiveEntry>,
    pub(crate) by_name: BTreeMap<String, usize>,
    /// First entry carrying each code.
    pub(crate) by_code: BTreeMap<String, usize>,
    /// Entry positions sorted by type name.
    pub(crate) name_order: Vec<usize>,
    /// Entry positions sorted by code.
    pub(crate) code_order: Vec<usize>,
}

impl PrimitiveIndex {
    pub(crate) fn code<'a>(&self, types: &'a [TypeDef], entry: usize) -> &'a str {
        let entry = &self.entries[entry];
        &types[entry.owner].encodings[entry.encoding].code
    }
}

/// Builds the primitive index over the types at `ids`.
///
/// # Errors
/// `DuplicateEncoding` if two encodings compute the same type name.
pub(crate) fn index_primitives(
    types: &[TypeDef],
    ids: &[usize],
    order: CodeOrder,
) -> Result<PrimitiveIndex, DefinitionError> {
    let mut index = PrimitiveIndex::default();

    for &owner in ids {
        let type_def = &types[owner];
        for (position, encoding) in type_def.encodings.iter().enumerate() {
            let type_name = encoding.type_name(&type_def.name);
            let entry = index.entries.len();

            match index.by_name.entry(type_name.clone()) {
                Entry::Occupied(_) => {
                    return Err(DefinitionError::DuplicateEncoding { type_name });
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }

            match index.by_code.entry(encoding.code.clone()) {
                Entry::Occupied(first) => warn!(
                    "Encoding code {} of {} already used by {}",
                    encoding.code, type_name, index.entries[*first.get()].type_name
                ),
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }

            index.entries.push(PrimitiveEntry {
                type_name,
                owner,
                encoding: position,
            });
        }
    }

    // Type names are unique, so this order is total.
    index.name_order = index.by_name.values().copied().collect();

    let codes: Vec<&str> = (0..index.entries.len())
        .map(|entry| index.code(types, entry))
        .collect();
    index.code_order = order_by_code(&codes, order)?;

    Ok(index)
}

// crates/amqp-spec-index/src/resolver/enumerated.rs

//! Indexes enumerated types by long name, plus their choices.

use crate::error::DefinitionError;
use crate::types::TypeDef;
use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::string::String;
use alloc::vec::Vec;
use log::warn;

#[derive(Debug, Clone, Default)]
pub(crate) struct EnumeratedIndex {
    /// `(long name, owner)` in insertion order; duplicates are kept here.
    pub(crate) long_names: Vec<(String, usize)>,
    /// First type for each long name.
    pub(crate) by_long_name: BTreeMap<String, usize>,
    /// `(choice name, owning type)` for every choice, in source order.
    pub(crate) choice_index: Vec<(String, usize)>,
}

/// Builds the enumerated index over the types at `ids`.
///
/// A repeated long name is only logged unless `strict` is set.
///
/// # Errors
/// `DuplicateEnumerated` on a repeated long name when `strict`.
pub(crate) fn index_enumerated(
    types: &[TypeDef],
    ids: &[usize],
    strict: bool,
) -> Result<EnumeratedIndex, DefinitionError> {
    let mut index = EnumeratedIndex::default();

    for &owner in ids {
        let type_def = &types[owner];
        let long_name = type_def.long_name();

        match index.by_long_name.entry(long_name.clone()) {
            Entry::Occupied(_) if strict => {
                return Err(DefinitionError::DuplicateEnumerated { long_name });
            }
            Entry::Occupied(_) => warn!("Enumerated type {} is defined more than once", long_name),
            Entry::Vacant(slot) => {
                slot.insert(owner);
            }
        }

        for choice in &type_def.choices {
            index.choice_index.push((choice.name.clone(), owner));
        }
        index.long_names.push((long_name, owner));
    }

    Ok(index)
}

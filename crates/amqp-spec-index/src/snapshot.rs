// crates/amqp-spec-index/src/snapshot.rs

//! The frozen, read-only model handed to renderers.

use crate::resolver::provides::CapabilityIndex;
use crate::resolver::{DescribedIndex, EnumeratedIndex, PrimitiveIndex};
use crate::types::{Choice, Encoding, Field, TypeDef};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use serde::Serialize;

/// One row of a primitive-encoding view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrimitiveRow<'a> {
    /// The sort key of the view: the type name or the code.
    pub key: &'a str,
    /// `type` or `type:encoding`
    pub type_name: &'a str,
    pub encoding: &'a Encoding,
    /// Section path of the owning type.
    pub section_path: &'a str,
}

/// One row of the described-type view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DescribedRow<'a> {
    /// Descriptor code with the fixed prefix removed.
    pub code: &'a str,
    pub long_name: &'a str,
    #[serde(rename = "type")]
    pub type_def: &'a TypeDef,
}

/// Every renderer-facing view at once, for serialization.
#[derive(Debug, Serialize)]
pub struct SnapshotDump<'a> {
    pub primitives_by_name: Vec<PrimitiveRow<'a>>,
    pub primitives_by_code: Vec<PrimitiveRow<'a>>,
    pub described_by_code: Vec<DescribedRow<'a>>,
    pub enumerated: Vec<&'a str>,
    /// Capability -> long names of the providing types.
    pub provides: BTreeMap<&'a str, Vec<String>>,
}

/// The cross-referenced model of all loaded type definitions.
///
/// Produced only by [`crate::Loader::build`]; there is no way to mutate it
/// afterwards. All views borrow from the snapshot.
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    pub(crate) types: Vec<TypeDef>,
    pub(crate) primitive_ids: Vec<usize>,
    pub(crate) described_ids: Vec<usize>,
    pub(crate) enumerated_ids: Vec<usize>,
    pub(crate) provides: CapabilityIndex<usize>,
    pub(crate) primitive: PrimitiveIndex,
    pub(crate) described: DescribedIndex,
    pub(crate) enumerated: EnumeratedIndex,
}

impl ModelSnapshot {
    // --- Category collections ---

    /// Every type, in document-then-section-then-type order.
    pub fn all_types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn primitives(&self) -> impl ExactSizeIterator<Item = &TypeDef> + '_ {
        self.primitive_ids.iter().map(|&id| &self.types[id])
    }

    pub fn described(&self) -> impl ExactSizeIterator<Item = &TypeDef> + '_ {
        self.described_ids.iter().map(|&id| &self.types[id])
    }

    pub fn enumerated(&self) -> impl ExactSizeIterator<Item = &TypeDef> + '_ {
        self.enumerated_ids.iter().map(|&id| &self.types[id])
    }

    // --- Primitive views ---

    fn primitive_row(&self, entry: usize, by_code: bool) -> PrimitiveRow<'_> {
        let e = &self.primitive.entries[entry];
        let owner = &self.types[e.owner];
        let encoding = &owner.encodings[e.encoding];
        PrimitiveRow {
            key: if by_code { &encoding.code } else { &e.type_name },
            type_name: &e.type_name,
            encoding,
            section_path: &owner.section_path,
        }
    }

    /// Primitive encodings sorted by computed type name.
    pub fn primitives_by_name(&self) -> impl ExactSizeIterator<Item = PrimitiveRow<'_>> + '_ {
        self.primitive
            .name_order
            .iter()
            .map(move |&entry| self.primitive_row(entry, false))
    }

    /// Primitive encodings sorted by code (see [`crate::CodeOrder`]).
    pub fn primitives_by_code(&self) -> impl ExactSizeIterator<Item = PrimitiveRow<'_>> + '_ {
        self.primitive
            .code_order
            .iter()
            .map(move |&entry| self.primitive_row(entry, true))
    }

    /// Looks up an encoding by its computed type name, e.g. `"boolean:true"`.
    pub fn primitive_by_name(&self, type_name: &str) -> Option<PrimitiveRow<'_>> {
        self.primitive
            .by_name
            .get(type_name)
            .map(|&entry| self.primitive_row(entry, false))
    }

    /// Looks up the first encoding carrying `code`, e.g. `"0x41"`.
    pub fn primitive_by_code(&self, code: &str) -> Option<PrimitiveRow<'_>> {
        self.primitive
            .by_code
            .get(code)
            .map(|&entry| self.primitive_row(entry, true))
    }

    // --- Described views ---

    fn described_row(&self, entry: usize) -> DescribedRow<'_> {
        let e = &self.described.entries[entry];
        DescribedRow {
            code: &e.code,
            long_name: &e.long_name,
            type_def: &self.types[e.owner],
        }
    }

    /// Described types sorted by code (see [`crate::CodeOrder`]).
    pub fn described_by_code(&self) -> impl ExactSizeIterator<Item = DescribedRow<'_>> + '_ {
        self.described
            .code_order
            .iter()
            .map(move |&entry| self.described_row(entry))
    }

    pub fn described_by_long_name(&self, long_name: &str) -> Option<&TypeDef> {
        self.described
            .by_long_name
            .get(long_name)
            .map(|&entry| &self.types[self.described.entries[entry].owner])
    }

    /// The extracted descriptor code of a described type.
    pub fn described_code(&self, long_name: &str) -> Option<&str> {
        self.described
            .by_long_name
            .get(long_name)
            .map(|&entry| self.described.entries[entry].code.as_str())
    }

    /// The long name of the (first) described type with this extracted code.
    pub fn described_long_name_for_code(&self, code: &str) -> Option<&str> {
        self.described
            .by_code
            .get(code)
            .map(|&entry| self.described.entries[entry].long_name.as_str())
    }

    /// Fields of a described type in source order; empty if it has none or
    /// the long name is unknown.
    pub fn described_fields(&self, long_name: &str) -> &[Field] {
        self.described_by_long_name(long_name)
            .map(|t| t.fields.as_slice())
            .unwrap_or(&[])
    }

    /// `(field name, owning type)` for every described field, in source order.
    pub fn field_index(&self) -> impl ExactSizeIterator<Item = (&str, &TypeDef)> + '_ {
        self.described
            .field_index
            .iter()
            .map(|(name, owner)| (name.as_str(), &self.types[*owner]))
    }

    /// Described types that have a field called `field_name`.
    pub fn types_with_field<'a>(&'a self, field_name: &'a str) -> impl Iterator<Item = &'a TypeDef> + 'a {
        self.field_index()
            .filter(move |(name, _)| *name == field_name)
            .map(|(_, owner)| owner)
    }

    /// Fields whose `requires` names `capability`, with their owning type.
    pub fn requirers_of(&self, capability: &str) -> Vec<(&Field, &TypeDef)> {
        self.described
            .requires
            .get(capability)
            .iter()
            .map(|&(owner, field)| {
                let owner = &self.types[owner];
                (&owner.fields[field], owner)
            })
            .collect()
    }

    // --- Enumerated views ---

    /// Long names of all enumerated types, in insertion order.
    pub fn enumerated_all(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.enumerated.long_names.iter().map(|(name, _)| name.as_str())
    }

    pub fn enumerated_by_long_name(&self, long_name: &str) -> Option<&TypeDef> {
        self.enumerated
            .by_long_name
            .get(long_name)
            .map(|&owner| &self.types[owner])
    }

    /// Choices of an enumerated type; empty if it has none or is unknown.
    pub fn enumerated_choices(&self, long_name: &str) -> &[Choice] {
        self.enumerated_by_long_name(long_name)
            .map(|t| t.choices.as_slice())
            .unwrap_or(&[])
    }

    /// `(choice name, owning type)` for every choice, in source order.
    pub fn choice_index(&self) -> impl ExactSizeIterator<Item = (&str, &TypeDef)> + '_ {
        self.enumerated
            .choice_index
            .iter()
            .map(|(name, owner)| (name.as_str(), &self.types[*owner]))
    }

    /// Enumerated types that have a choice called `choice_name`.
    pub fn types_with_choice<'a>(&'a self, choice_name: &'a str) -> impl Iterator<Item = &'a TypeDef> + 'a {
        self.choice_index()
            .filter(move |(name, _)| *name == choice_name)
            .map(|(_, owner)| owner)
    }

    // --- Capabilities ---

    /// Types providing `capability`, in classification order.
    pub fn provides_for(&self, capability: &str) -> Vec<&TypeDef> {
        self.provides
            .get(capability)
            .iter()
            .map(|&id| &self.types[id])
            .collect()
    }

    /// Every capability some type provides, sorted.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> + '_ {
        self.provides.names()
    }

    // --- Export ---

    /// Collects every renderer-facing view into one serializable value.
    pub fn dump(&self) -> SnapshotDump<'_> {
        SnapshotDump {
            primitives_by_name: self.primitives_by_name().collect(),
            primitives_by_code: self.primitives_by_code().collect(),
            described_by_code: self.described_by_code().collect(),
            enumerated: self.enumerated_all().collect(),
            provides: self
                .capabilities()
                .map(|capability| {
                    let providers = self
                        .provides_for(capability)
                        .into_iter()
                        .map(TypeDef::long_name)
                        .collect();
                    (capability, providers)
                })
                .collect(),
        }
    }
}

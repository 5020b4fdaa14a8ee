// crates/amqp-spec-index/src/resolver/mod.rs

//! Handles the business logic of turning definition documents into a
//! `ModelSnapshot`.
//!
//! This module contains the `Loader` orchestrator and sub-modules for
//! classification and for each category's cross-reference index.

use crate::error::DefinitionError;
use crate::model::Element;
use crate::model::namespace::trim_namespace;
use crate::parser::parse_document;
use crate::snapshot::ModelSnapshot;
use log::{debug, info};

// --- Sub-modules ---

mod classify;
mod described;
mod enumerated;
mod primitive;
pub(crate) mod provides;
pub(crate) mod utils;

pub(crate) use described::DescribedIndex;
pub(crate) use enumerated::EnumeratedIndex;
pub(crate) use primitive::PrimitiveIndex;

/// Defines how "by code" views are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeOrder {
    /// Codes compared as strings (`"0x100"` sorts before `"0x41"`).
    /// Matches the established rendering of the definitions.
    #[default]
    Lexicographic,
    /// Codes compared as hex numbers; ties fall back to string order.
    Numeric,
}

/// Options controlling a load.
///
/// `LoadOptions::default()` reproduces the established behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Ordering of `primitives_by_code` and `described_by_code`.
    pub code_order: CodeOrder,
    /// Reject repeated enumerated long names instead of logging them.
    pub strict_enumerated: bool,
}

/// Accumulates definition documents and freezes them into a `ModelSnapshot`.
///
/// Documents are classified as they are added; the cross-reference indexes
/// are built once, by [`Loader::build`].
#[derive(Debug, Default)]
pub struct Loader {
    options: LoadOptions,
    classification: classify::Classification,
    documents: usize,
}

impl Loader {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Parses, normalizes and classifies one XML document.
    ///
    /// # Errors
    /// Returns a `DefinitionError` if the XML is malformed or a required
    /// attribute is missing. The loader is left as it was before the call.
    pub fn add_document_str(&mut self, xml_content: &str) -> Result<(), DefinitionError> {
        let root = parse_document(xml_content)?;
        self.add_document(root)
    }

    /// Normalizes and classifies an already-parsed document tree.
    ///
    /// # Errors
    /// `MissingAttribute` if the root, a section, or a type lacks a required
    /// attribute. The loader is left as it was before the call.
    pub fn add_document(&mut self, mut root: Element) -> Result<(), DefinitionError> {
        trim_namespace(&mut root);
        let types = classify::classify_document(&root)?;
        debug!(
            "Loaded document {} with {} types",
            root.attribute("name").unwrap_or_default(),
            types.len()
        );
        for type_def in types {
            self.classification.push(type_def);
        }
        self.documents += 1;
        Ok(())
    }

    /// Builds every cross-reference index and returns the frozen snapshot.
    ///
    /// # Errors
    /// Returns the first fatal data-integrity error (duplicate encoding type
    /// name, duplicate described long name, malformed descriptor code, ...).
    /// No snapshot is produced in that case.
    pub fn build(self) -> Result<ModelSnapshot, DefinitionError> {
        let Loader {
            options,
            classification,
            documents,
        } = self;
        let types = &classification.types;

        let primitive = primitive::index_primitives(types, &classification.primitive, options.code_order)?;
        let described = described::index_described(types, &classification.described, options.code_order)?;
        let enumerated =
            enumerated::index_enumerated(types, &classification.enumerated, options.strict_enumerated)?;

        info!(
            "Indexed {} documents: {} types ({} primitive encodings, {} described, {} enumerated, {} capabilities)",
            documents,
            types.len(),
            primitive.entries.len(),
            described.entries.len(),
            enumerated.long_names.len(),
            classification.provides.len()
        );

        Ok(ModelSnapshot {
            types: classification.types,
            primitive_ids: classification.primitive,
            described_ids: classification.described,
            enumerated_ids: classification.enumerated,
            provides: classification.provides,
            primitive,
            described,
            enumerated,
        })
    }
}

/// Loads a set of XML documents, in order, with default options.
///
/// # Errors
/// Returns the first `DefinitionError` hit while parsing, classifying or
/// indexing.
pub fn load_definitions_from_strs<'a>(
    documents: impl IntoIterator<Item = &'a str>,
) -> Result<ModelSnapshot, DefinitionError> {
    let mut loader = Loader::new(LoadOptions::default());
    for document in documents {
        loader.add_document_str(document)?;
    }
    loader.build()
}

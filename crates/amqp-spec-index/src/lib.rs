// src/lib.rs

#![no_std]
#![doc = "Loads AMQP 1.0 XML type definitions and cross-references them."]
#![doc = ""]
#![doc = "This `no_std + alloc` library reads the definition documents (`types.xml`,"]
#![doc = "`transport.xml`, `messaging.xml`, ...), strips namespace prefixes, sorts every"]
#![doc = "`<type>` into the primitive, described or enumerated category, and freezes the"]
#![doc = "result into a read-only `ModelSnapshot` with the lookup tables renderers need."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_definitions_from_strs`: Loading a set of documents with default options."]
#![doc = "- `Loader`: Incremental loading with `LoadOptions` (code ordering, strict mode)."]
#![doc = "- `ModelSnapshot`: Views by name, by code, by long name, by field, by choice and by capability."]

extern crate alloc;

// --- Crate Modules ---

mod error;
mod model;
mod parser;
mod resolver;
mod snapshot;
mod types;

// --- Public API Re-exports ---

pub use error::DefinitionError;
pub use model::Element;
pub use model::namespace::trim_namespace;
pub use parser::parse_document;
pub use resolver::utils::{DESCRIPTOR_CODE_PREFIX, DESCRIPTOR_CODE_PREFIX_LEN, extract_descriptor_code};
pub use resolver::{CodeOrder, LoadOptions, Loader, load_definitions_from_strs};
pub use snapshot::{DescribedRow, ModelSnapshot, PrimitiveRow, SnapshotDump};
pub use types::{Category, Choice, Descriptor, Encoding, Field, TypeDef};

//! Definition catalog wiring.
//!
//! This module covers the full path from a directory of YAML files to an
//! in-memory catalog: the record model with indifferent key access, the
//! directory scan and per-file pipeline, and the compute-once store that
//! caches the result for the process lifetime. Callers use
//! [`DefinitionStore`] for cached access and the loader functions when a
//! one-shot load is enough.

pub mod definition;
pub mod loader;
pub mod store;

pub use definition::{Catalog, Definition, ParseError, parse_document};
pub use loader::{load_catalog_from_dir, load_definition_file};
pub use store::DefinitionStore;

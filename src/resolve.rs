//! Instance-level definition resolution.
//!
//! Missing configuration for a single entity must not crash the caller:
//! resolution degrades to an empty definition and emits exactly one warning
//! through the injected sink. Only catalog population failures propagate.
//! The sink trait keeps this module independent of any logging backend;
//! [`LogSink`] is the provided default.

use crate::catalog::definition::Definition;
use crate::catalog::store::DefinitionStore;
use crate::error::Result;
use std::path::Path;

/// Receiver for lookup-miss diagnostics.
pub trait DiagnosticsSink {
    /// Called once per failed resolution with the entity's name and the
    /// directory the catalog was loaded from.
    fn definition_missing(&self, name: &str, dir: &Path);
}

/// Default sink: a warning-level log line via the `log` facade.
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn definition_missing(&self, name: &str, dir: &Path) {
        log::warn!(
            "Could not find element definition for `{name}`. Check the definition files under {}.",
            dir.display()
        );
    }
}

/// A runtime entity that carries the name of its own definition.
pub trait Definable {
    fn definition_name(&self) -> &str;
}

/// Resolve `name` against the store's catalog.
///
/// On a hit, returns the matching definition. On a miss, reports through the
/// sink and returns [`Definition::empty`] — the caller proceeds with no
/// configuration, observable only via the warning.
pub fn resolve_definition(
    store: &DefinitionStore,
    name: &str,
    sink: &dyn DiagnosticsSink,
) -> Result<Definition> {
    match store.find_by_name(name)? {
        Some(definition) => Ok(definition),
        None => {
            sink.definition_missing(name, store.dir());
            Ok(Definition::empty())
        }
    }
}

//! Process-lifetime cache over one definitions directory.
//!
//! The store performs at most one effective population: the slot is guarded
//! by a mutex held across the scan, so concurrent first callers serialize and
//! then all observe the same `Arc`. After population the catalog is read-only
//! and later calls clone the `Arc` without touching the filesystem. A failed
//! population caches nothing; the next call scans again.

use crate::catalog::definition::{Catalog, Definition};
use crate::catalog::loader::load_catalog_from_dir;
use crate::error::Result;
use crate::resolve::{Definable, DiagnosticsSink, resolve_definition};
use crate::template::TemplateContext;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct DefinitionStore {
    dir: PathBuf,
    template: TemplateContext,
    cache: Mutex<Option<Arc<Catalog>>>,
    scans: AtomicUsize,
}

impl DefinitionStore {
    /// Construct a store around a directory path. No I/O happens here;
    /// existence is checked on first catalog access.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            template: TemplateContext::new(),
            cache: Mutex::new(None),
            scans: AtomicUsize::new(0),
        }
    }

    /// Replace the template bindings used when files are expanded.
    pub fn with_template_context(mut self, template: TemplateContext) -> Self {
        self.template = template;
        self
    }

    /// The directory this store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The cached catalog, populating it on first call.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        let mut slot = self.cache.lock().unwrap_or_else(|err| err.into_inner());
        if let Some(catalog) = slot.as_ref() {
            return Ok(Arc::clone(catalog));
        }
        self.scans.fetch_add(1, Ordering::SeqCst);
        let catalog = Arc::new(load_catalog_from_dir(&self.dir, &self.template)?);
        *slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// First catalog entry whose `name` field equals `name`.
    ///
    /// Populates the catalog if needed. Absence is `Ok(None)`, never an
    /// error; only population failures propagate.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Definition>> {
        Ok(self.catalog()?.find_by_name(name).cloned())
    }

    /// Resolve the definition belonging to a runtime entity, degrading to an
    /// empty record plus a sink warning when the name is absent.
    pub fn resolve_for(
        &self,
        entity: &dyn Definable,
        sink: &dyn DiagnosticsSink,
    ) -> Result<Definition> {
        resolve_definition(self, entity.definition_name(), sink)
    }

    /// Drop the cached catalog so the next access scans again.
    ///
    /// Test isolation only; production callers rely on the process-lifetime
    /// cache.
    pub fn reset(&self) {
        let mut slot = self.cache.lock().unwrap_or_else(|err| err.into_inner());
        *slot = None;
    }

    /// Number of population attempts performed so far.
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

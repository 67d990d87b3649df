//! Element definition catalog.
//!
//! The crate loads declarative element definitions from a directory of YAML
//! files, flattens them into one ordered catalog, and caches that catalog for
//! the remainder of the process. Public functions here form the contract that
//! host applications and the `defs-dump` helper depend on: definitions
//! directory discovery, cached catalog access, and name-based resolution with
//! the warn-and-degrade policy for entities whose definition is missing.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{env, fs};

pub mod catalog;
pub mod error;
pub mod resolve;
pub mod template;

pub use catalog::{
    Catalog, Definition, DefinitionStore, ParseError, load_catalog_from_dir,
    load_definition_file, parse_document,
};
pub use error::{DefinitionsError, Result};
pub use resolve::{Definable, DiagnosticsSink, LogSink, resolve_definition};
pub use template::{TemplateContext, TemplateError, expand};

/// Directory the catalog is read from when nothing overrides it, relative to
/// the host application's root.
pub const DEFAULT_DEFINITIONS_DIR: &str = "config/elements";

const DIR_ENV: &str = "ELEMENT_DEFS_DIR";

/// Verifies that an explicit directory hint points at an existing directory.
fn dir_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.is_dir() {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        let candidate = dir.join(DEFAULT_DEFINITIONS_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the definitions directory.
///
/// Search order: honor `ELEMENT_DEFS_DIR` if it names a real directory, fall
/// back to climbing up from the current directory looking for
/// `config/elements`, then use the build-time hint. When nothing matches, the
/// default relative path is returned as-is — existence is checked by
/// [`DefinitionStore::catalog`], which is where the configuration-missing
/// error belongs.
pub fn resolve_definitions_dir() -> PathBuf {
    if let Ok(env_dir) = env::var(DIR_ENV) {
        if let Some(dir) = dir_from_hint(&env_dir) {
            return dir;
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(dir) = search_upwards(&cwd) {
            return dir;
        }
    }

    if let Some(hint) = option_env!("ELEMENT_DEFS_DIR_HINT") {
        if let Some(dir) = dir_from_hint(hint) {
            return dir;
        }
    }

    PathBuf::from(DEFAULT_DEFINITIONS_DIR)
}

/// The process-wide store shared by every entity of the host application.
///
/// Built once from [`resolve_definitions_dir`] and never torn down; this is
/// the class-level catalog instance resolution runs against. Hosts that need
/// a differently-configured store (custom directory, template bindings)
/// construct their own [`DefinitionStore`] instead.
pub fn shared_store() -> &'static DefinitionStore {
    static SHARED: OnceLock<DefinitionStore> = OnceLock::new();
    SHARED.get_or_init(|| DefinitionStore::new(resolve_definitions_dir()))
}

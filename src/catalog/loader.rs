//! Directory scan and per-file pipeline.
//!
//! Definition files are recognized by extension only (`.yml` / `.yaml`);
//! everything else in the directory is skipped without being opened. Each
//! eligible file runs the two-stage pipeline: template expansion over the raw
//! text, then document parsing. One bad file fails the whole catalog.

use crate::catalog::definition::{Catalog, Definition, parse_document};
use crate::error::{DefinitionsError, Result};
use crate::template::{TemplateContext, expand};
use std::fs;
use std::path::{Path, PathBuf};

const DEFINITION_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Load every definition file under `dir` into one flat catalog.
///
/// The directory must exist; absence is the fatal
/// [`DefinitionsError::ConfigurationMissing`] condition. Entries are sorted
/// lexicographically by file name before flattening so catalog order does not
/// depend on the platform's directory enumeration order.
pub fn load_catalog_from_dir(dir: &Path, ctx: &TemplateContext) -> Result<Catalog> {
    if !dir.is_dir() {
        return Err(DefinitionsError::ConfigurationMissing {
            path: dir.to_path_buf(),
        });
    }

    let read_failed = |source| DefinitionsError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_failed)? {
        let entry = entry.map_err(read_failed)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };
        if !DEFINITION_EXTENSIONS.contains(&ext) {
            continue;
        }
        files.push(path);
    }
    files.sort();

    let mut definitions = Vec::new();
    for path in files {
        definitions.extend(load_definition_file(&path, ctx)?);
    }
    Ok(Catalog::new(definitions))
}

/// Run one file through the read → expand → parse pipeline.
///
/// Returns the zero or more definitions the file contains; every failure is
/// wrapped with the file path so catalog errors name the offending file.
pub fn load_definition_file(path: &Path, ctx: &TemplateContext) -> Result<Vec<Definition>> {
    let raw = fs::read_to_string(path).map_err(|source| DefinitionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let expanded = expand(&raw, ctx).map_err(|source| DefinitionsError::Template {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&expanded).map_err(|source| DefinitionsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

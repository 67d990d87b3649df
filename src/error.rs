//! Typed errors for catalog construction.
//!
//! Everything in this module belongs to the fatal tier of the error policy:
//! a missing definitions directory or an unreadable/malformed file aborts the
//! whole catalog and propagates to the caller. A name that is simply absent
//! from a healthy catalog is never an error; lookups model it as `None` and
//! instance resolution degrades to an empty definition (see [`crate::resolve`]).

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::definition::ParseError;
use crate::template::TemplateError;

pub type Result<T> = std::result::Result<T, DefinitionsError>;

#[derive(Debug, Error)]
pub enum DefinitionsError {
    /// The configured definitions directory does not exist.
    ///
    /// Carries the remediation hint callers at the boundary are expected to
    /// surface verbatim.
    #[error(
        "could not find definitions directory at {}; create it and add .yml element definition files, or point ELEMENT_DEFS_DIR at an existing directory",
        path.display()
    )]
    ConfigurationMissing { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template expansion failed in {}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("malformed definition file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl DefinitionsError {
    /// Returns true for the missing-directory case.
    ///
    /// Bootstrap code branches on this to print scaffolding instructions
    /// instead of a generic load failure.
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, DefinitionsError::ConfigurationMissing { .. })
    }
}

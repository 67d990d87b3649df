use elementdefs::{Definable, DiagnosticsSink};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Materialize a definitions directory from (file name, contents) pairs.
pub fn write_definitions(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("failed to allocate definitions dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("failed to write fixture file");
    }
    dir
}

/// Sink that records every warning so tests can assert on emission counts.
#[derive(Default)]
pub struct RecordingSink {
    warnings: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn definition_missing(&self, name: &str, dir: &Path) {
        self.warnings
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(format!("{name}: {}", dir.display()));
    }
}

/// Minimal runtime entity carrying its definition name.
pub struct Element {
    pub name: String,
}

impl Element {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Definable for Element {
    fn definition_name(&self) -> &str {
        &self.name
    }
}

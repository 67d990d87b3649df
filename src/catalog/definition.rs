//! The definition record and document parsing.
//!
//! A definition is one keyed configuration record identified by its `name`
//! field. Keys are canonicalized on ingest by stripping the symbolic `:`
//! prefix, and query keys are canonicalized the same way, so `get("title")`
//! and `get(":title")` both succeed. Values stay as [`serde_json::Value`];
//! the crate treats the record body as opaque beyond the `name` field.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("definition document must be a mapping or a sequence of mappings, got {kind}")]
    UnexpectedShape { kind: &'static str },
}

/// One element definition with indifferent key access.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Definition {
    entries: BTreeMap<String, Value>,
}

impl Definition {
    /// The zero-key record returned when instance resolution misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a definition from a parsed mapping, canonicalizing keys.
    ///
    /// When the plain and symbolic spellings of the same key collide, exactly
    /// one entry survives; authoring both spellings in one record is a source
    /// error the crate does not try to arbitrate.
    pub fn from_object(map: serde_json::Map<String, Value>) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in map {
            entries.entry(canonical_key(&key).to_string()).or_insert(value);
        }
        Self { entries }
    }

    /// Look up a value by key, accepting either spelling.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(canonical_key(key))
    }

    /// The identifying `name` field, when present and a string.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates canonical keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// The complete ordered sequence of definitions loaded from one directory.
///
/// Immutable after construction; the store hands it out behind an `Arc` and
/// never mutates it again.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    definitions: Vec<Definition>,
}

impl Catalog {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }

    /// First definition whose `name` field equals `name`, in catalog order.
    ///
    /// Returns `None` instead of erroring; callers decide whether absence is
    /// fatal (it is not for instance resolution, see [`crate::resolve`]).
    pub fn find_by_name(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.name() == Some(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Strip the symbolic `:` spelling down to the canonical string form.
fn canonical_key(raw: &str) -> &str {
    raw.strip_prefix(':').unwrap_or(raw)
}

/// Parse one expanded definition document.
///
/// A document is a single mapping (one definition), a sequence of mappings
/// (many), or empty (zero). Any other shape, and any YAML error, aborts the
/// file. The YAML is bridged into `serde_json::Value` so record bodies stay
/// in the same value model the rest of the crate uses.
pub fn parse_document(text: &str) -> Result<Vec<Definition>, ParseError> {
    let doc: Value = serde_yaml::from_str(text)?;
    match doc {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(vec![Definition::from_object(map)]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(Definition::from_object(map)),
                other => Err(ParseError::UnexpectedShape {
                    kind: value_kind(&other),
                }),
            })
            .collect(),
        other => Err(ParseError::UnexpectedShape {
            kind: value_kind(&other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_mapping_parses_to_one_definition() {
        let defs = parse_document("name: hero\ntitle: Hero\n").unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name(), Some("hero"));
        assert_eq!(defs[0].get("title"), Some(&json!("Hero")));
    }

    #[test]
    fn sequence_parses_to_many_definitions() {
        let text = "- name: hero\n- name: sidekick\n- name: mentor\n";
        let defs = parse_document(text).unwrap();
        let names: Vec<_> = defs.iter().filter_map(Definition::name).collect();
        assert_eq!(names, ["hero", "sidekick", "mentor"]);
    }

    #[test]
    fn empty_and_null_documents_parse_to_zero_definitions() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("---\n").unwrap().is_empty());
        assert!(parse_document("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn scalar_document_is_rejected() {
        let err = parse_document("just a string").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedShape { kind: "string" }));
    }

    #[test]
    fn scalar_sequence_item_is_rejected() {
        let err = parse_document("- name: hero\n- 42\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedShape { kind: "number" }));
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        assert!(matches!(
            parse_document("name: [unclosed"),
            Err(ParseError::Yaml(_))
        ));
    }

    #[test]
    fn keys_are_indifferent_to_the_symbolic_spelling() {
        let defs = parse_document("name: hero\ntitle: Hero\n").unwrap();
        let def = &defs[0];
        assert_eq!(def.get("title"), Some(&json!("Hero")));
        assert_eq!(def.get(":title"), Some(&json!("Hero")));
        assert_eq!(def.get(":name").and_then(Value::as_str), Some("hero"));
    }

    #[test]
    fn symbolic_authored_keys_canonicalize_on_ingest() {
        let defs = parse_document(":name: hero\n:title: Hero\n").unwrap();
        let def = &defs[0];
        assert_eq!(def.name(), Some("hero"));
        assert_eq!(def.get("title"), Some(&json!("Hero")));
        assert!(def.keys().all(|k| !k.starts_with(':')));
    }

    #[test]
    fn nested_values_survive_untouched() {
        let text = "name: hero\nslots:\n  - headline\n  - body\nmeta:\n  weight: 3\n";
        let defs = parse_document(text).unwrap();
        let def = &defs[0];
        assert_eq!(def.get("slots"), Some(&json!(["headline", "body"])));
        assert_eq!(def.get("meta"), Some(&json!({"weight": 3})));
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let defs = parse_document("- name: hero\n  rank: 1\n- name: hero\n  rank: 2\n").unwrap();
        let catalog = Catalog::new(defs);
        let hit = catalog.find_by_name("hero").unwrap();
        assert_eq!(hit.get("rank"), Some(&json!(1)));
        assert!(catalog.find_by_name("villain").is_none());
    }

    #[test]
    fn serializes_as_the_plain_record() {
        let defs = parse_document("name: hero\ntitle: Hero\n").unwrap();
        let json = serde_json::to_value(&defs[0]).unwrap();
        assert_eq!(json, json!({"name": "hero", "title": "Hero"}));
    }
}

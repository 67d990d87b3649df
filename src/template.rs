//! Template expansion for definition file text.
//!
//! Stage one of the two-stage file pipeline: `<%= expression %>` directives
//! are substituted into the raw text before the YAML parser ever sees it.
//! The expander is deliberately small. An expression is either a key bound in
//! the [`TemplateContext`] or an `env.NAME` reference that reads the process
//! environment. Anything unresolvable fails the file, and with it the whole
//! catalog, matching the fail-fast policy in [`crate::error`].

use std::collections::BTreeMap;
use std::env;
use thiserror::Error;

const OPEN: &str = "<%=";
const CLOSE: &str = "%>";
const ENV_PREFIX: &str = "env.";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unterminated `<%=` directive at byte {offset}")]
    Unterminated { offset: usize },

    #[error("unknown template variable `{name}`")]
    UnknownVariable { name: String },

    #[error("environment variable `{name}` referenced by template is not set")]
    MissingEnv { name: String },
}

/// Bindings available to `<%= ... %>` directives.
///
/// Explicit values take precedence; `env.NAME` expressions fall back to the
/// process environment at expansion time, so the context does not need to
/// snapshot the environment up front.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value` for subsequent expansions.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    fn resolve(&self, expr: &str) -> Result<String, TemplateError> {
        if let Some(value) = self.values.get(expr) {
            return Ok(value.clone());
        }
        if let Some(name) = expr.strip_prefix(ENV_PREFIX) {
            return env::var(name).map_err(|_| TemplateError::MissingEnv {
                name: name.to_string(),
            });
        }
        Err(TemplateError::UnknownVariable {
            name: expr.to_string(),
        })
    }
}

/// Substitute every `<%= expression %>` directive in `text`.
///
/// Text without directives passes through unchanged. Directives are resolved
/// left to right; replacement output is never re-scanned, so substituted
/// values cannot introduce new directives.
pub fn expand(text: &str, ctx: &TemplateContext) -> Result<String, TemplateError> {
    if !text.contains(OPEN) {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut consumed = 0usize;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            return Err(TemplateError::Unterminated {
                offset: consumed + start,
            });
        };
        let expr = after[..end].trim();
        out.push_str(&ctx.resolve(expr)?);
        let advanced = start + OPEN.len() + end + CLOSE.len();
        rest = &rest[advanced..];
        consumed += advanced;
    }
    out.push_str(rest);
    Ok(out)
}

//! Loader — accept the index in the shapes documentation builds emit.
//!
//! - bare array: `[{"location": ...}, ...]`
//! - wrapped object: `{"docs": [...]}`
//! - generated script: `var documenterSearchIndex = {"docs": [...]}`

use crate::error::{IndexError, Result};
use crate::index::DocIndex;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_JS_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:var|let|const)\s+)?[A-Za-z_$][A-Za-z0-9_$.]*\s*=\s*").unwrap()
});

/// Parse index text in any supported shape.
pub fn parse_str(input: &str) -> Result<DocIndex> {
    let json = strip_js_wrapper(input);
    let value: Value = serde_json::from_str(json)?;
    let index = DocIndex::load(unwrap_docs(&value)?)?;
    tracing::debug!(entries = index.len(), "loaded search index");
    Ok(index)
}

/// Read and parse an index file.
pub fn load_file(path: impl AsRef<Path>) -> Result<DocIndex> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read search index");
    parse_str(&content)
}

/// Drop a leading `var name =` assignment and trailing semicolon, if present.
fn strip_js_wrapper(input: &str) -> &str {
    let body = match RE_JS_ASSIGN.find(input) {
        Some(m) => &input[m.end()..],
        None => input,
    };
    body.trim().trim_end_matches(';').trim_end()
}

fn unwrap_docs(value: &Value) -> Result<&Value> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(obj) => obj.get("docs").ok_or(IndexError::MissingDocs),
        _ => Err(IndexError::NotAnArray),
    }
}

//! Rewrites `definitions` keys that are awkward inside JSON pointers.
//!
//! Published workflow schemas name definitions after TypeScript types (`Record<string,
//! unknown>` and friends). Those keys are renamed to `[A-Za-z0-9_.-]` and every
//! `$ref` that pointed at them follows.

use crate::core::error::AppError;
use crate::utils::{read_json_file, write_json_file};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Characters `encodeURIComponent` escapes, which is how schema generators write refs.
const URI_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const DEFINITIONS_POINTER: &str = "#/definitions/";

/// Old and new name of each renamed definition, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub renamed: Vec<(String, String)>,
}

impl NormalizeSummary {
    pub fn is_unchanged(&self) -> bool {
        self.renamed.is_empty()
    }
}

fn clean_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Rename awkward definition keys in place and rewrite the refs pointing at them.
pub fn normalize_schema(schema: &mut Value) -> NormalizeSummary {
    let Some(Value::Object(definitions)) = schema.get_mut("definitions") else {
        return NormalizeSummary::default();
    };

    let mut occupied: HashSet<String> = definitions.keys().cloned().collect();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut renamed = Vec::new();

    for key in definitions.keys() {
        let cleaned = clean_key(key);
        if cleaned == *key {
            continue;
        }
        let mut attempts = counters.get(&cleaned).copied().unwrap_or(0);
        let mut candidate = cleaned.clone();
        while occupied.contains(&candidate) {
            attempts += 1;
            candidate = format!("{}_{}", cleaned, attempts);
        }
        counters.insert(cleaned, attempts);
        occupied.insert(candidate.clone());
        occupied.remove(key);
        renamed.push((key.clone(), candidate));
    }

    if renamed.is_empty() {
        return NormalizeSummary::default();
    }

    let lookup: HashMap<&str, &str> = renamed
        .iter()
        .map(|(old, new)| (old.as_str(), new.as_str()))
        .collect();
    let taken = std::mem::take(definitions);
    let rebuilt: Map<String, Value> = taken
        .into_iter()
        .map(|(key, value)| match lookup.get(key.as_str()) {
            Some(new) => (new.to_string(), value),
            None => (key, value),
        })
        .collect();
    *definitions = rebuilt;

    let pointers: HashMap<String, String> = renamed
        .iter()
        .map(|(old, new)| {
            (
                format!(
                    "{}{}",
                    DEFINITIONS_POINTER,
                    utf8_percent_encode(old, URI_COMPONENT_ENCODE_SET)
                ),
                format!("{}{}", DEFINITIONS_POINTER, new),
            )
        })
        .collect();
    rewrite_refs(schema, &pointers);

    NormalizeSummary { renamed }
}

fn rewrite_refs(node: &mut Value, pointers: &HashMap<String, String>) {
    match node {
        Value::Array(items) => {
            for item in items {
                rewrite_refs(item, pointers);
            }
        }
        Value::Object(map) => {
            for value in map.values_mut() {
                if let Value::String(text) = value {
                    if let Some(replacement) = pointers.get(text.as_str()) {
                        *text = replacement.clone();
                    }
                    continue;
                }
                rewrite_refs(value, pointers);
            }
        }
        _ => {}
    }
}

/// Normalize the schema file at `path` in place. The file is always rewritten
/// pretty-printed, even when no key needed renaming.
pub fn normalize_schema_file(path: &Path) -> Result<NormalizeSummary, AppError> {
    let mut schema = read_json_file(path)?;
    let summary = normalize_schema(&mut schema);
    write_json_file(path, &schema)?;
    if summary.is_unchanged() {
        tracing::debug!("schema {} needed no renames", path.display());
    } else {
        tracing::info!("Updated schema definitions for JSON pointer compatibility");
    }
    Ok(summary)
}

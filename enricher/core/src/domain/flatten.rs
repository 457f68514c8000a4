// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Response flattening.
//!
//! Turns a decoded JSON document into a single-level map keyed by dot-joined
//! paths, so `{"data": [{"username": "x"}]}` becomes `{"data.0.username": "x"}`.
//! Lookups are exact key matches; there are no wildcards or slices.

use serde_json::Value;
use std::collections::HashMap;

/// Dot-joined path → rendered scalar leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedResponse {
    entries: HashMap<String, String>,
}

impl FlattenedResponse {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(path, leaf)| (path.as_str(), leaf.as_str()))
    }

    // First writer wins when two nested paths join to the same key.
    fn insert(&mut self, path: String, leaf: String) {
        self.entries.entry(path).or_insert(leaf);
    }
}

/// Flatten `value` with every key prefixed by `prefix`.
///
/// Only objects and arrays have children; a scalar root yields an empty map.
pub fn flatten(value: &Value, prefix: &str) -> FlattenedResponse {
    let mut flattened = FlattenedResponse::default();
    flatten_into(value, prefix, &mut flattened);
    flattened
}

fn flatten_into(value: &Value, prefix: &str, out: &mut FlattenedResponse) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                visit(child, format!("{}{}", prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                visit(child, format!("{}{}", prefix, index), out);
            }
        }
        _ => {}
    }
}

fn visit(child: &Value, path: String, out: &mut FlattenedResponse) {
    match child {
        Value::Object(_) | Value::Array(_) => flatten_into(child, &format!("{}.", path), out),
        leaf => out.insert(path, render_leaf(leaf)),
    }
}

fn render_leaf(leaf: &Value) -> String {
    match leaf {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users_response() -> Value {
        json!({
            "status": "OK",
            "code": 200,
            "total": 1,
            "data": [{
                "id": 1,
                "uuid": "b1d0c5a2-7a43-3b6c-9d6e-0d8bd1f1e0a3",
                "firstname": "Zoe",
                "username": "zpineiro",
                "verified": true,
                "address": { "city": "Madrid", "zipcode": null }
            }]
        })
    }

    #[test]
    fn test_flatten_nested_document() {
        let flat = flatten(&users_response(), "");
        assert_eq!(flat.get("data.0.username"), Some("zpineiro"));
        assert_eq!(flat.get("data.0.address.city"), Some("Madrid"));
        assert_eq!(flat.get("code"), Some("200"));
        assert_eq!(flat.get("data.0.verified"), Some("true"));
        assert_eq!(flat.get("data.0.address.zipcode"), Some(""));
        assert_eq!(flat.get("data.0"), None);
        assert_eq!(flat.get("data"), None);
    }

    #[test]
    fn test_lookup_matches_direct_indexing() {
        let doc = users_response();
        let flat = flatten(&doc, "");
        for (path, leaf) in flat.iter() {
            let pointer = format!("/{}", path.replace('.', "/"));
            let direct = doc.pointer(&pointer).expect("path resolves in source");
            assert_eq!(render_leaf(direct), leaf, "mismatch at {}", path);
        }
    }

    #[test]
    fn test_flatten_is_idempotent_on_flat_maps() {
        let once = flatten(&users_response(), "");
        let as_json: serde_json::Map<String, Value> = once
            .iter()
            .map(|(path, leaf)| (path.to_string(), Value::String(leaf.to_string())))
            .collect();
        let twice = flatten(&Value::Object(as_json), "");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prefix_is_prepended() {
        let flat = flatten(&json!({ "a": { "b": 1 } }), "root.");
        assert_eq!(flat.get("root.a.b"), Some("1"));
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_scalar_and_empty_containers() {
        assert!(flatten(&json!("just a string"), "").is_empty());
        assert!(flatten(&json!(null), "").is_empty());
        assert!(flatten(&json!({ "a": {}, "b": [] }), "").is_empty());
    }

    #[test]
    fn test_colliding_paths_keep_first_writer() {
        let flat = flatten(&json!({ "a.b": "literal", "a": { "b": "nested" } }), "");
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("a.b"), Some("literal"));
    }
}

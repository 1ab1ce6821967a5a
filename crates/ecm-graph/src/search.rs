//! Attribute search over node payloads.
//!
//! A plain scan: graphs are rebuilt per snapshot and searched a handful of
//! times, so no index is kept. Matching is a case-sensitive substring test
//! against the leaf values of a payload field. Nested keys and JSON syntax
//! never match.

use crate::graph::EcmGraph;
use crate::node::{Node, NodeId};
use serde_json::Value;

impl EcmGraph {
    /// Finds nodes whose payload mentions `value`.
    ///
    /// - blank `value`: nothing matches
    /// - blank `key`: any payload field may match
    /// - otherwise: only the field named exactly `key` is checked
    ///
    /// Results follow node insertion order.
    pub fn search(&self, key: &str, value: &str) -> Vec<NodeId> {
        if is_blank(value) {
            return Vec::new();
        }

        self.nodes()
            .filter(|node| payload_matches(node, key, value))
            .map(|node| node.id().to_string())
            .collect()
    }
}

fn payload_matches(node: &Node, key: &str, value: &str) -> bool {
    if is_blank(key) {
        node.payload()
            .values()
            .any(|field| textual_contains(field, value))
    } else {
        node.payload()
            .get(key)
            .map(|field| textual_contains(field, value))
            .unwrap_or(false)
    }
}

fn textual_contains(field: &Value, needle: &str) -> bool {
    match field {
        Value::Null => false,
        Value::String(text) => text.contains(needle),
        Value::Number(number) => number.to_string().contains(needle),
        Value::Bool(flag) => flag.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|item| textual_contains(item, needle)),
        Value::Object(fields) => fields.values().any(|item| textual_contains(item, needle)),
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

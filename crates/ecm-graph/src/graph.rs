//! Core graph data structure.
//!
//! The EcmGraph owns every node in a single table keyed by identifier.
//! Nodes refer to each other only through those identifiers, and the graph
//! is the only place that links two nodes, so the parent/child symmetry
//! holds by construction.

use crate::builder::NodeKind;
use crate::edge::GraphEdge;
use crate::error::{GraphError, Result};
use crate::node::{Node, NodeId, Payload};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The component/capability relation graph.
///
/// Rebuilt from scratch for every snapshot; it is never diffed against a
/// previous one. Cycles and self-loops are valid.
///
/// Only serialized, for export. A graph is built through
/// [`EcmGraph::add_node`] and [`EcmGraph::add_connection`] alone.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct EcmGraph {
    /// Every node, in first-insertion order.
    nodes: IndexMap<NodeId, Node>,
}

impl EcmGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node unless one with the same identifier exists.
    ///
    /// An existing node keeps its adjacency. Its payload is replaced when
    /// `payload` is `Some` and left untouched when it is `None`.
    ///
    /// Returns true if a new node was created.
    pub fn add_node(&mut self, id: impl Into<NodeId>, payload: Option<Payload>) -> bool {
        let id = id.into();
        match self.nodes.get_mut(&id) {
            Some(existing) => {
                if let Some(payload) = payload {
                    existing.set_payload(payload);
                }
                false
            }
            None => {
                let node = Node::new(id.clone(), payload.unwrap_or_default());
                self.nodes.insert(id, node);
                true
            }
        }
    }

    /// Links `parent` to `child`, creating either endpoint on demand.
    ///
    /// Payloads follow the same rules as [`EcmGraph::add_node`]. Linking the
    /// same pair twice leaves a single edge.
    pub fn add_connection(
        &mut self,
        parent: impl Into<NodeId>,
        child: impl Into<NodeId>,
        parent_payload: Option<Payload>,
        child_payload: Option<Payload>,
    ) {
        let parent = parent.into();
        let child = child.into();

        self.add_node(parent.clone(), parent_payload);
        self.add_node(child.clone(), child_payload);

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.add_child(child.clone());
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.add_parent(parent);
        }
    }

    /// Links two nodes without touching payloads.
    pub fn connect(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) {
        self.add_connection(parent, child, None, None);
    }

    /// Unlinks `parent` from `child` on both sides.
    ///
    /// Returns true if the edge existed. Nodes are never removed.
    pub fn remove_connection(&mut self, parent: &str, child: &str) -> bool {
        let removed = self
            .nodes
            .get_mut(parent)
            .map(|node| node.remove_child(child))
            .unwrap_or(false);

        if let Some(node) = self.nodes.get_mut(child) {
            node.remove_parent(parent);
        }

        removed
    }

    /// Gets a node by identifier.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Gets a node, treating an unknown identifier as a usage error.
    pub fn node(&self, id: &str) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// True if the edge `parent -> child` exists.
    pub fn has_edge(&self, parent: &str, child: &str) -> bool {
        self.nodes
            .get(parent)
            .map(|node| node.has_child(child))
            .unwrap_or(false)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.children().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over all node identifiers in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|id| id.as_str())
    }

    /// Returns every edge, grouped by parent in node insertion order.
    pub fn edges(&self) -> Vec<GraphEdge> {
        self.nodes
            .values()
            .flat_map(|node| {
                node.children()
                    .iter()
                    .map(move |child| GraphEdge::new(node.id(), child.as_str()))
            })
            .collect()
    }
}

/// Graph statistics for the stats command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub components: usize,
    pub capabilities: usize,
    pub missing: usize,
}

impl EcmGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            ..GraphStats::default()
        };

        for node in self.nodes() {
            match NodeKind::of(node) {
                Some(NodeKind::Component) => stats.components += 1,
                Some(NodeKind::Capability) => stats.capabilities += 1,
                Some(NodeKind::Missing) => stats.missing += 1,
                None => {}
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(name: &str) -> Payload {
        let mut payload = Payload::new();
        payload.insert("name".to_string(), json!(name));
        payload
    }

    #[test]
    fn test_export_is_self_consistent() {
        let mut graph = EcmGraph::new();
        graph.connect("a", "b");
        graph.connect("b", "a");
        graph.connect("b", "c");
        graph.add_node("d", Some(payload("lonely")));

        let json = serde_json::to_value(&graph).unwrap();
        let nodes = json["nodes"].as_object().unwrap();
        assert_eq!(nodes.len(), 4);

        for (key, node) in nodes {
            assert_eq!(node["id"], json!(key));
            for child in node["children"].as_array().unwrap() {
                let child = &nodes[child.as_str().unwrap()];
                assert!(child["parents"].as_array().unwrap().contains(&json!(key)));
            }
            for parent in node["parents"].as_array().unwrap() {
                let parent = &nodes[parent.as_str().unwrap()];
                assert!(parent["children"].as_array().unwrap().contains(&json!(key)));
            }
        }
    }

    #[test]
    fn test_add_node_twice() {
        let mut graph = EcmGraph::new();
        assert!(graph.add_node("x", None));
        assert!(!graph.add_node("x", None));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_missing_payload_never_overwrites() {
        let mut graph = EcmGraph::new();
        graph.add_node("x", Some(payload("first")));
        graph.add_node("x", None);
        assert_eq!(graph.get("x").unwrap().payload()["name"], json!("first"));

        graph.add_node("x", Some(payload("second")));
        assert_eq!(graph.get("x").unwrap().payload()["name"], json!("second"));
    }

    #[test]
    fn test_re_adding_keeps_adjacency() {
        let mut graph = EcmGraph::new();
        graph.connect("a", "b");
        graph.add_node("a", Some(payload("a")));

        assert!(graph.has_edge("a", "b"));
        assert_eq!(graph.get("a").unwrap().children().len(), 1);
    }

    #[test]
    fn test_connection_is_idempotent() {
        let mut graph = EcmGraph::new();
        graph.connect("a", "b");
        graph.connect("a", "b");

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.get("a").unwrap().has_child("b"));
        assert!(graph.get("b").unwrap().has_parent("a"));
    }

    #[test]
    fn test_connection_attaches_payloads() {
        let mut graph = EcmGraph::new();
        graph.add_connection("a", "b", Some(payload("parent")), Some(payload("child")));

        assert_eq!(graph.get("a").unwrap().payload()["name"], json!("parent"));
        assert_eq!(graph.get("b").unwrap().payload()["name"], json!("child"));
    }

    #[test]
    fn test_self_loop() {
        let mut graph = EcmGraph::new();
        graph.connect("a", "a");

        assert_eq!(graph.node_count(), 1);
        assert!(graph.has_edge("a", "a"));
        assert!(graph.get("a").unwrap().has_parent("a"));
    }

    #[test]
    fn test_remove_connection() {
        let mut graph = EcmGraph::new();
        graph.connect("a", "b");

        assert!(graph.remove_connection("a", "b"));
        assert!(!graph.remove_connection("a", "b"));
        assert!(!graph.remove_connection("ghost", "b"));
        assert_eq!(graph.node_count(), 2);
        assert!(graph.get("a").unwrap().is_isolated());
        assert!(graph.get("b").unwrap().is_isolated());
    }

    #[test]
    fn test_unknown_node() {
        let graph = EcmGraph::new();
        assert_eq!(
            graph.node("nope").unwrap_err(),
            GraphError::UnknownNode("nope".to_string())
        );
    }

    #[test]
    fn test_edges_in_insertion_order() {
        let mut graph = EcmGraph::new();
        graph.connect("a", "c");
        graph.connect("b", "c");
        graph.connect("a", "b");

        assert_eq!(
            graph.edges(),
            vec![
                GraphEdge::new("a", "c"),
                GraphEdge::new("a", "b"),
                GraphEdge::new("b", "c"),
            ]
        );
    }

    #[test]
    fn test_stats_without_kinds() {
        let mut graph = EcmGraph::new();
        graph.connect("a", "b");

        let stats = graph.stats();
        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.components + stats.capabilities + stats.missing, 0);
    }
}

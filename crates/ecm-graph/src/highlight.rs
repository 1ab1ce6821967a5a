//! Hover highlighting.
//!
//! When a node is hovered, the presentation layer emphasises a set of nodes
//! and edges and dims everything else. This module computes that set; how
//! it is styled is up to the caller.

use crate::edge::GraphEdge;
use crate::error::Result;
use crate::graph::EcmGraph;
use crate::node::NodeId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Which relatives of the hovered node are emphasised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// Every ancestor and descendant, with the edges between them.
    #[default]
    BloodRelation,
    /// Only direct parents and children.
    ClosestNeighbours,
}

impl HighlightMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightMode::BloodRelation => "blood_relation",
            HighlightMode::ClosestNeighbours => "closest_neighbours",
        }
    }
}

impl std::fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Nodes and edges to emphasise for one hovered node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub hovered: NodeId,
    pub mode: HighlightMode,
    /// Related nodes. The hovered node is listed only if it is its own relative.
    pub nodes: IndexSet<NodeId>,
    pub edges: Vec<GraphEdge>,
}

impl Highlight {
    /// True if `id` should be emphasised. The hovered node always is.
    pub fn contains_node(&self, id: &str) -> bool {
        self.hovered == id || self.nodes.contains(id)
    }

    pub fn contains_edge(&self, parent: &str, child: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.parent == parent && edge.child == child)
    }

    /// True when the hovered node has no relatives.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

impl EcmGraph {
    /// Computes what to emphasise when `id` is hovered.
    pub fn highlight(&self, id: &str, mode: HighlightMode) -> Result<Highlight> {
        let start = Instant::now();

        let (nodes, edges) = match mode {
            HighlightMode::BloodRelation => (self.blood_path(id)?, self.blood_path_edges(id)?),
            HighlightMode::ClosestNeighbours => {
                let near = self.closest_neighbours(id)?;
                (near.near_nodes, near.near_edges)
            }
        };

        debug!(
            "Highlight {} ({}): {} nodes, {} edges in {}us",
            id,
            mode,
            nodes.len(),
            edges.len(),
            start.elapsed().as_micros()
        );

        Ok(Highlight {
            hovered: id.to_string(),
            mode,
            nodes,
            edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn long_chain() -> EcmGraph {
        // A → B → C → D
        let mut graph = EcmGraph::new();
        graph.connect("A", "B");
        graph.connect("B", "C");
        graph.connect("C", "D");
        graph
    }

    #[test]
    fn test_blood_relation_mode() {
        let graph = long_chain();
        let highlight = graph.highlight("B", HighlightMode::BloodRelation).unwrap();

        assert_eq!(highlight.hovered, "B");
        assert_eq!(highlight.nodes.len(), 3);
        assert!(highlight.contains_node("B"));
        assert!(highlight.contains_node("D"));
        assert!(highlight.contains_edge("C", "D"));
        assert!(highlight.contains_edge("A", "B"));
        assert_eq!(highlight.edges.len(), 3);
    }

    #[test]
    fn test_closest_neighbours_mode() {
        let graph = long_chain();
        let highlight = graph
            .highlight("B", HighlightMode::ClosestNeighbours)
            .unwrap();

        assert!(highlight.contains_node("A"));
        assert!(highlight.contains_node("C"));
        assert!(!highlight.contains_node("D"));
        assert!(!highlight.contains_edge("C", "D"));
    }

    #[test]
    fn test_unrelated_branch_not_highlighted() {
        let mut graph = long_chain();
        graph.connect("X", "C");

        // X is an ancestor of C, not of B.
        let highlight = graph.highlight("B", HighlightMode::BloodRelation).unwrap();
        assert!(!highlight.contains_node("X"));
        assert!(!highlight.contains_edge("X", "C"));
    }

    #[test]
    fn test_unknown_node() {
        let graph = long_chain();
        let err = graph
            .highlight("nope", HighlightMode::default())
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownNode("nope".to_string()));
    }

    #[test]
    fn test_serialized_mode() {
        let json = serde_json::to_string(&HighlightMode::ClosestNeighbours).unwrap();
        assert_eq!(json, "\"closest_neighbours\"");
    }
}

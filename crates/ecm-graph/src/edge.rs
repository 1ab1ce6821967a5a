//! Edge and neighbourhood types returned by graph queries.
//!
//! Edges are not stored as values; they exist only as the parent/child
//! identifier sets on each node. These types are what queries hand back.

use crate::node::{Direction, NodeId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A directed relation: `parent` points at `child`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphEdge {
    pub parent: NodeId,
    pub child: NodeId,
}

impl GraphEdge {
    pub fn new(parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }

    /// Builds the edge between `current` and a neighbour reached by
    /// walking in `direction`.
    pub(crate) fn oriented(current: &str, neighbour: &str, direction: Direction) -> Self {
        match direction {
            Direction::Descendants => Self::new(current, neighbour),
            Direction::Ancestors => Self::new(neighbour, current),
        }
    }

    /// True if the edge starts or ends at `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.parent == id || self.child == id
    }
}

impl std::fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

/// One-hop surroundings of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbourhood {
    /// Direct children first, then direct parents.
    pub near_nodes: IndexSet<NodeId>,
    /// `(id, child)` edges first, then `(parent, id)` edges.
    pub near_edges: Vec<GraphEdge>,
}

impl Neighbourhood {
    pub fn is_empty(&self) -> bool {
        self.near_nodes.is_empty() && self.near_edges.is_empty()
    }
}

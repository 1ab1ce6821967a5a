//! Graph vertices.
//!
//! A node never points at another node directly. Parents and children are
//! kept as identifier sets and resolved through the owning graph, so the
//! parent/child back-references form no ownership cycle.

use ecm_core::AttributeMap;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Identifier of a node. Unique within one graph.
pub type NodeId = String;

/// Opaque caller data attached to a node.
pub type Payload = AttributeMap;

/// Which adjacency set a walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Follow parent edges (towards the nodes pointing at us).
    Ancestors,
    /// Follow child edges (towards the nodes we point at).
    Descendants,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ancestors => write!(f, "ancestors"),
            Direction::Descendants => write!(f, "descendants"),
        }
    }
}

/// A vertex with its payload and both adjacency sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: NodeId,
    payload: Payload,
    parents: IndexSet<NodeId>,
    children: IndexSet<NodeId>,
}

impl Node {
    /// Creates a node with empty adjacency.
    pub fn new(id: impl Into<NodeId>, payload: Payload) -> Self {
        Self {
            id: id.into(),
            payload,
            parents: IndexSet::new(),
            children: IndexSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub(crate) fn set_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    /// Direct parents, in the order the edges were added.
    pub fn parents(&self) -> &IndexSet<NodeId> {
        &self.parents
    }

    /// Direct children, in the order the edges were added.
    pub fn children(&self) -> &IndexSet<NodeId> {
        &self.children
    }

    /// The adjacency set a walk in `direction` follows.
    pub fn adjacent(&self, direction: Direction) -> &IndexSet<NodeId> {
        match direction {
            Direction::Ancestors => &self.parents,
            Direction::Descendants => &self.children,
        }
    }

    /// Records `child` as a child. Returns false if it already was one.
    pub fn add_child(&mut self, child: impl Into<NodeId>) -> bool {
        self.children.insert(child.into())
    }

    /// Forgets `child`. Returns false if it was not a child.
    pub fn remove_child(&mut self, child: &str) -> bool {
        self.children.shift_remove(child)
    }

    /// Records `parent` as a parent. Returns false if it already was one.
    pub fn add_parent(&mut self, parent: impl Into<NodeId>) -> bool {
        self.parents.insert(parent.into())
    }

    /// Forgets `parent`. Returns false if it was not a parent.
    pub fn remove_parent(&mut self, parent: &str) -> bool {
        self.parents.shift_remove(parent)
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.contains(id)
    }

    pub fn has_parent(&self, id: &str) -> bool {
        self.parents.contains(id)
    }

    /// True when the node has neither parents nor children.
    pub fn is_isolated(&self) -> bool {
        self.parents.is_empty() && self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_child_is_idempotent() {
        let mut node = Node::new("a", Payload::new());
        assert!(node.add_child("b"));
        assert!(!node.add_child("b"));
        assert_eq!(node.children().len(), 1);
        assert!(node.has_child("b"));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut node = Node::new("a", Payload::new());
        assert!(!node.remove_child("ghost"));
        assert!(!node.remove_parent("ghost"));
        assert!(node.is_isolated());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut node = Node::new("a", Payload::new());
        node.add_parent("p1");
        node.add_parent("p2");
        node.add_parent("p3");

        assert!(node.remove_parent("p2"));
        let parents: Vec<&str> = node.parents().iter().map(|p| p.as_str()).collect();
        assert_eq!(parents, vec!["p1", "p3"]);
    }

    #[test]
    fn test_adjacent_by_direction() {
        let mut node = Node::new("b", Payload::new());
        node.add_parent("a");
        node.add_child("c");

        assert!(node.adjacent(Direction::Ancestors).contains("a"));
        assert!(node.adjacent(Direction::Descendants).contains("c"));
        assert!(!node.is_isolated());
    }
}

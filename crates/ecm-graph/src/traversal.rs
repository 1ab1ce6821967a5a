//! Blood relation queries.
//!
//! A node's blood relation is everything reachable from it by following
//! parent edges (ancestors) or child edges (descendants). Every walk here
//! keeps a visited set, so arbitrary cycles and self-loops terminate.
//!
//! Cycle policy: a node reachable from itself through a cycle is part of
//! its own ancestor and descendant sets, exactly once.

use crate::edge::{GraphEdge, Neighbourhood};
use crate::error::Result;
use crate::graph::EcmGraph;
use crate::node::{Direction, NodeId};
use indexmap::IndexSet;
use std::collections::HashSet;
use tracing::debug;

impl EcmGraph {
    /// All transitive ancestors of `id`.
    pub fn parents_path(&self, id: &str) -> Result<IndexSet<NodeId>> {
        self.path(id, Direction::Ancestors)
    }

    /// All transitive descendants of `id`.
    pub fn children_path(&self, id: &str) -> Result<IndexSet<NodeId>> {
        self.path(id, Direction::Descendants)
    }

    /// Descendants followed by ancestors, without duplicates.
    pub fn blood_path(&self, id: &str) -> Result<IndexSet<NodeId>> {
        let mut result = self.children_path(id)?;
        result.extend(self.parents_path(id)?);
        Ok(result)
    }

    /// Everything reachable from `id` in one direction.
    ///
    /// Depth-first, in the order a recursive walk would first reach each
    /// node. `id` itself appears only if a cycle leads back to it.
    pub fn path(&self, id: &str, direction: Direction) -> Result<IndexSet<NodeId>> {
        let start = self.node(id)?;
        let mut result: IndexSet<NodeId> = IndexSet::new();
        let mut stack: Vec<&str> = start
            .adjacent(direction)
            .iter()
            .rev()
            .map(|n| n.as_str())
            .collect();

        while let Some(current) = stack.pop() {
            if result.contains(current) {
                continue;
            }
            result.insert(current.to_string());

            if let Some(node) = self.get(current) {
                stack.extend(node.adjacent(direction).iter().rev().map(|n| n.as_str()));
            }
        }

        debug!("{} of {}: {} nodes", direction, id, result.len());
        Ok(result)
    }

    /// Every edge on a blood relation of `id`.
    ///
    /// Walks descendants first, then ancestors, sharing one visited set.
    /// `id` is taken out of the set between the two phases so its own
    /// parent edges are still expanded. Within a phase each node is
    /// expanded at most once and each edge reported at most once.
    pub fn blood_path_edges(&self, id: &str) -> Result<Vec<GraphEdge>> {
        let start = self.node(id)?.id();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut edges = Vec::new();

        self.walk_edges(start, Direction::Descendants, &mut visited, &mut edges);
        visited.remove(start);
        self.walk_edges(start, Direction::Ancestors, &mut visited, &mut edges);

        debug!("blood path edges of {}: {}", id, edges.len());
        Ok(edges)
    }

    /// Pre-order walk emitting one edge per adjacency entry of every
    /// newly expanded node.
    fn walk_edges<'a>(
        &'a self,
        start: &'a str,
        direction: Direction,
        visited: &mut HashSet<&'a str>,
        edges: &mut Vec<GraphEdge>,
    ) {
        if !visited.insert(start) {
            return;
        }

        // (node, index of the next neighbour to emit)
        let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];

        while let Some((current, cursor)) = stack.last_mut() {
            let next = self
                .get(*current)
                .and_then(|node| node.adjacent(direction).get_index(*cursor));

            match next {
                Some(neighbour) => {
                    *cursor += 1;
                    edges.push(GraphEdge::oriented(*current, neighbour, direction));
                    if visited.insert(neighbour.as_str()) {
                        stack.push((neighbour.as_str(), 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Direct children and parents of `id`, with the edges touching it.
    pub fn closest_neighbours(&self, id: &str) -> Result<Neighbourhood> {
        let node = self.node(id)?;
        let mut neighbourhood = Neighbourhood::default();

        for child in node.children() {
            neighbourhood.near_nodes.insert(child.clone());
            neighbourhood
                .near_edges
                .push(GraphEdge::new(node.id(), child.as_str()));
        }
        for parent in node.parents() {
            neighbourhood.near_nodes.insert(parent.clone());
            neighbourhood
                .near_edges
                .push(GraphEdge::new(parent.as_str(), node.id()));
        }

        Ok(neighbourhood)
    }
}

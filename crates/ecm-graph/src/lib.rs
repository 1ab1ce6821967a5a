//! ECM Graph - Blood relation tracking for the component graph
//!
//! This crate holds the directed graph behind the ECM component view and
//! answers the questions a hover needs: which nodes are ancestors or
//! descendants of the hovered one, and which edges connect them.
//!
//! # Architecture
//!
//! The graph is an arena keyed by node identifier. Nodes store their parents
//! and children as identifier sets, so:
//! - inserting the same node or edge twice is a no-op
//! - parent/child symmetry holds by construction
//! - every traversal keeps a visited set and terminates on cycles
//!
//! # Example
//!
//! ```
//! use ecm_graph::{EcmGraph, HighlightMode};
//!
//! let mut graph = EcmGraph::new();
//! graph.connect("component.1", "service.7");
//! graph.connect("service.7", "component.2");
//!
//! let related = graph.blood_path("service.7")?;
//! assert!(related.contains("component.1"));
//!
//! let highlight = graph.highlight("service.7", HighlightMode::BloodRelation)?;
//! assert_eq!(highlight.edges.len(), 2);
//! # Ok::<(), ecm_graph::GraphError>(())
//! ```

mod builder;
mod edge;
mod error;
mod graph;
mod highlight;
mod node;
mod search;
mod traversal;

pub use builder::{missing_node_id, GraphBuilder, NodeKind, KIND_KEY};
pub use edge::{GraphEdge, Neighbourhood};
pub use error::{GraphError, Result};
pub use graph::{EcmGraph, GraphStats};
pub use highlight::{Highlight, HighlightMode};
pub use node::{Direction, Node, NodeId, Payload};

//! ECM Core - Snapshot model for the component graph
//!
//! This crate describes the `graph.json` snapshot the ECM web console
//! produces: components, the requirements they declare, and the
//! capabilities those requirements are wired to. It decodes and validates
//! snapshots; turning them into a traversable graph is `ecm-graph`'s job.
//!
//! # Example
//!
//! ```no_run
//! use ecm_core::EcmGraphSnapshot;
//!
//! let snapshot = EcmGraphSnapshot::load("graph.json")?;
//! println!("{} nodes", snapshot.node_count());
//! # Ok::<(), ecm_core::SnapshotError>(())
//! ```

mod error;
mod model;
mod snapshot;

pub use error::{Result, SnapshotError};
pub use model::{
    AttributeMap, CapabilityNode, CapabilityType, ComponentNode, ComponentRequirement,
    ComponentState, ConfigurationPolicy, SatisfactionState,
};
pub use snapshot::EcmGraphSnapshot;

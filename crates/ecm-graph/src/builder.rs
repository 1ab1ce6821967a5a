//! Graph builder for mirroring a snapshot into the relation graph.
//!
//! Every node and edge the web console draws for a snapshot is fed into an
//! EcmGraph here, in the same order the console creates them:
//! 1. components, with one edge per requirement
//! 2. capabilities, with an edge back to their providing component
//!
//! Requirements that are not wired to anything get a placeholder
//! "missing" node so the hover still shows what the component is waiting for.

use crate::graph::EcmGraph;
use crate::node::{Node, NodeId, Payload};
use ecm_core::{
    CapabilityNode, CapabilityType, ComponentNode, ComponentRequirement, ComponentState,
    EcmGraphSnapshot,
};
use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Payload key holding the node kind.
pub const KIND_KEY: &str = "kind";

/// What a node in the built graph stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Component,
    Capability,
    /// Placeholder for an unwired requirement.
    Missing,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Component => "component",
            NodeKind::Capability => "capability",
            NodeKind::Missing => "missing",
        }
    }

    /// Reads the kind recorded in a node's payload.
    pub fn of(node: &Node) -> Option<Self> {
        match node.payload().get(KIND_KEY)?.as_str()? {
            "component" => Some(NodeKind::Component),
            "capability" => Some(NodeKind::Capability),
            "missing" => Some(NodeKind::Missing),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds an EcmGraph from snapshots.
pub struct GraphBuilder {
    graph: EcmGraph,
    /// Requirement id labelling each component → capability edge.
    requirement_labels: IndexMap<(NodeId, NodeId), String>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            graph: EcmGraph::new(),
            requirement_labels: IndexMap::new(),
        }
    }

    /// Builds the graph for one snapshot.
    pub fn from_snapshot(snapshot: &EcmGraphSnapshot) -> EcmGraph {
        let mut builder = Self::new();
        builder.add_snapshot(snapshot);
        builder.build()
    }

    /// Mirrors every node and edge of a snapshot into the graph.
    pub fn add_snapshot(&mut self, snapshot: &EcmGraphSnapshot) {
        for component in &snapshot.components {
            self.add_component(component);
        }
        for capability in &snapshot.capabilities {
            self.add_capability(capability);
        }

        let unresolved = self
            .graph
            .nodes()
            .filter(|node| NodeKind::of(node).is_none())
            .count();
        if unresolved > 0 {
            warn!(
                "{} referenced nodes are not declared in the snapshot",
                unresolved
            );
        }

        debug!(
            "Built graph: {} nodes, {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
    }

    /// Adds a component and an edge for each of its requirements.
    pub fn add_component(&mut self, component: &ComponentNode) {
        self.graph
            .add_node(component.node_id.as_str(), Some(component_payload(component)));

        for (index, requirement) in component.requirements.iter().enumerate() {
            let target = match &requirement.capability_node_id {
                Some(capability_id) => {
                    self.graph
                        .connect(component.node_id.as_str(), capability_id.as_str());
                    capability_id.clone()
                }
                None => {
                    let missing_id = missing_node_id(&component.node_id, index);
                    self.graph.add_connection(
                        component.node_id.as_str(),
                        missing_id.as_str(),
                        None,
                        Some(missing_payload(requirement)),
                    );
                    missing_id
                }
            };

            self.requirement_labels.insert(
                (component.node_id.clone(), target),
                requirement.requirement_id.clone(),
            );
        }
    }

    /// Adds a capability and, if a component provides it, the edge to it.
    pub fn add_capability(&mut self, capability: &CapabilityNode) {
        self.graph
            .add_node(capability.node_id.as_str(), Some(capability_payload(capability)));

        if let Some(component_id) = &capability.component_node_id {
            if !self.graph.contains(component_id) {
                warn!(
                    "Capability {} is provided by unknown component {}",
                    capability.node_id, component_id
                );
            }
            self.graph
                .connect(capability.node_id.as_str(), component_id.as_str());
        }
    }

    /// The requirement id that produced the edge `component -> target`.
    pub fn requirement_label(&self, component: &str, target: &str) -> Option<&str> {
        self.requirement_labels
            .get(&(component.to_string(), target.to_string()))
            .map(|label| label.as_str())
    }

    /// The graph built so far.
    pub fn graph(&self) -> &EcmGraph {
        &self.graph
    }

    /// Finishes building and returns the graph.
    pub fn build(self) -> EcmGraph {
        self.graph
    }
}

/// Identifier of the placeholder for the `index`-th requirement of a component.
pub fn missing_node_id(component_id: &str, index: usize) -> NodeId {
    format!("missing.{}.{}", component_id, index)
}

fn component_payload(component: &ComponentNode) -> Payload {
    let mut payload = Payload::new();
    payload.insert(KIND_KEY.to_string(), json!(NodeKind::Component.as_str()));
    payload.insert("name".to_string(), json!(component.name));
    payload.insert("state".to_string(), json!(component.state.as_str()));
    if let Some(description) = &component.description {
        payload.insert("description".to_string(), json!(description));
    }
    if let Some(policy) = component.configuration_policy {
        payload.insert("configurationPolicy".to_string(), json!(policy.as_str()));
    }
    payload.insert(
        "properties".to_string(),
        Value::Object(component.properties.clone().into_iter().collect()),
    );
    payload
}

fn capability_payload(capability: &CapabilityNode) -> Payload {
    let state = capability.component_state.unwrap_or(ComponentState::Active);

    let mut payload = Payload::new();
    payload.insert(KIND_KEY.to_string(), json!(NodeKind::Capability.as_str()));
    payload.insert(
        "capabilityType".to_string(),
        json!(capability.capability_type.as_str()),
    );
    if let Some(namespace) = &capability.namespace {
        payload.insert("namespace".to_string(), json!(namespace));
    }
    if let Some(clause) = &capability.clause {
        payload.insert("clause".to_string(), json!(clause));
    }
    payload.insert("componentState".to_string(), json!(state.as_str()));
    payload.insert("guessed".to_string(), json!(capability.guessed));
    payload.insert(
        "attributes".to_string(),
        Value::Object(capability.attributes.clone().into_iter().collect()),
    );
    if let Some(bundle_id) = capability.bundle_id {
        payload.insert("bundleId".to_string(), json!(bundle_id));
    }
    payload
}

fn missing_payload(requirement: &ComponentRequirement) -> Payload {
    let accepted = requirement
        .accepted_capability_type
        .unwrap_or(CapabilityType::BundleCapability);

    let mut payload = Payload::new();
    payload.insert(KIND_KEY.to_string(), json!(NodeKind::Missing.as_str()));
    payload.insert("label".to_string(), json!(accepted.label()));
    payload.insert("capabilityType".to_string(), json!(accepted.as_str()));
    payload.insert(
        "requirementId".to_string(),
        json!(requirement.requirement_id),
    );
    payload
}

//! Snapshot model of the ECM component graph.
//!
//! These types mirror the `graph.json` payload the web console serves:
//! components with their requirements, and the capabilities (services and
//! bundle capabilities) those requirements are wired to. Every node carries
//! a caller-derived `nodeId` that is unique across the whole snapshot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form attribute map, kept in document order.
pub type AttributeMap = IndexMap<String, Value>;

/// Lifecycle state of a component revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentState {
    Stopped,
    Active,
    Unsatisfied,
    Failed,
    FailedPermanent,
    UpdatingConfiguration,
}

impl ComponentState {
    /// Returns the wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentState::Stopped => "STOPPED",
            ComponentState::Active => "ACTIVE",
            ComponentState::Unsatisfied => "UNSATISFIED",
            ComponentState::Failed => "FAILED",
            ComponentState::FailedPermanent => "FAILED_PERMANENT",
            ComponentState::UpdatingConfiguration => "UPDATING_CONFIGURATION",
        }
    }
}

impl std::fmt::Display for ComponentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a component reacts to its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigurationPolicy {
    Optional,
    Require,
    Ignore,
    Factory,
}

impl ConfigurationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigurationPolicy::Optional => "OPTIONAL",
            ConfigurationPolicy::Require => "REQUIRE",
            ConfigurationPolicy::Ignore => "IGNORE",
            ConfigurationPolicy::Factory => "FACTORY",
        }
    }
}

/// Kind of capability a requirement accepts or a capability node provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapabilityType {
    /// An OSGi service.
    Service,
    /// A generic capability declared by a bundle.
    BundleCapability,
}

impl CapabilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityType::Service => "SERVICE",
            CapabilityType::BundleCapability => "BUNDLE_CAPABILITY",
        }
    }

    /// Human-readable label used for placeholder nodes.
    pub fn label(&self) -> &'static str {
        match self {
            CapabilityType::Service => "Service",
            CapabilityType::BundleCapability => "Bundle Capability",
        }
    }
}

impl std::fmt::Display for CapabilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a requirement found a capability to wire to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SatisfactionState {
    /// Wired to a live capability.
    Satisfied,
    /// Not wired, but a broken component would provide a matching service.
    Guessed,
    /// Nothing provides it.
    Unsatisfied,
}

/// A requirement declared by a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRequirement {
    /// Identifier of the requirement inside its component.
    pub requirement_id: String,

    /// Requirement clause in OSGi header syntax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,

    /// Node the requirement is wired (or guessed) to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_node_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_capability_type: Option<CapabilityType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction_state: Option<SatisfactionState>,
}

impl ComponentRequirement {
    pub fn new(requirement_id: impl Into<String>) -> Self {
        Self {
            requirement_id: requirement_id.into(),
            clause: None,
            capability_node_id: None,
            accepted_capability_type: None,
            satisfaction_state: None,
        }
    }

    /// Wires the requirement to a capability node.
    pub fn wired_to(mut self, capability_node_id: impl Into<String>) -> Self {
        self.capability_node_id = Some(capability_node_id.into());
        self.satisfaction_state = Some(SatisfactionState::Satisfied);
        self
    }

    pub fn accepting(mut self, capability_type: CapabilityType) -> Self {
        self.accepted_capability_type = Some(capability_type);
        self
    }
}

/// A component revision in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub node_id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub state: ComponentState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_policy: Option<ConfigurationPolicy>,

    #[serde(default)]
    pub properties: AttributeMap,

    #[serde(default)]
    pub requirements: Vec<ComponentRequirement>,
}

impl ComponentNode {
    pub fn new(node_id: impl Into<String>, name: impl Into<String>, state: ComponentState) -> Self {
        Self {
            node_id: node_id.into(),
            name: name.into(),
            description: None,
            state,
            configuration_policy: None,
            properties: AttributeMap::new(),
            requirements: Vec::new(),
        }
    }

    pub fn with_requirements(mut self, requirements: Vec<ComponentRequirement>) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A capability node: a registered service or a bundle capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityNode {
    pub node_id: String,
    pub capability_type: CapabilityType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,

    /// Component that provides this capability, if it is ECM-managed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_node_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_state: Option<ComponentState>,

    /// Service capability inferred from a component that is not active.
    #[serde(default)]
    pub guessed: bool,

    #[serde(default)]
    pub attributes: AttributeMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<i64>,
}

impl CapabilityNode {
    pub fn new(node_id: impl Into<String>, capability_type: CapabilityType) -> Self {
        Self {
            node_id: node_id.into(),
            capability_type,
            namespace: None,
            clause: None,
            component_node_id: None,
            component_state: None,
            guessed: false,
            attributes: AttributeMap::new(),
            bundle_id: None,
        }
    }

    /// Marks the capability as provided by a component.
    pub fn provided_by(mut self, component_node_id: impl Into<String>) -> Self {
        self.component_node_id = Some(component_node_id.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

//! Snapshot loading and validation.
//!
//! A snapshot is one `graph.json` document. It is decoded as a whole and
//! validated before anything is built from it, so a malformed payload never
//! reaches the graph.

use crate::error::{Result, SnapshotError};
use crate::model::{CapabilityNode, ComponentNode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// A complete ECM graph snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EcmGraphSnapshot {
    #[serde(default)]
    pub components: Vec<ComponentNode>,

    #[serde(default)]
    pub capabilities: Vec<CapabilityNode>,
}

impl EcmGraphSnapshot {
    /// Decodes and validates a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: EcmGraphSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Decodes and validates a snapshot from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let snapshot: EcmGraphSnapshot = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reads a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let snapshot = Self::from_reader(BufReader::new(file))?;

        debug!(
            "Loaded snapshot {} ({} components, {} capabilities)",
            path.display(),
            snapshot.components.len(),
            snapshot.capabilities.len()
        );

        Ok(snapshot)
    }

    /// Checks that every node identifier is non-blank and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        let ids = self
            .components
            .iter()
            .map(|c| c.node_id.as_str())
            .chain(self.capabilities.iter().map(|c| c.node_id.as_str()));

        for id in ids {
            if id.trim().is_empty() {
                return Err(SnapshotError::InvalidSnapshot(
                    "node with a blank nodeId".to_string(),
                ));
            }
            if !seen.insert(id) {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "duplicate nodeId '{}'",
                    id
                )));
            }
        }

        Ok(())
    }

    /// Total number of declared nodes.
    pub fn node_count(&self) -> usize {
        self.components.len() + self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

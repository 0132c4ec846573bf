use super::node::{Connection, Node};
use crate::error::SnapshotError;
use ahash::AHashSet;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FLOW_NAME: &str = "Current Flow";
pub const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowMetadata {
    pub name: String,
    pub version: String,
    /// Wall-clock time of the export, not of graph creation.
    pub created_at: DateTime<Utc>,
}

/// The serializable state of an entire flow graph.
///
/// A snapshot is a detached copy: exporting again produces a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub metadata: FlowMetadata,
}

impl FlowSnapshot {
    /// Checks the invariants an import relies on: unique node ids and
    /// connections whose endpoints exist and run output → input.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut ids = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(SnapshotError::DuplicateNodeId(node.id.clone()));
            }
        }

        for connection in &self.connections {
            let from_node_id = connection.from_node_id.as_str();
            let to_node_id = connection.to_node_id.as_str();
            if !ids.contains(from_node_id) || !ids.contains(to_node_id) {
                return Err(SnapshotError::DanglingConnection {
                    from_node_id: from_node_id.to_string(),
                    to_node_id: to_node_id.to_string(),
                });
            }
            if !connection.is_well_directed() {
                return Err(SnapshotError::MisdirectedConnection {
                    from_node_id: from_node_id.to_string(),
                    to_node_id: to_node_id.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Encoding(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))
    }

    /// Encodes the snapshot in the compact bincode format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(self, standard()).map_err(|e| SnapshotError::Encoding(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| SnapshotError::Parse(e.to_string()))
    }
}

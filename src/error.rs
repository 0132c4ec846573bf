use thiserror::Error;

/// Errors that can occur while decoding or importing a flow snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Failed to parse flow snapshot: {0}")]
    Parse(String),

    #[error("Failed to encode flow snapshot: {0}")]
    Encoding(String),

    #[error("Node id '{0}' appears more than once in the snapshot")]
    DuplicateNodeId(String),

    #[error("Connection from '{from_node_id}' to '{to_node_id}' references a node that is not in the snapshot")]
    DanglingConnection {
        from_node_id: String,
        to_node_id: String,
    },

    #[error("Connection from '{from_node_id}' to '{to_node_id}' must run from an output port to an input port")]
    MisdirectedConnection {
        from_node_id: String,
        to_node_id: String,
    },
}

/// Errors reported by a persistence collaborator.
///
/// These never leave the in-memory flow in a modified state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("I/O failure on '{path}': {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Errors that can occur while loading a knowledge base.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnowledgeBaseError {
    #[error("Failed to parse knowledge base JSON: {0}")]
    Parse(String),

    #[error("Could not read knowledge base file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Intent '{0}' is declared more than once")]
    DuplicateIntent(String),

    #[error("Intent '{intent}' has confidence {confidence}, expected a value in (0, 1]")]
    InvalidConfidence { intent: String, confidence: f64 },
}

/// Errors that can occur while loading engine configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config JSON: {0}")]
    Parse(String),
}

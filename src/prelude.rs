//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the kaiwa crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kaiwa::prelude::*;
//! use std::sync::Arc;
//!
//! # fn run_example() -> Result<()> {
//! let config = EngineConfig::from_file("path/to/config.json")?;
//! let knowledge_base = Arc::new(KnowledgeBase::from_file("path/to/knowledge_base.json")?);
//!
//! let mut session = config.session(knowledge_base, None);
//! let reply = session.submit("office hours");
//! println!("{} -> {}", reply.intent, reply.response);
//! # Ok(())
//! # }
//! ```

// Flow authoring
pub use crate::flow::{
    CanvasBounds, CanvasSize, Connection, DragTarget, FlowEditor, FlowEvent, FlowGraphStore,
    FlowObserver, FlowSnapshot, Node, NodePlacementController, NodeType, PaletteItem, Position,
    default_palette,
};

// Conversation
pub use crate::chat::{
    ConversationSession, ConversationTurn, IntentMatcher, KnowledgeBase, KnowledgeBaseEntry,
    MatchResult, MatchSource, MatcherConfig, ScoringMode,
};

// Persistence, analytics and configuration
pub use crate::analytics::{AnalyticsReport, AnalyticsTracker};
pub use crate::config::EngineConfig;
pub use crate::persistence::{FlowRepository, InMemoryRepository, JsonFileRepository};

// Error types
pub use crate::error::{ConfigError, KnowledgeBaseError, PersistenceError, SnapshotError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

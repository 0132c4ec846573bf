use crate::chat::{ConversationSession, IntentMatcher, KnowledgeBase, MatcherConfig, SessionConfig};
use crate::error::ConfigError;
use crate::flow::{CanvasSize, FlowEditor, FlowGraphStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Tunables for the editor canvas, the matcher and conversation sessions.
///
/// Every section is optional in the JSON form; missing values take defaults.
///
/// ```json
/// {
///   "canvas": { "width": 1600, "height": 900, "node_width": 220, "node_height": 120 },
///   "matcher": { "threshold": 0.6, "scoring": "best_utterance" },
///   "session": { "history_capacity": 20 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas: CanvasSize,
    pub matcher: MatcherConfig,
    pub session: SessionConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// An empty editor whose store clamps into this config's canvas.
    pub fn editor(&self) -> FlowEditor {
        FlowEditor::new(FlowGraphStore::new(self.canvas.bounds()))
    }

    /// A conversation session over `knowledge_base`. A `seed` makes fallback
    /// replies reproducible.
    pub fn session(
        &self,
        knowledge_base: Arc<KnowledgeBase>,
        seed: Option<u64>,
    ) -> ConversationSession {
        let matcher = match seed {
            Some(seed) => IntentMatcher::with_seed(knowledge_base, self.matcher.clone(), seed),
            None => IntentMatcher::new(knowledge_base, self.matcher.clone()),
        };
        ConversationSession::with_config(matcher, self.session)
    }
}

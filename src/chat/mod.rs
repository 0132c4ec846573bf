//! The rule-based conversation side: knowledge base, intent matching and sessions.

pub mod knowledge;
pub mod matcher;
pub mod session;

pub use knowledge::{KnowledgeBase, KnowledgeBaseEntry};
pub use matcher::{
    DEFAULT_FALLBACK_RESPONSES, FALLBACK_INTENT, IntentMatcher, IntentScore, MatchResult,
    MatchSource, MatcherConfig, ScoringMode,
};
pub use session::{ConversationSession, ConversationTurn, SessionConfig};

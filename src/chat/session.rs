use super::matcher::{IntentMatcher, MatchResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub history_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// One exchange between the user and the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub timestamp: DateTime<Utc>,
    pub user_text: String,
    pub bot_text: String,
    pub intent: String,
    pub confidence: f64,
}

/// A single conversational context: a matcher plus its recent turns.
///
/// History is a fixed-capacity ring; once full, the oldest turn is dropped
/// for every new one.
pub struct ConversationSession {
    matcher: IntentMatcher,
    history: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl ConversationSession {
    pub fn new(matcher: IntentMatcher) -> Self {
        Self::with_config(matcher, SessionConfig::default())
    }

    pub fn with_config(matcher: IntentMatcher, config: SessionConfig) -> Self {
        let capacity = config.history_capacity.max(1);
        Self {
            matcher,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Answers `text` and records the exchange.
    pub fn submit(&mut self, text: &str) -> MatchResult {
        let result = self.matcher.match_utterance(text);
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(ConversationTurn {
            timestamp: Utc::now(),
            user_text: text.to_string(),
            bot_text: result.response.clone(),
            intent: result.intent.clone(),
            confidence: result.confidence,
        });
        result
    }

    /// Recent turns, oldest first.
    pub fn history(&self) -> &VecDeque<ConversationTurn> {
        &self.history
    }

    pub fn last_turn(&self) -> Option<&ConversationTurn> {
        self.history.back()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn matcher(&self) -> &IntentMatcher {
        &self.matcher
    }
}

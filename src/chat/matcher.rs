use super::knowledge::{KnowledgeBase, KnowledgeBaseEntry};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

pub const FALLBACK_INTENT: &str = "fallback";

pub const DEFAULT_FALLBACK_RESPONSES: [&str; 4] = [
    "I'd be happy to help! Could you please provide more details about your ADTU-related question?",
    "I have information about ADTU admissions, academics, hostel, and campus facilities. What would you like to know?",
    "Let me help you with that. Could you be more specific about what you're looking for?",
    "I specialize in ADTU information. Please ask about admissions, courses, facilities, or student services.",
];

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    KnowledgeBase,
    Fallback,
}

/// The reply chosen for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub intent: String,
    pub response: String,
    pub confidence: f64,
    pub source: MatchSource,
}

impl MatchResult {
    pub fn is_fallback(&self) -> bool {
        self.source == MatchSource::Fallback
    }
}

/// How an entry's utterance hits are turned into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// `confidence × (matched utterances / registered utterances)`.
    #[default]
    Coverage,
    /// `confidence` as soon as any single utterance occurs in the input.
    BestUtterance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// A best score must be strictly greater than this to answer from the knowledge base.
    pub threshold: f64,
    pub fallback_confidence: f64,
    pub fallback_responses: Vec<String>,
    pub scoring: ScoringMode,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            fallback_confidence: 0.5,
            fallback_responses: DEFAULT_FALLBACK_RESPONSES
                .iter()
                .map(|r| r.to_string())
                .collect(),
            scoring: ScoringMode::Coverage,
        }
    }
}

/// One entry's score for a given input.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentScore<'a> {
    pub intent: &'a str,
    pub matched_utterances: usize,
    pub score: f64,
}

/// Scores free text against a knowledge base by literal substring containment.
///
/// Fallback replies are drawn from a seedable generator so that a fixed seed
/// reproduces the same sequence of replies.
pub struct IntentMatcher {
    knowledge_base: Arc<KnowledgeBase>,
    config: MatcherConfig,
    rng: StdRng,
}

impl IntentMatcher {
    /// Creates a matcher whose fallback choice is seeded from the OS.
    pub fn new(knowledge_base: Arc<KnowledgeBase>, config: MatcherConfig) -> Self {
        Self::with_rng(knowledge_base, config, StdRng::from_os_rng())
    }

    pub fn with_seed(knowledge_base: Arc<KnowledgeBase>, config: MatcherConfig, seed: u64) -> Self {
        Self::with_rng(knowledge_base, config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(knowledge_base: Arc<KnowledgeBase>, config: MatcherConfig, rng: StdRng) -> Self {
        Self {
            knowledge_base,
            config,
            rng,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Scores every entry against `utterance`, in knowledge-base order.
    pub fn rank(&self, utterance: &str) -> Vec<IntentScore<'_>> {
        let input = normalize(utterance);
        self.knowledge_base
            .entries()
            .iter()
            .map(|entry| {
                let matched = count_matches(entry, &input);
                IntentScore {
                    intent: &entry.intent,
                    matched_utterances: matched,
                    score: score(entry, matched, self.config.scoring),
                }
            })
            .collect()
    }

    /// Picks the reply for `utterance`.
    ///
    /// The highest-scoring entry wins, earlier entries winning ties. If no
    /// score clears the threshold a random canned reply is returned instead.
    pub fn match_utterance(&mut self, utterance: &str) -> MatchResult {
        let input = normalize(utterance);
        let knowledge_base = Arc::clone(&self.knowledge_base);
        let mut best: Option<(&KnowledgeBaseEntry, f64)> = None;
        for entry in knowledge_base.entries() {
            let score = score(entry, count_matches(entry, &input), self.config.scoring);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((entry, score));
            }
        }

        match best {
            Some((entry, score)) if score > self.config.threshold => {
                debug!(intent = %entry.intent, score, "intent matched");
                MatchResult {
                    intent: entry.intent.clone(),
                    response: entry.response.clone(),
                    confidence: score,
                    source: MatchSource::KnowledgeBase,
                }
            }
            _ => {
                let best_score = best.map_or(0.0, |(_, s)| s);
                let response = self.pick_fallback();
                debug!(best_score, "no intent cleared the threshold, falling back");
                MatchResult {
                    intent: FALLBACK_INTENT.to_string(),
                    response,
                    confidence: self.config.fallback_confidence,
                    source: MatchSource::Fallback,
                }
            }
        }
    }

    fn pick_fallback(&mut self) -> String {
        self.config
            .fallback_responses
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_FALLBACK_RESPONSES[0].to_string())
    }
}

fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase()
}

fn count_matches(entry: &KnowledgeBaseEntry, input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }
    entry
        .utterances
        .iter()
        .filter(|u| !u.is_empty() && input.contains(u.as_str()))
        .count()
}

fn score(entry: &KnowledgeBaseEntry, matched: usize, mode: ScoringMode) -> f64 {
    if entry.utterances.is_empty() || matched == 0 {
        return 0.0;
    }
    match mode {
        ScoringMode::Coverage => {
            entry.confidence * (matched as f64 / entry.utterances.len() as f64)
        }
        ScoringMode::BestUtterance => entry.confidence,
    }
}

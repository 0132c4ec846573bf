//! Running conversation statistics for dashboards and the test panel.

use crate::chat::MatchResult;
use ahash::AHashMap;
use itertools::Itertools;
use serde::Serialize;
use std::time::Duration;

const TOP_INTENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
struct IntentTally {
    count: u64,
    total_confidence: f64,
}

/// Per-intent figures in an [`AnalyticsReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentSummary {
    pub intent: String,
    pub count: u64,
    pub average_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_conversations: u64,
    /// Most frequent intents first, ties broken by intent name.
    pub top_intents: Vec<IntentSummary>,
    pub average_satisfaction: f64,
    /// Seconds.
    pub average_response_time: f64,
}

/// Accumulates what the bot answered, how confidently and how well it was received.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsTracker {
    conversations: u64,
    intents: AHashMap<String, IntentTally>,
    satisfaction: Vec<f64>,
    response_times: Vec<f64>,
}

impl AnalyticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(
        &mut self,
        intent: &str,
        confidence: f64,
        response_time: Option<Duration>,
        satisfaction: Option<f64>,
    ) {
        self.conversations += 1;
        let tally = self.intents.entry(intent.to_string()).or_default();
        tally.count += 1;
        tally.total_confidence += confidence;

        if let Some(rating) = satisfaction {
            self.satisfaction.push(rating);
        }
        if let Some(elapsed) = response_time {
            self.response_times.push(elapsed.as_secs_f64());
        }
    }

    pub fn track_result(&mut self, result: &MatchResult, response_time: Option<Duration>) {
        self.track(&result.intent, result.confidence, response_time, None);
    }

    pub fn report(&self) -> AnalyticsReport {
        let top_intents = self
            .intents
            .iter()
            .sorted_by(|(a_name, a), (b_name, b)| {
                b.count.cmp(&a.count).then_with(|| a_name.cmp(b_name))
            })
            .take(TOP_INTENT_LIMIT)
            .map(|(intent, tally)| IntentSummary {
                intent: intent.clone(),
                count: tally.count,
                average_confidence: tally.total_confidence / tally.count as f64,
            })
            .collect();

        AnalyticsReport {
            total_conversations: self.conversations,
            top_intents,
            average_satisfaction: mean(&self.satisfaction),
            average_response_time: mean(&self.response_times),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

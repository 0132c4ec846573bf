use crate::error::KnowledgeBaseError;
use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One intent with its trigger phrases, canned response and static weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseEntry {
    pub intent: String,
    pub utterances: Vec<String>,
    pub response: String,
    pub confidence: f64,
}

impl KnowledgeBaseEntry {
    pub fn new(
        intent: impl Into<String>,
        utterances: &[&str],
        response: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            intent: intent.into(),
            utterances: utterances.iter().map(|u| u.to_string()).collect(),
            response: response.into(),
            confidence,
        }
    }

    /// Lower-cases and trims utterances, dropping blanks and duplicates.
    fn normalized(mut self) -> Self {
        self.utterances = self
            .utterances
            .iter()
            .map(|u| u.trim().to_lowercase())
            .filter(|u| !u.is_empty())
            .unique()
            .collect();
        self
    }
}

/// The read-only collection of intents a matcher scores against.
///
/// Declaration order is significant: it breaks ties between equal scores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeBaseEntry>,
}

impl KnowledgeBase {
    /// Validates and normalizes a list of entries.
    pub fn from_entries(entries: Vec<KnowledgeBaseEntry>) -> Result<Self, KnowledgeBaseError> {
        let mut seen = AHashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.intent.as_str()) {
                return Err(KnowledgeBaseError::DuplicateIntent(entry.intent.clone()));
            }
            if !(entry.confidence > 0.0 && entry.confidence <= 1.0) {
                return Err(KnowledgeBaseError::InvalidConfidence {
                    intent: entry.intent.clone(),
                    confidence: entry.confidence,
                });
            }
        }
        Ok(Self {
            entries: entries
                .into_iter()
                .map(KnowledgeBaseEntry::normalized)
                .collect(),
        })
    }

    /// Parses a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeBaseError> {
        let entries: Vec<KnowledgeBaseEntry> =
            serde_json::from_str(json).map_err(|e| KnowledgeBaseError::Parse(e.to_string()))?;
        Self::from_entries(entries)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| KnowledgeBaseError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// The university help-desk intents the platform ships with.
    pub fn sample() -> Self {
        let entries = vec![
            KnowledgeBaseEntry::new(
                "campus.office_hours",
                &["office hours", "when is office open", "administrative timing"],
                "Administrative offices are open 9 AM to 5 PM, Monday to Friday",
                0.95,
            ),
            KnowledgeBaseEntry::new(
                "academic.registration",
                &["register for classes", "course enrollment", "how to register"],
                "Log into student portal > Course Registration > Select courses > Confirm enrollment",
                0.98,
            ),
            KnowledgeBaseEntry::new(
                "hostel.accommodation",
                &["hostel application", "accommodation", "room booking"],
                "Fill hostel application form during admission or contact Hostel Office directly",
                0.92,
            ),
            KnowledgeBaseEntry::new(
                "fees.payment",
                &["fee payment", "online fees", "payment methods"],
                "Visit student portal > Fee Payment section > Choose payment method (UPI/Net Banking/Cards)",
                0.94,
            ),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(KnowledgeBaseEntry::normalized)
                .collect(),
        }
    }

    pub fn entries(&self) -> &[KnowledgeBaseEntry] {
        &self.entries
    }

    pub fn get(&self, intent: &str) -> Option<&KnowledgeBaseEntry> {
        self.entries.iter().find(|e| e.intent == intent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

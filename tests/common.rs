//! Common test utilities for building flows, knowledge bases and sessions.
use kaiwa::prelude::*;
use std::sync::{Arc, Mutex};

/// A store with the default 1000 × 700 placement bounds.
#[allow(dead_code)]
pub fn create_empty_store() -> FlowGraphStore {
    FlowGraphStore::new(CanvasBounds::default())
}

/// An editor seeded with the starter flow `node-1 → node-2 → node-3`.
#[allow(dead_code)]
pub fn create_sample_editor() -> FlowEditor {
    FlowEditor::new(FlowGraphStore::with_sample_flow(CanvasBounds::default()))
}

#[allow(dead_code)]
pub fn palette_item(node_type: &str) -> PaletteItem {
    default_palette()
        .into_iter()
        .find(|item| item.node_type == node_type)
        .unwrap_or_else(|| PaletteItem::new(node_type, "?", "Unknown"))
}

#[allow(dead_code)]
pub fn sample_knowledge_base() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::sample())
}

/// A seeded matcher over the sample knowledge base.
#[allow(dead_code)]
pub fn create_matcher(seed: u64) -> IntentMatcher {
    IntentMatcher::with_seed(sample_knowledge_base(), MatcherConfig::default(), seed)
}

#[allow(dead_code)]
pub fn create_session(seed: u64) -> ConversationSession {
    ConversationSession::new(create_matcher(seed))
}

/// Registers an observer that records every event into the returned log.
#[allow(dead_code)]
pub fn record_events(store: &mut FlowGraphStore) -> Arc<Mutex<Vec<FlowEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    store.subscribe(move |event: &FlowEvent| sink.lock().unwrap().push(event.clone()));
    log
}

#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

//! Unit-level tests for configuration, knowledge base loading, analytics and errors.
mod common;
use common::*;
use kaiwa::chat::SessionConfig;
use kaiwa::prelude::*;
use std::fs;
use std::time::Duration;

#[test]
fn test_canvas_bounds_from_size() {
    assert_eq!(CanvasBounds::default(), CanvasBounds { max_x: 1000, max_y: 700 });

    let narrow = CanvasSize {
        width: 100,
        height: 90,
        node_width: 200,
        node_height: 100,
    };
    assert_eq!(narrow.bounds(), CanvasBounds { max_x: 0, max_y: 0 });

    let bounds = CanvasBounds::default();
    assert!(bounds.contains(Position::new(0, 700)));
    assert!(!bounds.contains(Position::new(1001, 0)));
    assert_eq!(bounds.clamp(Position::new(-5, 350)), Position::new(0, 350));
}

#[test]
fn test_engine_config_defaults() {
    let config = EngineConfig::from_json("{}").unwrap();

    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.canvas, CanvasSize::default());
    assert_eq!(config.matcher.threshold, 0.7);
    assert_eq!(config.matcher.fallback_confidence, 0.5);
    assert_eq!(config.matcher.fallback_responses.len(), 4);
    assert_eq!(config.matcher.scoring, ScoringMode::Coverage);
    assert_eq!(config.session.history_capacity, 10);
}

#[test]
fn test_engine_config_partial_override() {
    let config = EngineConfig::from_json(
        r#"{ "matcher": { "threshold": 0.6, "scoring": "best_utterance" }, "canvas": { "node_width": 250 } }"#,
    )
    .unwrap();

    assert_eq!(config.matcher.threshold, 0.6);
    assert_eq!(config.matcher.scoring, ScoringMode::BestUtterance);
    assert_eq!(config.matcher.fallback_confidence, 0.5);
    assert_eq!(config.canvas.node_width, 250);
    assert_eq!(config.canvas.width, 1200);
    assert_eq!(config.session, SessionConfig::default());
}

#[test]
fn test_engine_config_errors() {
    assert!(matches!(EngineConfig::from_json("[1, 2"), Err(ConfigError::Parse(_))));

    let err = EngineConfig::from_file("/definitely/not/here/kaiwa.json").unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("kaiwa.json")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_engine_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.json");
    fs::write(&path, r#"{ "session": { "history_capacity": 25 } }"#).unwrap();

    let config = EngineConfig::from_file(&path).unwrap();
    assert_eq!(config.session.history_capacity, 25);
}

#[test]
fn test_sample_knowledge_base() {
    let knowledge_base = KnowledgeBase::sample();

    assert_eq!(knowledge_base.len(), 4);
    assert!(!knowledge_base.is_empty());
    let fees = knowledge_base.get("fees.payment").unwrap();
    assert_eq!(fees.confidence, 0.94);
    assert_eq!(fees.utterances, vec!["fee payment", "online fees", "payment methods"]);
    assert!(knowledge_base.get("unknown").is_none());
}

#[test]
fn test_knowledge_base_from_json_normalizes_utterances() {
    let json = r#"[
        { "intent": "library.hours", "utterances": ["Library Hours", "  when does the library open "],
          "response": "8 AM to 10 PM", "confidence": 0.9 }
    ]"#;
    let knowledge_base = KnowledgeBase::from_json(json).unwrap();

    assert_eq!(
        knowledge_base.entries()[0].utterances,
        vec!["library hours", "when does the library open"]
    );
}

#[test]
fn test_knowledge_base_rejects_duplicate_intents() {
    let entries = vec![
        KnowledgeBaseEntry::new("hello", &["hi"], "Hi", 0.9),
        KnowledgeBaseEntry::new("hello", &["hey"], "Hey", 0.8),
    ];
    assert_eq!(
        KnowledgeBase::from_entries(entries).unwrap_err(),
        KnowledgeBaseError::DuplicateIntent("hello".to_string())
    );
}

#[test]
fn test_knowledge_base_rejects_out_of_range_confidence() {
    for confidence in [0.0, -0.3, 1.01, f64::NAN] {
        let entries = vec![KnowledgeBaseEntry::new("bad", &["x"], "x", confidence)];
        assert!(matches!(
            KnowledgeBase::from_entries(entries),
            Err(KnowledgeBaseError::InvalidConfidence { .. })
        ));
    }
    let full = vec![KnowledgeBaseEntry::new("ok", &["x"], "x", 1.0)];
    assert!(KnowledgeBase::from_entries(full).is_ok());
}

#[test]
fn test_knowledge_base_file_errors() {
    assert!(matches!(
        KnowledgeBase::from_file("/no/such/knowledge_base.json"),
        Err(KnowledgeBaseError::Io { .. })
    ));
    assert!(matches!(
        KnowledgeBase::from_json("{\"intent\": 1}"),
        Err(KnowledgeBaseError::Parse(_))
    ));
}

#[test]
fn test_error_messages() {
    let dangling = SnapshotError::DanglingConnection {
        from_node_id: "node-1".to_string(),
        to_node_id: "node-9".to_string(),
    };
    assert_eq!(
        dangling.to_string(),
        "Connection from 'node-1' to 'node-9' references a node that is not in the snapshot"
    );

    let wrapped: PersistenceError = SnapshotError::DuplicateNodeId("node-2".to_string()).into();
    assert_eq!(
        wrapped.to_string(),
        "Node id 'node-2' appears more than once in the snapshot"
    );

    let invalid = KnowledgeBaseError::InvalidConfidence {
        intent: "fees".to_string(),
        confidence: 1.5,
    };
    assert_eq!(
        invalid.to_string(),
        "Intent 'fees' has confidence 1.5, expected a value in (0, 1]"
    );
}

#[test]
fn test_empty_analytics_report() {
    let report = AnalyticsTracker::new().report();

    assert_eq!(report.total_conversations, 0);
    assert!(report.top_intents.is_empty());
    assert_eq!(report.average_satisfaction, 0.0);
    assert_eq!(report.average_response_time, 0.0);
}

#[test]
fn test_analytics_report_aggregates() {
    let mut tracker = AnalyticsTracker::new();
    tracker.track("fees.payment", 0.9, Some(Duration::from_millis(100)), Some(4.0));
    tracker.track("fees.payment", 0.7, Some(Duration::from_millis(300)), Some(2.0));
    tracker.track("hostel.accommodation", 0.92, None, None);

    let report = tracker.report();
    assert_eq!(report.total_conversations, 3);
    assert!(approx_eq(report.average_satisfaction, 3.0));
    assert!(approx_eq(report.average_response_time, 0.2));

    let fees = &report.top_intents[0];
    assert_eq!(fees.intent, "fees.payment");
    assert_eq!(fees.count, 2);
    assert!(approx_eq(fees.average_confidence, 0.8));
}

#[test]
fn test_analytics_top_intents_are_capped_and_ordered() {
    let mut tracker = AnalyticsTracker::new();
    let counts = [("a", 1), ("b", 3), ("c", 2), ("d", 2), ("e", 1), ("f", 4), ("g", 1)];
    for (intent, count) in counts {
        for _ in 0..count {
            tracker.track(intent, 0.9, None, None);
        }
    }

    let order: Vec<String> = tracker.report().top_intents.into_iter().map(|s| s.intent).collect();
    assert_eq!(order, vec!["f", "b", "c", "d", "a"]);
}

#[test]
fn test_track_result_counts_fallbacks() {
    let mut tracker = AnalyticsTracker::new();
    let mut session = create_session(8);
    let reply = session.submit("asdkjhasd");
    tracker.track_result(&reply, None);

    let report = tracker.report();
    assert_eq!(report.top_intents[0].intent, "fallback");
    assert!(approx_eq(report.top_intents[0].average_confidence, 0.5));
}

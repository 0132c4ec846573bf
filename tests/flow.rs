//! Tests for the flow graph store and the editing service.
mod common;
use common::*;
use kaiwa::flow::Content;
use kaiwa::prelude::*;

#[test]
fn test_add_node_assigns_increasing_ids() {
    let mut store = create_empty_store();
    let first = store.add_node(NodeType::Message, Position::new(10, 10), Content::new());
    let second = store.add_node(NodeType::Input, Position::new(20, 20), Content::new());

    assert_eq!(first.id, "node-1");
    assert_eq!(second.id, "node-2");
    assert_eq!(store.list_nodes().len(), 2);
}

#[test]
fn test_sample_flow_seeds_counter_above_existing_ids() {
    let mut editor = create_sample_editor();
    assert_eq!(editor.store().list_nodes().len(), 3);
    assert_eq!(editor.store().list_connections().len(), 2);

    let node = editor.create_node_from_palette_item(&palette_item("card"), Position::new(0, 0));
    assert_eq!(node.id, "node-4");
}

#[test]
fn test_add_node_clamps_out_of_canvas_positions() {
    let mut store = create_empty_store();
    let bounds = store.bounds();
    let requests = [
        Position::new(-50, -50),
        Position::new(5000, 5000),
        Position::new(-1, 9999),
        Position::new(400, 300),
        Position::new(i32::MIN, i32::MAX),
    ];

    for requested in requests {
        let node = store.add_node(NodeType::Action, requested, Content::new());
        assert!(node.position.x >= 0 && node.position.x <= bounds.max_x);
        assert!(node.position.y >= 0 && node.position.y <= bounds.max_y);
    }
    assert_eq!(store.list_nodes()[1].position, Position::new(1000, 700));
    assert_eq!(store.list_nodes()[3].position, Position::new(400, 300));
}

#[test]
fn test_add_node_uses_type_template_and_initial_content() {
    let mut store = create_empty_store();
    let initial = Content::from([("text".to_string(), "Hello there".to_string())]);
    let node = store.add_node(NodeType::Message, Position::new(0, 0), initial);

    assert_eq!(node.title, "Send Message");
    assert_eq!(node.content.get("text").map(String::as_str), Some("Hello there"));
    assert_eq!(node.content.get("message_type").map(String::as_str), Some("Text"));
}

#[test]
fn test_unknown_palette_type_degrades_to_generic_template() {
    let mut editor = FlowEditor::default();
    let item = PaletteItem::new("teleport", "🌀", "Teleport");
    let node = editor.create_node_from_palette_item(&item, Position::new(30, 30));

    assert_eq!(node.node_type, NodeType::Generic);
    assert!(node.content.is_empty());
    assert_eq!(node.title, "Teleport");
    assert_eq!(editor.store().node(&node.id), Some(&node));
}

#[test]
fn test_remove_node_cascades_connections() {
    let mut editor = create_sample_editor();
    let store = editor.store_mut();

    assert!(store.remove_node("node-2"));
    assert!(store.node("node-2").is_none());
    assert!(store.list_connections().is_empty());
    assert_eq!(store.list_nodes().len(), 2);
}

#[test]
fn test_remove_unknown_node_is_noop() {
    let mut editor = create_sample_editor();
    assert!(!editor.store_mut().remove_node("node-99"));
    assert_eq!(editor.store().list_nodes().len(), 3);
    assert_eq!(editor.store().list_connections().len(), 2);
}

#[test]
fn test_update_position_clamps_and_ignores_unknown_ids() {
    let mut store = create_empty_store();
    let node = store.add_node(NodeType::Start, Position::new(10, 10), Content::new());

    let written = store.update_node_position(&node.id, Position::new(-20, 2000));
    assert_eq!(written, Some(Position::new(0, 700)));
    assert_eq!(store.node(&node.id).unwrap().position, Position::new(0, 700));

    assert_eq!(store.update_node_position("missing", Position::new(1, 1)), None);
}

#[test]
fn test_connect_rejects_unknown_self_and_duplicate_edges() {
    let mut editor = create_sample_editor();
    let store = editor.store_mut();

    assert!(store.connect("node-1", "node-404").is_none());
    assert!(store.connect("node-1", "node-1").is_none());
    assert!(store.connect("node-1", "node-2").is_none());

    let connection = store.connect("node-3", "node-1").expect("new edge");
    assert_eq!(connection.from_port, kaiwa::flow::PortDirection::Output);
    assert_eq!(connection.to_port, kaiwa::flow::PortDirection::Input);
    assert_eq!(store.connections_of("node-1").count(), 2);

    assert!(store.disconnect("node-3", "node-1"));
    assert!(!store.disconnect("node-3", "node-1"));
}

#[test]
fn test_every_node_has_one_input_and_one_output_port() {
    let editor = create_sample_editor();
    for node in editor.store().list_nodes() {
        let [input, output] = node.ports();
        assert_eq!(input.direction, kaiwa::flow::PortDirection::Input);
        assert_eq!(output.direction, kaiwa::flow::PortDirection::Output);
        assert_eq!(input.node_id, node.id);
    }
}

#[test]
fn test_select_node_is_exclusive_and_clears_on_unknown() {
    let mut editor = create_sample_editor();

    assert_eq!(editor.select_node(Some("node-1")).map(|n| n.id.clone()), Some("node-1".into()));
    assert_eq!(editor.select_node(Some("node-2")).map(|n| n.id.clone()), Some("node-2".into()));
    assert_eq!(editor.selected_node().unwrap().id, "node-2");

    assert!(editor.select_node(Some("node-77")).is_none());
    assert!(editor.selected_node().is_none());

    editor.select_node(Some("node-3"));
    assert!(editor.select_node(None).is_none());
    assert!(editor.selected_node().is_none());
}

#[test]
fn test_delete_selected_node_clears_selection() {
    let mut editor = create_sample_editor();
    editor.select_node(Some("node-2"));

    assert!(editor.delete_node("node-2"));
    assert!(editor.selected_node().is_none());
}

#[test]
fn test_delete_other_node_keeps_selection() {
    let mut editor = create_sample_editor();
    editor.select_node(Some("node-1"));

    editor.delete_node("node-3");
    assert_eq!(editor.selected_node().unwrap().id, "node-1");
}

#[test]
fn test_delete_only_node_twice_is_noop() {
    let mut editor = FlowEditor::default();
    let node = editor.create_node_from_palette_item(&palette_item("message"), Position::new(5, 5));

    assert!(editor.delete_node(&node.id));
    assert!(editor.store().list_nodes().is_empty());
    assert!(!editor.delete_node(&node.id));
    assert!(editor.store().list_nodes().is_empty());
}

#[test]
fn test_title_and_field_edits() {
    let mut editor = create_sample_editor();
    let store = editor.store_mut();

    assert!(store.set_node_title("node-2", "Greeting"));
    assert!(store.set_node_field("node-2", "text", "Hi!"));
    assert!(!store.set_node_title("ghost", "Nope"));
    assert!(!store.set_node_field("ghost", "text", "Nope"));

    let node = store.node("node-2").unwrap();
    assert_eq!(node.title, "Greeting");
    assert_eq!(node.content["text"], "Hi!");
}

#[test]
fn test_observers_receive_changes_in_order() {
    let mut editor = create_sample_editor();
    let log = record_events(editor.store_mut());

    editor.select_node(Some("node-2"));
    editor.store_mut().update_node_position("node-2", Position::new(320, 140));
    editor.delete_node("node-2");

    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            FlowEvent::SelectionChanged(Some("node-2".to_string())),
            FlowEvent::NodeMoved {
                id: "node-2".to_string(),
                position: Position::new(320, 140),
            },
            FlowEvent::ConnectionRemoved(Connection::new("node-1", "node-2")),
            FlowEvent::ConnectionRemoved(Connection::new("node-2", "node-3")),
            FlowEvent::NodeRemoved("node-2".to_string()),
            FlowEvent::SelectionChanged(None),
        ]
    );
}

#[test]
fn test_node_type_names_round_trip() {
    for node_type in NodeType::ALL {
        assert_eq!(NodeType::from_name(node_type.name()), *node_type);
    }
    assert_eq!(NodeType::from_name("quick-replies"), NodeType::QuickReplies);
    assert_eq!(NodeType::from_name("Message"), NodeType::Generic);
    assert!(NodeType::Start.default_content().is_empty());
    assert!(NodeType::Integration.default_content().is_empty());
}

#[test]
fn test_default_palette_covers_every_declared_type() {
    let palette = default_palette();
    assert_eq!(palette.len(), NodeType::ALL.len());
    assert!(palette.iter().all(|item| item.resolved_type() != NodeType::Generic));
}

#[test]
fn test_shared_editor_across_threads() {
    use kaiwa::SharedEditor;
    use std::sync::{Arc, Mutex};
    use std::thread;

    let shared: SharedEditor = Arc::new(Mutex::new(FlowEditor::default()));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let editor = Arc::clone(&shared);
            thread::spawn(move || {
                let item = palette_item("message");
                editor
                    .lock()
                    .unwrap()
                    .create_node_from_palette_item(&item, Position::new(worker * 100, 0));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let editor = shared.lock().unwrap();
    let mut ids: Vec<&str> = editor.store().list_nodes().iter().map(|n| n.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["node-1", "node-2", "node-3", "node-4"]);
}

//! # Kaiwa - Conversation Flow Authoring and Intent Matching
//!
//! **Kaiwa** is the engine behind a visual chatbot builder. It covers the two
//! pieces of such a tool that carry real logic:
//!
//! - **Flow authoring**: a graph of typed nodes and directed connections, with
//!   palette-driven node creation, drag placement clamped to the canvas,
//!   single selection, and snapshot export/import for persistence.
//! - **Intent matching**: a small rule-based matcher that scores user text
//!   against a knowledge base of intents by substring containment and falls
//!   back to canned replies when nothing scores high enough.
//!
//! Rendering, page chrome and storage backends are left to the host; the crate
//! only exposes the operations they call.
//!
//! ## Core Workflow
//!
//! 1.  **Author**: Create a [`FlowEditor`](flow::FlowEditor), drop palette items
//!     onto it, and move nodes with a [`NodePlacementController`](flow::NodePlacementController).
//! 2.  **Persist**: Export a [`FlowSnapshot`](flow::FlowSnapshot) and hand it to a
//!     [`FlowRepository`](persistence::FlowRepository), or import one back.
//! 3.  **Converse**: Wrap an [`IntentMatcher`](chat::IntentMatcher) in a
//!     [`ConversationSession`](chat::ConversationSession) and submit user text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kaiwa::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     // 1. Build a flow from palette items.
//!     let mut editor = FlowEditor::new(FlowGraphStore::with_sample_flow(CanvasBounds::default()));
//!     let palette = default_palette();
//!     let card = editor.create_node_from_palette_item(&palette[6], Position::new(800, 100));
//!     editor.store_mut().connect("node-3", &card.id);
//!
//!     // 2. Drag it somewhere else; the canvas keeps it in bounds.
//!     let mut placement = NodePlacementController::new();
//!     placement.begin_drag(editor.store(), &card.id, Position::new(810, 110), DragTarget::Handle);
//!     placement.continue_drag(editor.store_mut(), Position::new(5000, -40), CanvasSize::default());
//!     placement.end_drag();
//!
//!     // 3. Save it.
//!     let repository = JsonFileRepository::new("flows/current_flow.json");
//!     editor.save_to(&repository)?;
//!
//!     // 4. Answer a question.
//!     let knowledge_base = Arc::new(KnowledgeBase::sample());
//!     let matcher = IntentMatcher::new(knowledge_base, MatcherConfig::default());
//!     let mut session = ConversationSession::new(matcher);
//!     let reply = session.submit("What are the payment methods for online fees? Fee payment help");
//!     println!("[{}] {} ({:.2})", reply.intent, reply.response, reply.confidence);
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod chat;
pub mod config;
pub mod error;
pub mod flow;
pub mod persistence;
pub mod prelude;

use std::sync::{Arc, Mutex};

/// An editor shared between threads. All access goes through the one lock.
pub type SharedEditor = Arc<Mutex<flow::FlowEditor>>;

/// A session shared between threads. All access goes through the one lock.
pub type SharedSession = Arc<Mutex<chat::ConversationSession>>;

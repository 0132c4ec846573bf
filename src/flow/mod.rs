//! The conversation-flow graph: node model, store, drag placement and editing.

pub mod editor;
pub mod event;
pub mod geometry;
pub mod node;
pub mod palette;
pub mod placement;
pub mod snapshot;
pub mod store;

pub use editor::FlowEditor;
pub use event::{FlowEvent, FlowObserver};
pub use geometry::{CanvasBounds, CanvasSize, Position};
pub use node::{Connection, Content, Node, NodeType, Port, PortDirection};
pub use palette::{PaletteItem, default_palette};
pub use placement::{DragTarget, NodePlacementController};
pub use snapshot::{FlowMetadata, FlowSnapshot};
pub use store::FlowGraphStore;

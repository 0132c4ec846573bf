use super::geometry::{CanvasSize, Position};
use super::store::FlowGraphStore;
use tracing::debug;

/// The part of a rendered node that received the pointer-down.
///
/// Only the drag handle starts a drag; every other role is an interactive
/// sub-element that keeps the pointer for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragTarget {
    Handle,
    TextField,
    TextArea,
    Select,
    Button,
    DeleteButton,
    Port,
}

impl DragTarget {
    pub fn starts_drag(&self) -> bool {
        matches!(self, DragTarget::Handle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DragState {
    node_id: String,
    offset: Position,
}

/// Drives pointer drag gestures against one node at a time.
///
/// Beginning a new drag while one is active implicitly ends the previous one.
#[derive(Debug, Default)]
pub struct NodePlacementController {
    active: Option<DragState>,
}

impl NodePlacementController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts dragging `node_id`, remembering where inside the node the
    /// pointer grabbed it. Returns `false` (and changes nothing) when the
    /// target is not the drag handle or the node does not exist.
    pub fn begin_drag(
        &mut self,
        store: &FlowGraphStore,
        node_id: &str,
        pointer: Position,
        target: DragTarget,
    ) -> bool {
        if !target.starts_drag() {
            return false;
        }
        let Some(node) = store.node(node_id) else {
            return false;
        };
        if let Some(previous) = self.active.take() {
            debug!(node_id = %previous.node_id, "drag superseded");
        }
        self.active = Some(DragState {
            node_id: node_id.to_string(),
            offset: pointer - node.position,
        });
        true
    }

    /// Moves the dragged node so that it keeps its grab offset under `pointer`.
    ///
    /// `canvas` is the hosting surface's current geometry; the store clamps
    /// the result into it. Returns the written position, or `None` when no
    /// drag is active or the node has since disappeared.
    pub fn continue_drag(
        &self,
        store: &mut FlowGraphStore,
        pointer: Position,
        canvas: CanvasSize,
    ) -> Option<Position> {
        let drag = self.active.as_ref()?;
        store.set_bounds(canvas.bounds());
        store.update_node_position(&drag.node_id, pointer - drag.offset)
    }

    pub fn end_drag(&mut self) {
        self.active = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged_node(&self) -> Option<&str> {
        self.active.as_ref().map(|d| d.node_id.as_str())
    }
}

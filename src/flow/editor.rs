use super::event::FlowEvent;
use super::geometry::Position;
use super::node::{Content, Node};
use super::palette::PaletteItem;
use super::snapshot::{DEFAULT_FLOW_NAME, FlowMetadata, FlowSnapshot, SNAPSHOT_VERSION};
use super::store::FlowGraphStore;
use crate::error::{PersistenceError, SnapshotError};
use crate::persistence::FlowRepository;
use chrono::Utc;
use tracing::{info, warn};

/// Node and connection editing on top of a [`FlowGraphStore`].
///
/// The editor only remembers *which* node is selected; the node itself
/// always lives in the store.
pub struct FlowEditor {
    store: FlowGraphStore,
    selected: Option<String>,
    flow_name: String,
}

impl Default for FlowEditor {
    fn default() -> Self {
        Self::new(FlowGraphStore::default())
    }
}

impl FlowEditor {
    pub fn new(store: FlowGraphStore) -> Self {
        Self {
            store,
            selected: None,
            flow_name: DEFAULT_FLOW_NAME.to_string(),
        }
    }

    pub fn store(&self) -> &FlowGraphStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FlowGraphStore {
        &mut self.store
    }

    pub fn flow_name(&self) -> &str {
        &self.flow_name
    }

    pub fn set_flow_name(&mut self, name: impl Into<String>) {
        self.flow_name = name.into();
    }

    /// Creates a node for a palette item dropped at `drop_position`.
    ///
    /// The item's display name becomes the node title; an unknown type name
    /// yields a generic node with an empty template.
    pub fn create_node_from_palette_item(
        &mut self,
        item: &PaletteItem,
        drop_position: Position,
    ) -> Node {
        let node = self
            .store
            .add_node(item.resolved_type(), drop_position, Content::new());
        if item.name.is_empty() {
            return node;
        }
        self.store.set_node_title(&node.id, item.name.clone());
        Node {
            title: item.name.clone(),
            ..node
        }
    }

    /// Deletes a node (and its connections), clearing the selection if it
    /// pointed at that node. Unknown ids are ignored.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let removed = self.store.remove_node(id);
        if removed && self.selected.as_deref() == Some(id) {
            self.set_selection(None);
        }
        removed
    }

    /// Selects a node by id. `None` or an unknown id clears the selection.
    pub fn select_node(&mut self, id: Option<&str>) -> Option<&Node> {
        let next = id.filter(|id| self.store.contains(id)).map(str::to_string);
        self.set_selection(next);
        self.selected_node()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_deref().and_then(|id| self.store.node(id))
    }

    /// Builds a fresh snapshot of the current graph, stamped with the current time.
    pub fn export_snapshot(&self) -> FlowSnapshot {
        let snapshot = FlowSnapshot {
            nodes: self.store.list_nodes().to_vec(),
            connections: self.store.list_connections().to_vec(),
            metadata: FlowMetadata {
                name: self.flow_name.clone(),
                version: SNAPSHOT_VERSION.to_string(),
                created_at: Utc::now(),
            },
        };
        info!(
            nodes = snapshot.nodes.len(),
            connections = snapshot.connections.len(),
            "flow exported"
        );
        snapshot
    }

    /// Replaces the whole graph with `snapshot`.
    ///
    /// The snapshot is validated first; on error nothing changes.
    pub fn import_snapshot(&mut self, snapshot: FlowSnapshot) -> Result<(), SnapshotError> {
        if let Err(e) = snapshot.validate() {
            warn!(error = %e, "flow import rejected");
            return Err(e);
        }
        info!(
            nodes = snapshot.nodes.len(),
            connections = snapshot.connections.len(),
            name = %snapshot.metadata.name,
            "flow imported"
        );
        self.set_selection(None);
        self.flow_name = snapshot.metadata.name;
        self.store.replace(snapshot.nodes, snapshot.connections);
        Ok(())
    }

    pub fn save_to(&self, repository: &dyn FlowRepository) -> Result<(), PersistenceError> {
        repository.save(&self.export_snapshot())
    }

    /// Loads the saved flow, if any. Returns `Ok(false)` when nothing was saved.
    /// Any failure leaves the current graph untouched.
    pub fn load_from(&mut self, repository: &dyn FlowRepository) -> Result<bool, PersistenceError> {
        match repository.load()? {
            Some(snapshot) => {
                self.import_snapshot(snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_selection(&mut self, next: Option<String>) {
        if self.selected != next {
            self.selected = next.clone();
            self.store.notify(FlowEvent::SelectionChanged(next));
        }
    }
}

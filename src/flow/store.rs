use super::event::{FlowEvent, FlowObserver};
use super::geometry::{CanvasBounds, Position};
use super::node::{Connection, Content, Node, NodeType};
use tracing::debug;

const NODE_ID_PREFIX: &str = "node-";

/// The authoritative set of nodes and connections of one flow.
///
/// Every operation is total: unknown ids are ignored, positions are clamped
/// into the canvas bounds, and removing a node removes its connections.
pub struct FlowGraphStore {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    bounds: CanvasBounds,
    node_counter: u64,
    observers: Vec<Box<dyn FlowObserver>>,
}

impl Default for FlowGraphStore {
    fn default() -> Self {
        Self::new(CanvasBounds::default())
    }
}

impl FlowGraphStore {
    pub fn new(bounds: CanvasBounds) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            bounds,
            node_counter: 0,
            observers: Vec::new(),
        }
    }

    /// Creates a store pre-populated with the starter flow
    /// `node-1 (start) → node-2 (message) → node-3 (input)`.
    ///
    /// The id counter is seeded at 3, so the next created node is `node-4`.
    pub fn with_sample_flow(bounds: CanvasBounds) -> Self {
        let mut store = Self::new(bounds);
        let layout = [
            (NodeType::Start, Position::new(50, 100)),
            (NodeType::Message, Position::new(300, 100)),
            (NodeType::Input, Position::new(550, 100)),
        ];
        for (index, (node_type, position)) in layout.into_iter().enumerate() {
            store.nodes.push(Node {
                id: format!("{}{}", NODE_ID_PREFIX, index + 1),
                node_type,
                position: bounds.clamp(position),
                title: node_type.default_title().to_string(),
                content: node_type.default_content(),
            });
        }
        store.connections.push(Connection::new("node-1", "node-2"));
        store.connections.push(Connection::new("node-2", "node-3"));
        store.node_counter = 3;
        store
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Updates the placement bounds. Existing positions are left as they are
    /// until the next placement operation touches them.
    pub fn set_bounds(&mut self, bounds: CanvasBounds) {
        self.bounds = bounds;
    }

    /// Registers an observer that is notified of every subsequent change.
    pub fn subscribe(&mut self, observer: impl FlowObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub(crate) fn notify(&self, event: FlowEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    /// Inserts a node of `node_type` at the clamped `position` and returns it.
    ///
    /// `initial_content` is layered over the type's default template.
    pub fn add_node(
        &mut self,
        node_type: NodeType,
        position: Position,
        initial_content: Content,
    ) -> Node {
        let id = self.next_node_id();
        let mut content = node_type.default_content();
        content.extend(initial_content);

        let node = Node {
            id: id.clone(),
            node_type,
            position: self.bounds.clamp(position),
            title: node_type.default_title().to_string(),
            content,
        };
        debug!(node_id = %id, node_type = %node_type, x = node.position.x, y = node.position.y, "node added");
        self.nodes.push(node.clone());
        self.notify(FlowEvent::NodeAdded(id));
        node
    }

    /// Removes a node together with every connection that references it.
    /// Returns `false` if no such node exists.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.nodes.remove(index);

        let (dropped, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.connections)
            .into_iter()
            .partition(|c| c.touches(id));
        self.connections = kept;

        debug!(node_id = %id, dropped_connections = dropped.len(), "node removed");
        for connection in dropped {
            self.notify(FlowEvent::ConnectionRemoved(connection));
        }
        self.notify(FlowEvent::NodeRemoved(id.to_string()));
        true
    }

    /// Moves a node, clamping the target into the current bounds.
    /// Returns the position actually written, or `None` for an unknown id.
    pub fn update_node_position(&mut self, id: &str, position: Position) -> Option<Position> {
        let clamped = self.bounds.clamp(position);
        let node = self.nodes.iter_mut().find(|n| n.id == id)?;
        if node.position == clamped {
            return Some(clamped);
        }
        node.position = clamped;
        self.notify(FlowEvent::NodeMoved {
            id: id.to_string(),
            position: clamped,
        });
        Some(clamped)
    }

    pub fn set_node_title(&mut self, id: &str, title: impl Into<String>) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        node.title = title.into();
        self.notify(FlowEvent::NodeUpdated(id.to_string()));
        true
    }

    pub fn set_node_field(
        &mut self,
        id: &str,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        node.content.insert(field.into(), value.into());
        self.notify(FlowEvent::NodeUpdated(id.to_string()));
        true
    }

    /// Connects `from`'s output port to `to`'s input port.
    ///
    /// Returns `None` when either endpoint is unknown, when both are the same
    /// node, or when the connection already exists.
    pub fn connect(&mut self, from: &str, to: &str) -> Option<Connection> {
        if from == to || !self.contains(from) || !self.contains(to) {
            return None;
        }
        let connection = Connection::new(from, to);
        if self.connections.contains(&connection) {
            return None;
        }
        debug!(from, to, "connection added");
        self.connections.push(connection.clone());
        self.notify(FlowEvent::ConnectionAdded(connection.clone()));
        Some(connection)
    }

    pub fn disconnect(&mut self, from: &str, to: &str) -> bool {
        let Some(index) = self
            .connections
            .iter()
            .position(|c| c.from_node_id == from && c.to_node_id == to)
        else {
            return false;
        };
        let connection = self.connections.remove(index);
        self.notify(FlowEvent::ConnectionRemoved(connection));
        true
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn list_nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn list_connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connections entering or leaving `id`, in insertion order.
    pub fn connections_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.touches(id))
    }

    /// Swaps in a complete, already validated graph and re-seeds the id counter
    /// above every `node-N` id it contains.
    pub(crate) fn replace(&mut self, nodes: Vec<Node>, connections: Vec<Connection>) {
        let bounds = self.bounds;
        self.nodes = nodes
            .into_iter()
            .map(|mut node| {
                node.position = bounds.clamp(node.position);
                node
            })
            .collect();
        self.connections = connections;
        self.node_counter = self
            .nodes
            .iter()
            .filter_map(|n| numeric_suffix(&n.id))
            .max()
            .unwrap_or(0);
        self.notify(FlowEvent::Replaced);
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    fn next_node_id(&mut self) -> String {
        loop {
            self.node_counter += 1;
            let candidate = format!("{}{}", NODE_ID_PREFIX, self.node_counter);
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    id.strip_prefix(NODE_ID_PREFIX)?.parse().ok()
}

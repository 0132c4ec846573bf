use super::geometry::Position;
use super::node::Connection;

/// A change applied to a flow graph, delivered to every registered observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    NodeAdded(String),
    NodeRemoved(String),
    NodeMoved { id: String, position: Position },
    NodeUpdated(String),
    ConnectionAdded(Connection),
    ConnectionRemoved(Connection),
    SelectionChanged(Option<String>),
    /// The whole graph was swapped out by an import.
    Replaced,
}

/// Receives change notifications from a [`FlowGraphStore`](super::FlowGraphStore).
pub trait FlowObserver: Send + Sync {
    fn on_event(&self, event: &FlowEvent);
}

impl<F> FlowObserver for F
where
    F: Fn(&FlowEvent) + Send + Sync,
{
    fn on_event(&self, event: &FlowEvent) {
        self(event)
    }
}

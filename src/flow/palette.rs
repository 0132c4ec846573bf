use super::node::NodeType;
use serde::{Deserialize, Serialize};

/// A palette entry as dropped onto the canvas by the editor UI.
///
/// `icon` and `name` are presentation-only; `name` becomes the node title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteItem {
    pub node_type: String,
    pub icon: String,
    pub name: String,
}

impl PaletteItem {
    pub fn new(
        node_type: impl Into<String>,
        icon: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            node_type: node_type.into(),
            icon: icon.into(),
            name: name.into(),
        }
    }

    /// The node type this item creates. Unknown names resolve to `Generic`.
    pub fn resolved_type(&self) -> NodeType {
        NodeType::from_name(&self.node_type)
    }
}

/// The palette offered by a fresh editor, one item per declared node type.
pub fn default_palette() -> Vec<PaletteItem> {
    NodeType::ALL
        .iter()
        .map(|node_type| {
            let icon = match node_type {
                NodeType::Start => "🚀",
                NodeType::Message => "💬",
                NodeType::Input => "⌨️",
                NodeType::Condition => "🔀",
                NodeType::Action => "⚡",
                NodeType::Integration => "🔗",
                NodeType::Card => "🃏",
                NodeType::QuickReplies => "↩️",
                NodeType::Generic => "⬜",
            };
            PaletteItem::new(node_type.name(), icon, node_type.default_title())
        })
        .collect()
}

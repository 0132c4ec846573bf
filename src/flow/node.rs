use super::geometry::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name → value pairs configured on a node. Ordered so exports are stable.
pub type Content = BTreeMap<String, String>;

/// Master macro declaring every node type together with its wire name,
/// default title and default content template.
macro_rules! define_node_types {
    ( $( ($variant:ident, $name:literal, $title:literal, [ $( ($field:literal, $value:literal) ),* $(,)? ]) ),* $(,)? ) => {
        /// The closed set of node kinds a flow can contain.
        ///
        /// Unknown type names degrade to [`NodeType::Generic`], which carries an
        /// empty content template.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum NodeType {
            $( #[serde(rename = $name)] $variant, )*
            #[serde(rename = "generic", other)]
            Generic,
        }

        impl NodeType {
            /// All declared types, in palette order. `Generic` is not listed.
            pub const ALL: &'static [NodeType] = &[ $( NodeType::$variant, )* ];

            /// The wire name used in snapshots and palette descriptors.
            pub fn name(&self) -> &'static str {
                match self {
                    $( NodeType::$variant => $name, )*
                    NodeType::Generic => "generic",
                }
            }

            /// Resolves a wire name, falling back to `Generic` for anything unknown.
            pub fn from_name(name: &str) -> NodeType {
                match name {
                    $( $name => NodeType::$variant, )*
                    _ => NodeType::Generic,
                }
            }

            pub fn default_title(&self) -> &'static str {
                match self {
                    $( NodeType::$variant => $title, )*
                    NodeType::Generic => "Custom Node",
                }
            }

            /// The content a freshly created node of this type starts with.
            pub fn default_content(&self) -> Content {
                match self {
                    $( NodeType::$variant => Content::from([ $( ($field.to_string(), $value.to_string()) ),* ]), )*
                    NodeType::Generic => Content::new(),
                }
            }
        }
    };
}

define_node_types! {
    (Start, "start", "Conversation Start", []),
    (Message, "message", "Send Message", [
        ("message_type", "Text"),
        ("text", "Welcome to ADTU!"),
    ]),
    (Input, "input", "User Input", [("variable", "user_input")]),
    (Condition, "condition", "Logic Branch", [
        ("logic", "Equals"),
        ("operator", "If user_input equals"),
    ]),
    (Action, "action", "Custom Action", [("code", "// Custom action")]),
    (Integration, "integration", "External Integration", []),
    (Card, "card", "Rich Card", [
        ("description", "Learn more about ADTU services"),
        ("title", "ADTU Information"),
    ]),
    (QuickReplies, "quick-replies", "Quick Replies", [
        ("option_1", "Admissions"),
        ("option_2", "Academics"),
    ]),
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A typed unit of a conversation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Position,
    pub title: String,
    #[serde(default)]
    pub content: Content,
}

impl Node {
    /// Every node exposes exactly one port in each direction.
    pub fn ports(&self) -> [Port; 2] {
        [
            Port {
                node_id: self.id.clone(),
                direction: PortDirection::Input,
            },
            Port {
                node_id: self.id.clone(),
                direction: PortDirection::Output,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

/// A port derived from a node. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Port {
    pub node_id: String,
    pub direction: PortDirection,
}

/// A directed edge from one node's output port to another node's input port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from_node_id: String,
    pub from_port: PortDirection,
    pub to_node_id: String,
    pub to_port: PortDirection,
}

impl Connection {
    pub fn new(from_node_id: impl Into<String>, to_node_id: impl Into<String>) -> Self {
        Self {
            from_node_id: from_node_id.into(),
            from_port: PortDirection::Output,
            to_node_id: to_node_id.into(),
            to_port: PortDirection::Input,
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.from_node_id == node_id || self.to_node_id == node_id
    }

    /// `true` when the edge leaves an output port and enters an input port.
    pub fn is_well_directed(&self) -> bool {
        self.from_port == PortDirection::Output && self.to_port == PortDirection::Input
    }
}

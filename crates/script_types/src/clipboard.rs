//! Clipboard payloads.
//!
//! Copied nodes travel through the system clipboard as tagged JSON. Reading
//! the clipboard is fallible by nature: anything that is not a recognizable
//! payload degrades to "no pasteable content" rather than an error.

use serde::{Deserialize, Serialize};

use crate::node::ActionNode;

/// A copied fragment: either a single node or a whole script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClipboardPayload {
    /// A single node with its subtree
    Node { node: ActionNode },
    /// A whole script, terminator included
    Script { script: Vec<ActionNode> },
}

impl ClipboardPayload {
    /// Parse clipboard text. Malformed, untagged, or unrecognized input
    /// yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Encode for writing to the clipboard
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Check whether this payload holds a single node
    pub fn is_single(&self) -> bool {
        matches!(self, ClipboardPayload::Node { .. })
    }

    /// The nodes a paste of this payload should splice in.
    ///
    /// A whole-script payload sheds its trailing terminator; the destination
    /// script already has one. A lone terminator pastes nothing.
    pub fn into_nodes(self) -> Vec<ActionNode> {
        match self {
            ClipboardPayload::Node { node } if node.is_terminator() => Vec::new(),
            ClipboardPayload::Node { node } => vec![node],
            ClipboardPayload::Script { mut script } => {
                if script.last().is_some_and(ActionNode::is_terminator) {
                    script.pop();
                }
                script
            }
        }
    }
}

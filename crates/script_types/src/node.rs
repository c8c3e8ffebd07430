// Node - The nested document form of a script
//
// A script is an ordered sequence of action nodes. Nodes can own named
// branches (the "true" arm of a conditional, the body of a loop), each of
// which is itself a sequence. Every sequence ends with a terminator node.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command name of the terminator node that closes every sequence.
pub const END_COMMAND: &str = "END";

// ─────────────────────────────────────────────────────────────────────────────
// Node Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Globally unique identifier for a node in a script tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub uuid::Uuid);

impl NodeId {
    /// Create a fresh unique node ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Editor-only state attached to a node.
///
/// Kept in its own namespace rather than interleaved with the command's
/// arguments. Structural operations never interpret these values; they ride
/// along unchanged unless an edit targets them directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMeta {
    /// Node body is folded shut in the editor
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
    /// Node is commented out (skipped by the compiler, greyed in the editor)
    #[serde(default, skip_serializing_if = "is_false")]
    pub commented: bool,
    /// The else branch of a conditional is disabled
    #[serde(default, skip_serializing_if = "is_false")]
    pub else_disabled: bool,
    /// User-supplied label shown in place of the command name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// User-supplied override for the command's display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl NodeMeta {
    /// Check whether every field holds its default value
    pub fn is_empty(&self) -> bool {
        !self.collapsed
            && !self.commented
            && !self.else_disabled
            && self.label.is_none()
            && self.display_name.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Action Node
// ─────────────────────────────────────────────────────────────────────────────

/// A single instruction in a script, in nested form.
///
/// This is the shape scripts are serialized, copied, and pasted in. The
/// engine converts it into its arena representation for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionNode {
    /// Unique ID, regenerated wholesale on clone
    pub id: NodeId,
    /// Command name, resolved against the command registry
    pub command: String,
    /// Command arguments (key -> scalar value)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub args: IndexMap<String, Value>,
    /// Editor metadata, opaque to structural operations
    #[serde(default, skip_serializing_if = "NodeMeta::is_empty")]
    pub meta: NodeMeta,
    /// Named branches (branch key -> ordered child sequence)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, Vec<ActionNode>>,
}

impl ActionNode {
    /// Create a bare node for the given command with a fresh ID
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            command: command.into(),
            args: IndexMap::new(),
            meta: NodeMeta::default(),
            children: IndexMap::new(),
        }
    }

    /// Create a terminator node
    pub fn terminator() -> Self {
        Self::new(END_COMMAND)
    }

    /// Check whether this node is a terminator
    pub fn is_terminator(&self) -> bool {
        self.command == END_COMMAND
    }

    /// Set an argument (builder style)
    pub fn with_arg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.args.insert(key.into(), value);
        self
    }

    /// Set a branch (builder style)
    pub fn with_branch(mut self, key: impl Into<String>, nodes: Vec<ActionNode>) -> Self {
        self.children.insert(key.into(), nodes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_ids_are_unique() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_terminator() {
        let end = ActionNode::terminator();
        assert!(end.is_terminator());
        assert!(end.args.is_empty());
        assert!(end.children.is_empty());

        assert!(!ActionNode::new("TEXT").is_terminator());
    }

    #[test]
    fn test_empty_meta_is_skipped_in_json() {
        let node = ActionNode::new("TEXT").with_arg("text", json!("hello"));
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("meta"));
        assert!(!json.contains("children"));

        let back: ActionNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_nested_roundtrip() {
        let node = ActionNode::new("IF")
            .with_arg("variable", json!("L0"))
            .with_branch("true", vec![
                ActionNode::new("TEXT").with_arg("text", json!("yes")),
                ActionNode::terminator(),
            ])
            .with_branch("false", vec![ActionNode::terminator()]);

        let json = serde_json::to_string(&node).unwrap();
        let back: ActionNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
        // branch keys keep their insertion order
        let keys: Vec<_> = back.children.keys().collect();
        assert_eq!(keys, vec!["true", "false"]);
    }

    #[test]
    fn test_meta_roundtrip() {
        let mut node = ActionNode::new("TEXT");
        node.meta.commented = true;
        node.meta.label = Some("intro".to_string());

        let json = serde_json::to_string(&node).unwrap();
        let back: ActionNode = serde_json::from_str(&json).unwrap();
        assert!(back.meta.commented);
        assert_eq!(back.meta.label.as_deref(), Some("intro"));
        assert!(!back.meta.collapsed);
    }
}

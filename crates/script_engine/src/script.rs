// Script - Arena representation of an event script tree
//
// The editing surface exchanges scripts in nested form (sequences of
// ActionNode). Internally the engine keeps every node in a flat arena
// addressed by id, with the root sequence and each branch holding id lists.
// That keeps the uniqueness and cycle invariants checkable as arena-wide
// scans instead of implicit ownership chains.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

use script_types::{ActionNode, END_COMMAND, NodeId, NodeMeta};

// ─────────────────────────────────────────────────────────────────────────────
// Arena Records
// ─────────────────────────────────────────────────────────────────────────────

/// Arena record for a single node. Branch values are ids into the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Command name
    pub command: String,
    /// Command arguments
    pub args: IndexMap<String, Value>,
    /// Editor metadata
    pub meta: NodeMeta,
    /// Named branches (branch key -> ordered child ids)
    pub branches: IndexMap<String, Vec<NodeId>>,
}

impl NodeData {
    fn terminator() -> Self {
        Self {
            command: END_COMMAND.to_string(),
            args: IndexMap::new(),
            meta: NodeMeta::default(),
            branches: IndexMap::new(),
        }
    }

    /// Check whether this node is a terminator
    pub fn is_terminator(&self) -> bool {
        self.command == END_COMMAND
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Script
// ─────────────────────────────────────────────────────────────────────────────

/// An event script: a flat node arena plus the root sequence.
///
/// Structural operations take `&self` and return a fresh `Script`; the input
/// is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub(crate) nodes: HashMap<NodeId, NodeData>,
    pub(crate) roots: Vec<NodeId>,
}

impl Default for Script {
    fn default() -> Self {
        Self::empty()
    }
}

impl Script {
    /// Create a script containing only a terminator
    pub fn empty() -> Self {
        Self::from_nodes(Vec::new())
    }

    /// Build a script from nested form.
    ///
    /// Any sequence (root or branch) that does not already end with a
    /// terminator gets one appended.
    pub fn from_nodes(nodes: Vec<ActionNode>) -> Self {
        let mut script = Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
        };
        let roots: Vec<NodeId> = nodes.into_iter().map(|node| script.graft(node)).collect();
        script.roots = terminated(&mut script.nodes, roots);
        script
    }

    /// Export the whole script in nested form
    pub fn to_nodes(&self) -> Vec<ActionNode> {
        self.roots.iter().filter_map(|id| self.export(*id)).collect()
    }

    /// Export the subtree rooted at `id` in nested form, or `None` if the
    /// id is not in the tree
    pub fn find(&self, id: NodeId) -> Option<ActionNode> {
        self.export(id)
    }

    /// Get the arena record for a node
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(&id)
    }

    /// Check whether a node is in the tree
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Total node count, terminators included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the script holds nothing but terminators
    pub fn is_empty(&self) -> bool {
        self.nodes.values().all(NodeData::is_terminator)
    }

    /// Ids of the root sequence, terminator last
    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    /// Id of the root sequence's terminator: the anchor for appending
    pub fn end_id(&self) -> Option<NodeId> {
        self.roots.last().copied()
    }

    /// Insert a nested node and all its descendants into the arena,
    /// returning the root id. Branch sequences are re-terminated on the way
    /// in.
    pub(crate) fn graft(&mut self, node: ActionNode) -> NodeId {
        let ActionNode {
            id,
            command,
            args,
            meta,
            children,
        } = node;
        let mut branches = IndexMap::with_capacity(children.len());
        for (key, seq) in children {
            let ids: Vec<NodeId> = seq.into_iter().map(|child| self.graft(child)).collect();
            branches.insert(key, terminated(&mut self.nodes, ids));
        }
        self.nodes.insert(
            id,
            NodeData {
                command,
                args,
                meta,
                branches,
            },
        );
        id
    }

    fn export(&self, id: NodeId) -> Option<ActionNode> {
        let data = self.nodes.get(&id)?;
        let mut children = IndexMap::with_capacity(data.branches.len());
        for (key, seq) in &data.branches {
            let nodes = seq.iter().filter_map(|child| self.export(*child)).collect();
            children.insert(key.clone(), nodes);
        }
        Some(ActionNode {
            id,
            command: data.command.clone(),
            args: data.args.clone(),
            meta: data.meta.clone(),
            children,
        })
    }
}

/// Append a fresh terminator unless the sequence already ends with one
fn terminated(nodes: &mut HashMap<NodeId, NodeData>, mut seq: Vec<NodeId>) -> Vec<NodeId> {
    let closed = seq
        .last()
        .is_some_and(|id| nodes.get(id).is_some_and(NodeData::is_terminator));
    if !closed {
        let end = NodeId::new();
        nodes.insert(end, NodeData::terminator());
        seq.push(end);
    }
    seq
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_script() {
        let script = Script::empty();
        assert_eq!(script.len(), 1);
        assert!(script.is_empty());
        assert!(script.get(script.end_id().unwrap()).unwrap().is_terminator());
        script.validate().unwrap();
    }

    #[test]
    fn test_from_nodes_appends_missing_terminators() {
        let script = Script::from_nodes(vec![
            ActionNode::new("LOOP").with_branch("true", vec![ActionNode::new("TEXT")]),
        ]);

        script.validate().unwrap();
        // root: LOOP + END, branch: TEXT + END
        assert_eq!(script.root_ids().len(), 2);
        let loop_id = script.root_ids()[0];
        let body = &script.get(loop_id).unwrap().branches["true"];
        assert_eq!(body.len(), 2);
        assert!(script.get(body[1]).unwrap().is_terminator());
    }

    #[test]
    fn test_nested_roundtrip_preserves_ids_and_order() {
        let nodes = vec![
            ActionNode::new("TEXT").with_arg("text", json!("one")),
            ActionNode::new("IF")
                .with_branch("true", vec![
                    ActionNode::new("TEXT").with_arg("text", json!("two")),
                    ActionNode::terminator(),
                ])
                .with_branch("false", vec![ActionNode::terminator()]),
            ActionNode::terminator(),
        ];
        let ids: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();

        let script = Script::from_nodes(nodes.clone());
        let exported = script.to_nodes();

        assert_eq!(exported, nodes);
        assert_eq!(script.root_ids(), ids.as_slice());
    }

    #[test]
    fn test_find_exports_whole_subtree() {
        let inner = ActionNode::new("TEXT").with_arg("text", json!("deep"));
        let inner_id = inner.id;
        let cond = ActionNode::new("IF").with_branch("true", vec![inner, ActionNode::terminator()]);
        let cond_id = cond.id;
        let script = Script::from_nodes(vec![cond, ActionNode::terminator()]);

        let subtree = script.find(cond_id).unwrap();
        assert_eq!(subtree.children["true"][0].id, inner_id);
        assert!(script.find(NodeId::new()).is_none());
    }
}

// Clone & identity regeneration
//
// Deep copies for copy/paste and duplication. A regenerated fragment keeps
// its shape, commands, arguments, and branch order, but every node gets a
// fresh id, so pasting the same payload twice never collides.

use script_types::{ActionNode, ClipboardPayload, NodeId};

use crate::script::Script;

/// Deep-copy a node, assigning a fresh id to every node at every depth
pub fn regenerate_ids(node: &ActionNode) -> ActionNode {
    let mut copy = node.clone();
    refresh(&mut copy);
    copy
}

/// Deep-copy a node sequence, regenerating every id
pub fn regenerate_script(nodes: &[ActionNode]) -> Vec<ActionNode> {
    nodes.iter().map(regenerate_ids).collect()
}

fn refresh(node: &mut ActionNode) {
    node.id = NodeId::new();
    for seq in node.children.values_mut() {
        for child in seq.iter_mut() {
            refresh(child);
        }
    }
}

/// Every id in a nested node, the node's own id first
pub fn node_ids(node: &ActionNode) -> Vec<NodeId> {
    let mut out = Vec::new();
    collect_ids(node, &mut out);
    out
}

fn collect_ids(node: &ActionNode, out: &mut Vec<NodeId>) {
    out.push(node.id);
    for seq in node.children.values() {
        for child in seq {
            collect_ids(child, out);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

impl Script {
    /// Copy a node and its subtree. Terminators cannot be copied.
    pub fn copy_node(&self, id: NodeId) -> Option<ClipboardPayload> {
        let node = self.find(id)?;
        if node.is_terminator() {
            return None;
        }
        Some(ClipboardPayload::Node { node })
    }

    /// Copy the whole script, terminator included
    pub fn copy_script(&self) -> ClipboardPayload {
        ClipboardPayload::Script {
            script: self.to_nodes(),
        }
    }

    /// Paste a payload immediately before `anchor`, regenerating every id
    pub fn paste_before(&self, anchor: NodeId, payload: &ClipboardPayload) -> Script {
        self.paste_relative(anchor, payload, true)
    }

    /// Paste a payload immediately after `anchor`, regenerating every id
    pub fn paste_after(&self, anchor: NodeId, payload: &ClipboardPayload) -> Script {
        self.paste_relative(anchor, payload, false)
    }

    fn paste_relative(&self, anchor: NodeId, payload: &ClipboardPayload, before: bool) -> Script {
        let nodes = regenerate_script(&payload.clone().into_nodes());
        let mut next = self.clone();
        if before {
            for node in nodes {
                next = next.insert_before(anchor, node);
            }
        } else {
            let mut cursor = anchor;
            for node in nodes {
                let id = node.id;
                next = next.insert_after(cursor, node);
                cursor = id;
            }
        }
        next
    }

    /// Paste a payload at the very start of the script
    pub fn paste_script_before(&self, payload: &ClipboardPayload) -> Script {
        match self.root_ids().first().copied() {
            Some(first) => self.paste_before(first, payload),
            None => self.clone(),
        }
    }

    /// Paste a payload at the end of the script, before the terminator
    pub fn paste_script_after(&self, payload: &ClipboardPayload) -> Script {
        match self.end_id() {
            Some(end) => self.paste_before(end, payload),
            None => self.clone(),
        }
    }

    /// Replace the whole script with a payload's contents, re-identified and
    /// re-terminated
    pub fn from_payload(payload: &ClipboardPayload) -> Script {
        Script::from_nodes(regenerate_script(&payload.clone().into_nodes()))
    }

    /// Duplicate a node in place: a regenerated copy lands immediately after
    /// the original
    pub fn duplicate(&self, id: NodeId) -> Script {
        let Some(node) = self.find(id) else {
            tracing::debug!(node_id = %id, "duplicate ignored: node not in tree");
            return self.clone();
        };
        if node.is_terminator() {
            tracing::debug!(node_id = %id, "duplicate refused: terminator");
            return self.clone();
        }
        self.insert_after(id, regenerate_ids(&node))
    }

    /// Selective value paste: copy only the argument keys that already exist
    /// on the destination node. Id, command, metadata, and branches stay
    /// untouched. Whole-script payloads have no single source node and are
    /// refused.
    pub fn paste_values(&self, id: NodeId, payload: &ClipboardPayload) -> Script {
        let ClipboardPayload::Node { node: source } = payload else {
            tracing::debug!(node_id = %id, "paste values ignored: payload is a whole script");
            return self.clone();
        };
        self.replace(id, |data| {
            for (key, value) in &source.args {
                if data.args.contains_key(key) {
                    data.args.insert(key.clone(), value.clone());
                }
            }
        })
    }
}

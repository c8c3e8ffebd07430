// Structural operations
//
// The public editing contract: insert relative to an anchor, cascading
// remove, additive argument patches, metadata edits, and guarded relocation.
// Operations addressed at an id that is not in the tree return the input
// unchanged; UI state and tree state can legitimately race, so a missing
// target is not an error.

use indexmap::IndexMap;
use serde_json::Value;

use script_types::{ActionNode, CommandSchema, DefaultValue, NodeId, NodeMeta};

use crate::clone::node_ids;
use crate::script::{NodeData, Script};

// ─────────────────────────────────────────────────────────────────────────────
// Insert
// ─────────────────────────────────────────────────────────────────────────────

impl Script {
    /// Splice `node` into the sequence holding `anchor`, immediately before
    /// it
    pub fn insert_before(&self, anchor: NodeId, node: ActionNode) -> Script {
        self.insert_relative(anchor, node, true)
    }

    /// Splice `node` into the sequence holding `anchor`, immediately after
    /// it. Inserting after a terminator clamps to inserting before it, so
    /// the terminator stays last.
    pub fn insert_after(&self, anchor: NodeId, node: ActionNode) -> Script {
        self.insert_relative(anchor, node, false)
    }

    fn insert_relative(&self, anchor: NodeId, node: ActionNode, before: bool) -> Script {
        let Some(location) = self.locate(anchor) else {
            tracing::debug!(anchor = %anchor, "insert ignored: anchor not in tree");
            return self.clone();
        };
        if node_ids(&node).iter().any(|id| self.contains(*id)) {
            tracing::debug!(node_id = %node.id, "insert refused: id already in tree");
            return self.clone();
        }

        let anchor_is_end = self.get(anchor).is_some_and(NodeData::is_terminator);
        let index = if before || anchor_is_end {
            location.index
        } else {
            location.index + 1
        };

        let mut next = self.clone();
        let new_id = next.graft(node);
        if let Some(seq) = next.seq_mut(&location.seq) {
            seq.insert(index, new_id);
        }
        next
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Remove
    // ─────────────────────────────────────────────────────────────────────────

    /// Remove the node and its entire subtree. Terminators and unknown ids
    /// are left alone.
    pub fn remove(&self, id: NodeId) -> Script {
        let Some(data) = self.get(id) else {
            tracing::debug!(node_id = %id, "remove ignored: node not in tree");
            return self.clone();
        };
        if data.is_terminator() {
            tracing::debug!(node_id = %id, "remove refused: terminator");
            return self.clone();
        }
        let Some(location) = self.locate(id) else {
            return self.clone();
        };

        let mut next = self.clone();
        if let Some(seq) = next.seq_mut(&location.seq) {
            seq.remove(location.index);
        }
        for dead in self.subtree_ids(id) {
            next.nodes.remove(&dead);
        }
        next
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Patch
    // ─────────────────────────────────────────────────────────────────────────

    /// Merge `patch` into the node's arguments. Only the supplied keys are
    /// introduced or overwritten; everything else is retained.
    pub fn patch_args(&self, id: NodeId, patch: &IndexMap<String, Value>) -> Script {
        self.replace(id, |data| {
            for (key, value) in patch {
                data.args.insert(key.clone(), value.clone());
            }
        })
    }

    /// Apply an edit to the node's editor metadata
    pub fn update_meta(&self, id: NodeId, edit: impl FnOnce(&mut NodeMeta)) -> Script {
        self.replace(id, |data| edit(&mut data.meta))
    }

    /// Fold the node's body open or shut
    pub fn toggle_collapsed(&self, id: NodeId) -> Script {
        self.update_meta(id, |meta| meta.collapsed = !meta.collapsed)
    }

    /// Comment the node out, or back in
    pub fn toggle_commented(&self, id: NodeId) -> Script {
        self.update_meta(id, |meta| meta.commented = !meta.commented)
    }

    /// Disable or re-enable the node's else branch
    pub fn toggle_else_disabled(&self, id: NodeId) -> Script {
        self.update_meta(id, |meta| meta.else_disabled = !meta.else_disabled)
    }

    /// Set or clear the node's display label
    pub fn set_label(&self, id: NodeId, label: Option<String>) -> Script {
        self.update_meta(id, |meta| meta.label = label)
    }

    /// Core replace primitive: rebuild the tree with one node edited.
    /// Terminators refuse edits; they carry no state to edit.
    pub(crate) fn replace(&self, id: NodeId, edit: impl FnOnce(&mut NodeData)) -> Script {
        let mut next = self.clone();
        match next.nodes.get_mut(&id) {
            Some(data) if !data.is_terminator() => edit(data),
            Some(_) => tracing::debug!(node_id = %id, "edit refused: terminator"),
            None => tracing::debug!(node_id = %id, "edit ignored: node not in tree"),
        }
        next
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Relocate
    // ─────────────────────────────────────────────────────────────────────────

    /// Move `moved` (with its subtree) to sit immediately before `anchor`.
    ///
    /// Returns the input unchanged when the move is impossible or pointless:
    /// either id missing, `moved` is the terminator, `anchor` lies inside the
    /// moved subtree, or `moved` already sits immediately before `anchor`.
    pub fn relocate(&self, moved: NodeId, anchor: NodeId) -> Script {
        if moved == anchor {
            return self.clone();
        }
        let Some(data) = self.get(moved) else {
            tracing::debug!(moved = %moved, "relocate ignored: node not in tree");
            return self.clone();
        };
        if data.is_terminator() {
            tracing::debug!(moved = %moved, "relocate refused: terminator");
            return self.clone();
        }
        if !self.contains(anchor) {
            tracing::debug!(anchor = %anchor, "relocate ignored: anchor not in tree");
            return self.clone();
        }
        let Some(subtree) = self.find(moved) else {
            return self.clone();
        };
        if node_ids(&subtree).contains(&anchor) {
            tracing::debug!(
                moved = %moved,
                anchor = %anchor,
                "relocate refused: anchor inside moved subtree"
            );
            return self.clone();
        }
        if let (Some(from), Some(to)) = (self.locate(moved), self.locate(anchor)) {
            if from.seq == to.seq && from.index + 1 == to.index {
                return self.clone();
            }
        }
        self.remove(moved).insert_before(anchor, subtree)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node Construction
// ─────────────────────────────────────────────────────────────────────────────

/// Which kind of script is being edited; variable defaults differ between
/// scene scripts and custom sub-scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditScope {
    /// Editing a scene, actor, or trigger script
    #[default]
    Scene,
    /// Editing a reusable custom script
    CustomScript,
}

/// Caller-supplied context for resolving context-dependent field defaults.
///
/// The engine treats these as opaque substitution inputs; it never derives
/// them itself.
#[derive(Debug, Clone, Default)]
pub struct EditContext {
    pub scene_ids: Vec<String>,
    pub actor_ids: Vec<String>,
    pub music_ids: Vec<String>,
    pub sprite_sheet_ids: Vec<String>,
    pub scope: EditScope,
}

impl EditContext {
    /// Resolve a context-dependent default to a concrete value, or `None`
    /// for policies that are not context-dependent or cannot be resolved
    pub fn resolve(&self, default: &DefaultValue) -> Option<Value> {
        match default {
            DefaultValue::None | DefaultValue::Literal { .. } => None,
            DefaultValue::LastScene => self.scene_ids.last().cloned().map(Value::String),
            DefaultValue::LastMusic => self.music_ids.first().cloned().map(Value::String),
            DefaultValue::LastSprite => self.sprite_sheet_ids.first().cloned().map(Value::String),
            DefaultValue::LastActor => Some(Value::String(
                self.actor_ids
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "player".to_string()),
            )),
            DefaultValue::LastVariable => Some(Value::String(match self.scope {
                EditScope::CustomScript => "0".to_string(),
                EditScope::Scene => "L0".to_string(),
            })),
        }
    }
}

/// Build a brand-new node for `command` with its schema-derived default
/// shape: context-dependent and literal defaults applied to the arguments,
/// and every branch field seeded with a lone terminator unless
/// `default_children` supplies a body.
pub fn compose_node(
    schema: &impl CommandSchema,
    command: &str,
    overrides: IndexMap<String, Value>,
    mut default_children: IndexMap<String, Vec<ActionNode>>,
    ctx: &EditContext,
) -> ActionNode {
    let mut node = ActionNode::new(command);
    let mut args = overrides;
    let mut children = IndexMap::new();

    if let Some(fields) = schema.fields(command) {
        for field in fields {
            if field.is_branch() {
                let body = default_children
                    .swap_remove(&field.key)
                    .unwrap_or_else(|| vec![ActionNode::terminator()]);
                children.insert(field.key.clone(), body);
                continue;
            }
            if let Some(value) = ctx.resolve(&field.default) {
                args.insert(field.key.clone(), value);
            } else if let DefaultValue::Literal { value } = &field.default {
                if !args.contains_key(&field.key) {
                    args.insert(field.key.clone(), value.clone());
                }
            }
        }
    }

    node.args = args;
    node.children = children;
    node
}

//! Invariant validation.
//!
//! Structural operations preserve the tree invariants by construction; the
//! validator makes them checkable as explicit arena-wide scans. The editing
//! surface runs it after deserializing documents of unknown provenance and
//! in tests after every operation.

use std::collections::HashSet;

use script_types::NodeId;

use crate::script::Script;

/// A violated script invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("node id {0} appears more than once")]
    DuplicateId(NodeId),

    #[error("sequence {seq} references unknown node {child}")]
    DanglingChild { seq: String, child: NodeId },

    #[error("node {0} is not reachable from the script root")]
    Orphaned(NodeId),

    #[error("sequence {0} does not end with a terminator")]
    MissingTerminator(String),

    #[error("terminator {0} is not the last node of its sequence")]
    MisplacedTerminator(NodeId),

    #[error("terminator {0} carries arguments or branches")]
    DecoratedTerminator(NodeId),
}

impl Script {
    /// Scan the whole arena for invariant violations
    pub fn validate(&self) -> Result<(), ScriptError> {
        let mut sequences: Vec<(String, &Vec<NodeId>)> = vec![("root".to_string(), &self.roots)];
        for (parent, data) in &self.nodes {
            for (key, seq) in &data.branches {
                sequences.push((format!("{parent}/{key}"), seq));
            }
        }

        let mut seen: HashSet<NodeId> = HashSet::new();
        for (label, seq) in &sequences {
            for (index, id) in seq.iter().enumerate() {
                let Some(data) = self.nodes.get(id) else {
                    return Err(ScriptError::DanglingChild {
                        seq: label.clone(),
                        child: *id,
                    });
                };
                if !seen.insert(*id) {
                    return Err(ScriptError::DuplicateId(*id));
                }
                if data.is_terminator() {
                    if index + 1 != seq.len() {
                        return Err(ScriptError::MisplacedTerminator(*id));
                    }
                    if !data.args.is_empty() || !data.branches.is_empty() {
                        return Err(ScriptError::DecoratedTerminator(*id));
                    }
                }
            }
            let closed = seq
                .last()
                .is_some_and(|id| self.nodes.get(id).is_some_and(|n| n.is_terminator()));
            if !closed {
                return Err(ScriptError::MissingTerminator(label.clone()));
            }
        }

        for id in self.nodes.keys() {
            if !seen.contains(id) {
                return Err(ScriptError::Orphaned(*id));
            }
        }
        Ok(())
    }
}

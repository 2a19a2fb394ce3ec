//! The stateful mindmap session.
//!
//! Owns the authoritative document, the selection sequence, and the
//! interaction lock. The tree itself is an immutable value from
//! `mindmap-core`; every mutation replaces it atomically, so commands
//! issued from the same control flow are strictly ordered.
//!
//! User-initiated commands are rejected while the lock is held (an agent
//! turn is in flight). Selection changes are view-only and never gated.

use log::warn;
use mindmap_core::{Mindmap, MindmapError, NodeId};
use thiserror::Error;

/// Errors surfaced by session commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A user command arrived while an agent turn holds the lock.
    #[error("interaction is locked during an agent turn")]
    Locked,

    #[error(transparent)]
    Map(#[from] MindmapError),
}

/// A live editing session over one mindmap document.
#[derive(Debug, Clone)]
pub struct Session {
    mindmap: Mindmap,
    selection: Vec<NodeId>,
    locked: bool,
}

impl Session {
    /// Start a session on the default "Project Planning" document.
    pub fn new() -> Self {
        Self {
            mindmap: Mindmap::sample(),
            selection: Vec::new(),
            locked: false,
        }
    }

    pub fn mindmap(&self) -> &Mindmap {
        &self.mindmap
    }

    /// Currently selected node ids, in selection order.
    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Replace the selection. View-only, so never lock-gated. Ids that
    /// don't resolve in the current document are dropped.
    pub fn set_selection(&mut self, ids: Vec<NodeId>) {
        self.selection = ids
            .into_iter()
            .filter(|id| self.mindmap.get(*id).is_some())
            .collect();
    }

    fn ensure_unlocked(&self) -> Result<(), SessionError> {
        if self.locked {
            warn!("rejected user command: interaction locked");
            return Err(SessionError::Locked);
        }
        Ok(())
    }

    // ─── User commands (lock-gated) ──────────────────────────────────────

    /// Add a child with the given text under the single selected node.
    /// Requires exactly one selected node.
    pub fn add_to_selected(&mut self, text: &str) -> Result<NodeId, SessionError> {
        self.ensure_unlocked()?;
        let &[parent_id] = self.selection.as_slice() else {
            return Err(SessionError::Map(MindmapError::InvalidOperation(
                "adding a child requires exactly one selected node".to_string(),
            )));
        };
        let (next, new_id) = self.mindmap.add_child(parent_id, text)?;
        self.mindmap = next;
        Ok(new_id)
    }

    /// Delete every selected node (and its subtree), pruning the deleted
    /// ids from the selection. Nodes already removed as part of an earlier
    /// selected ancestor are skipped; a selected root is skipped with a
    /// warning rather than failing the whole command.
    pub fn delete_selected(&mut self) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        for node_id in self.selection.clone() {
            if self.mindmap.get(node_id).is_none() {
                continue;
            }
            match self.mindmap.delete_subtree(node_id) {
                Ok(next) => self.mindmap = next,
                Err(err @ MindmapError::InvalidOperation(_)) => {
                    warn!("skipping delete of `{node_id}`: {err}");
                }
                Err(err) => return Err(err.into()),
            }
        }
        let map = &self.mindmap;
        self.selection.retain(|id| map.get(*id).is_some());
        Ok(())
    }

    /// Inline-edit rename.
    pub fn rename(&mut self, node_id: NodeId, text: &str) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.mindmap = self.mindmap.rename_node(node_id, text)?;
        Ok(())
    }

    /// Expand or collapse a node's subtree.
    pub fn toggle_collapse(&mut self, node_id: NodeId) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.mindmap = self.mindmap.toggle_collapse(node_id)?;
        Ok(())
    }

    /// Reset to the default document and clear the selection.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.mindmap = Mindmap::sample();
        self.selection.clear();
        Ok(())
    }

    // ─── Agent-side state transitions (not lock-gated) ───────────────────

    /// Replace the document wholesale with an already-normalized tree.
    /// Selection entries that no longer resolve are pruned.
    pub(crate) fn replace_mindmap(&mut self, mindmap: Mindmap) {
        self.mindmap = mindmap;
        let map = &self.mindmap;
        self.selection.retain(|id| map.get(*id).is_some());
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

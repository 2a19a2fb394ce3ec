//! Agent-facing protocol: snapshot queries and client effects.
//!
//! The conversational agent reads the tree through `snapshot` (selection
//! plus the full canonical document in one structured value) and writes it
//! back through `ClientEffect` deliveries — a full-tree replacement in
//! either field-naming convention, or a focus request.
//!
//! The surrounding application brackets each agent turn with `begin_turn`
//! / `end_turn` so user mutation is deferred while a response is in
//! flight; it must call `end_turn` on both the success and failure paths.
//! Effects themselves are not lock-gated — the lock serializes users
//! against the agent, not the agent against itself.

use crate::session::Session;
use log::{debug, warn};
use mindmap_core::{Mindmap, MindmapError, NodeId, normalize_tree};
use serde::Serialize;
use serde_json::Value;

// ─── Snapshot query ──────────────────────────────────────────────────────

/// Per-node summary included alongside the full tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub id: NodeId,
    pub text: String,
    pub level: u32,
    pub parent_id: Option<NodeId>,
}

/// Point-in-time serialization of selection + document handed to the
/// agent. Always well-formed: an empty selection yields empty sequences,
/// never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub node_ids: Vec<NodeId>,
    pub nodes: Vec<NodeSummary>,
    pub current_mindmap: Mindmap,
}

/// Build the agent-facing snapshot of the current session state.
/// Selection entries that no longer resolve are silently skipped.
pub fn snapshot(session: &Session) -> Snapshot {
    let map = session.mindmap();
    let nodes = session
        .selection()
        .iter()
        .filter_map(|id| map.get(*id))
        .map(|node| NodeSummary {
            id: node.id,
            text: node.text.clone(),
            level: node.level,
            parent_id: node.parent_id,
        })
        .collect();

    Snapshot {
        node_ids: session.selection().to_vec(),
        nodes,
        current_mindmap: map.clone(),
    }
}

// ─── Client effects ──────────────────────────────────────────────────────

/// A structured effect delivered by the agent during its turn.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEffect {
    /// Full-tree replacement, in either field-naming convention.
    UpdateMindmap { mindmap: Value },
    /// Shift visual focus to a node. No-op if the id is unknown.
    FocusNode { node_id: NodeId },
    /// Transient highlight request; currently log-only.
    HighlightNodes { node_ids: Vec<NodeId> },
}

/// What an applied effect asks of the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The document was replaced; re-project and re-render.
    TreeReplaced,
    /// Center the view on this node.
    Focus(NodeId),
    /// Nothing to do.
    Ignored,
}

/// Apply one agent effect to the session.
///
/// A replacement tree that fails normalization leaves the current document
/// untouched and surfaces `MalformedInput` — a malformed tree never
/// reaches the store.
pub fn apply_effect(
    session: &mut Session,
    effect: ClientEffect,
) -> Result<EffectOutcome, MindmapError> {
    match effect {
        ClientEffect::UpdateMindmap { mindmap } => {
            let normalized = normalize_tree(mindmap).inspect_err(|err| {
                warn!("rejected replacement tree: {err}");
            })?;
            session.replace_mindmap(normalized);
            Ok(EffectOutcome::TreeReplaced)
        }
        ClientEffect::FocusNode { node_id } => {
            if session.mindmap().get(node_id).is_none() {
                warn!("focus request for unknown node `{node_id}`");
                return Ok(EffectOutcome::Ignored);
            }
            Ok(EffectOutcome::Focus(node_id))
        }
        ClientEffect::HighlightNodes { node_ids } => {
            debug!("highlight request for {} node(s)", node_ids.len());
            Ok(EffectOutcome::Ignored)
        }
    }
}

// ─── Turn lock ───────────────────────────────────────────────────────────

/// Take the interaction lock for an agent turn.
pub fn begin_turn(session: &mut Session) {
    session.set_locked(true);
}

/// Release the interaction lock. Callers invoke this on success and on
/// error alike; the core has no self-recovery if it is skipped.
pub fn end_turn(session: &mut Session) {
    session.set_locked(false);
}

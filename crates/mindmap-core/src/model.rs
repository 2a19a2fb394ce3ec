//! Mindmap document model.
//!
//! The document is a rooted tree of text nodes stored as an id-indexed
//! arena: parent/child links are `NodeId` references into one `HashMap`,
//! never owning pointers, so subtree deletion is a pure map-removal with
//! no dangling-reference risk.
//!
//! The canonical wire form is camelCase JSON (`rootId`, `parentId`,
//! `createdAt`, ...); `normalize` converts the snake_case convention used
//! by agent backends into this form.

use crate::id::NodeId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────────

/// Error kinds surfaced by every core operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MindmapError {
    /// An operation referenced a node id absent from the tree.
    #[error("node `{0}` not found")]
    NotFound(NodeId),

    /// A structurally forbidden request, e.g. deleting the root.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An externally supplied tree failed normalization or validation.
    #[error("malformed tree input: {0}")]
    MalformedInput(String),
}

/// Current time as an ISO-8601 string (the document's timestamp format).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Optional per-node display override. Carried verbatim through
/// serialization; the core never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

/// A single node in the mindmap tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapNode {
    pub id: NodeId,

    /// Display text.
    pub text: String,

    /// Parent id; `None` only for the root.
    pub parent_id: Option<NodeId>,

    /// Ordered child ids. Order is significant — it controls layout order —
    /// and is preserved across mutations that don't touch this node.
    #[serde(default)]
    pub children: SmallVec<[NodeId; 4]>,

    /// Depth level: root is 0, always `parent.level + 1`.
    #[serde(default)]
    pub level: u32,

    /// Whether this node's subtree is currently hidden.
    #[serde(default)]
    pub collapsed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
}

impl MindmapNode {
    /// Create a fresh leaf node.
    pub fn new(id: NodeId, text: &str, parent_id: Option<NodeId>, level: u32) -> Self {
        Self {
            id,
            text: text.to_string(),
            parent_id,
            children: SmallVec::new(),
            level,
            collapsed: false,
            style: None,
        }
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The complete mindmap document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mindmap {
    pub id: String,
    pub title: String,

    /// Id of the root node; its `parent_id` is `None`.
    pub root_id: NodeId,

    /// Id-indexed node arena.
    pub nodes: HashMap<NodeId, MindmapNode>,

    #[serde(default = "now_iso")]
    pub created_at: String,

    /// Refreshed on every successful structural or textual mutation.
    #[serde(default = "now_iso")]
    pub updated_at: String,
}

impl Mindmap {
    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&MindmapNode> {
        self.nodes.get(&id)
    }

    /// Look up a node by id, failing with `NotFound`.
    pub fn node(&self, id: NodeId) -> Result<&MindmapNode, MindmapError> {
        self.nodes.get(&id).ok_or(MindmapError::NotFound(id))
    }

    /// The root node. Valid documents always contain it.
    pub fn root(&self) -> Result<&MindmapNode, MindmapError> {
        self.node(self.root_id)
    }

    /// Generate a node id guaranteed absent from this document.
    ///
    /// The counter behind `NodeId::generate` is monotonic, so retrying is
    /// only needed when an externally supplied tree already used a
    /// `node_N` id.
    pub fn fresh_node_id(&self) -> NodeId {
        let mut id = NodeId::generate();
        while self.nodes.contains_key(&id) {
            id = NodeId::generate();
        }
        id
    }

    /// Ids of `id` and every transitive descendant, preorder.
    /// Empty when `id` is absent.
    pub fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                out.push(current);
                // Reverse keeps preorder under the LIFO stack.
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Refresh the update timestamp. Called by every successful mutation.
    pub(crate) fn touch(&mut self) {
        self.updated_at = now_iso();
    }

    /// Check referential consistency: the root exists and is parentless,
    /// every parent reference resolves and lists the child, every child
    /// reference resolves and points back.
    ///
    /// Runs on every tree accepted from the outside — a tree that fails
    /// here must never replace the current document.
    pub fn validate(&self) -> Result<(), MindmapError> {
        let malformed = |msg: String| Err(MindmapError::MalformedInput(msg));

        let Some(root) = self.nodes.get(&self.root_id) else {
            return malformed(format!("root `{}` missing from node map", self.root_id));
        };
        if root.parent_id.is_some() {
            return malformed(format!("root `{}` must not have a parent", self.root_id));
        }

        for (&key, node) in &self.nodes {
            if key != node.id {
                return malformed(format!(
                    "node map key `{key}` does not match node id `{}`",
                    node.id
                ));
            }
            match node.parent_id {
                None => {
                    if key != self.root_id {
                        return malformed(format!("node `{key}` has no parent but is not the root"));
                    }
                }
                Some(parent_id) => {
                    let Some(parent) = self.nodes.get(&parent_id) else {
                        return malformed(format!(
                            "node `{key}` references missing parent `{parent_id}`"
                        ));
                    };
                    if !parent.children.contains(&key) {
                        return malformed(format!(
                            "parent `{parent_id}` does not list `{key}` as a child"
                        ));
                    }
                }
            }
            for &child_id in &node.children {
                let Some(child) = self.nodes.get(&child_id) else {
                    return malformed(format!(
                        "node `{key}` references missing child `{child_id}`"
                    ));
                };
                if child.parent_id != Some(key) {
                    return malformed(format!(
                        "child `{child_id}` does not point back to parent `{key}`"
                    ));
                }
            }
        }
        Ok(())
    }

    /// The default "Project Planning" document: root with three branches,
    /// each holding two leaves. Used on first load and on reset.
    pub fn sample() -> Self {
        fn node(
            id: &str,
            text: &str,
            parent: Option<&str>,
            children: &[&str],
            level: u32,
        ) -> (NodeId, MindmapNode) {
            let id = NodeId::intern(id);
            let mut n = MindmapNode::new(id, text, parent.map(NodeId::intern), level);
            n.children = children.iter().map(|c| NodeId::intern(c)).collect();
            (id, n)
        }

        let nodes = HashMap::from([
            node(
                "root",
                "Project Planning",
                None,
                &["goals", "timeline", "resources"],
                0,
            ),
            node("goals", "Goals", Some("root"), &["goal1", "goal2"], 1),
            node(
                "timeline",
                "Timeline",
                Some("root"),
                &["phase1", "phase2"],
                1,
            ),
            node(
                "resources",
                "Resources",
                Some("root"),
                &["team", "budget"],
                1,
            ),
            node("goal1", "Increase Revenue", Some("goals"), &[], 2),
            node("goal2", "Improve UX", Some("goals"), &[], 2),
            node("phase1", "Q1 2025", Some("timeline"), &[], 2),
            node("phase2", "Q2 2025", Some("timeline"), &[], 2),
            node("team", "Team Members", Some("resources"), &[], 2),
            node("budget", "Budget Allocation", Some("resources"), &[], 2),
        ]);

        let now = now_iso();
        Self {
            id: "sample-mindmap".to_string(),
            title: "Project Planning".to_string(),
            root_id: NodeId::intern("root"),
            nodes,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Default for Mindmap {
    fn default() -> Self {
        Self::sample()
    }
}

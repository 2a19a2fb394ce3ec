//! Pure mutation algebra over `Mindmap` values.
//!
//! Every operation borrows the input tree and returns a new one; the
//! original is never touched. Callers replace their stored tree with the
//! result, which is what makes two mutations from the same control flow
//! strictly ordered. A failed operation returns an error and nothing else —
//! there is no half-updated state to roll back.

use crate::id::NodeId;
use crate::model::{Mindmap, MindmapError, MindmapNode};

impl Mindmap {
    /// Add a new leaf under `parent_id`, appended to the end of the
    /// parent's children. Returns the new tree and the new node's id.
    pub fn add_child(
        &self,
        parent_id: NodeId,
        text: &str,
    ) -> Result<(Mindmap, NodeId), MindmapError> {
        let parent = self.node(parent_id)?;
        let level = parent.level + 1;

        let mut next = self.clone();
        let new_id = next.fresh_node_id();
        next.nodes
            .insert(new_id, MindmapNode::new(new_id, text, Some(parent_id), level));
        if let Some(parent) = next.nodes.get_mut(&parent_id) {
            parent.children.push(new_id);
        }
        next.touch();
        Ok((next, new_id))
    }

    /// Add one child per entry of `texts` under the same parent, in input
    /// order. Atomic: the parent is validated once up front, so either
    /// every node is added or none is.
    pub fn add_branch(
        &self,
        parent_id: NodeId,
        texts: &[String],
    ) -> Result<(Mindmap, Vec<NodeId>), MindmapError> {
        self.node(parent_id)?;

        let mut current = self.clone();
        let mut new_ids = Vec::with_capacity(texts.len());
        for text in texts {
            let (next, id) = current.add_child(parent_id, text)?;
            current = next;
            new_ids.push(id);
        }
        Ok((current, new_ids))
    }

    /// Delete `node_id` and its entire subtree. The root cannot be deleted —
    /// the tree must always have exactly one root.
    pub fn delete_subtree(&self, node_id: NodeId) -> Result<Mindmap, MindmapError> {
        let node = self.node(node_id)?;
        let Some(parent_id) = node.parent_id else {
            return Err(MindmapError::InvalidOperation(
                "cannot delete the root node".to_string(),
            ));
        };

        let mut next = self.clone();
        if let Some(parent) = next.nodes.get_mut(&parent_id) {
            parent.children.retain(|c| *c != node_id);
        }
        for id in self.subtree_ids(node_id) {
            next.nodes.remove(&id);
        }
        next.touch();
        Ok(next)
    }

    /// Replace a node's text. No structural change.
    pub fn rename_node(&self, node_id: NodeId, text: &str) -> Result<Mindmap, MindmapError> {
        self.node(node_id)?;

        let mut next = self.clone();
        if let Some(node) = next.nodes.get_mut(&node_id) {
            node.text = text.to_string();
        }
        next.touch();
        Ok(next)
    }

    /// Flip a node's collapsed flag. Descendants keep their own flags —
    /// they just have no visual effect while an ancestor is collapsed.
    pub fn toggle_collapse(&self, node_id: NodeId) -> Result<Mindmap, MindmapError> {
        self.node(node_id)?;

        let mut next = self.clone();
        if let Some(node) = next.nodes.get_mut(&node_id) {
            node.collapsed = !node.collapsed;
        }
        next.touch();
        Ok(next)
    }
}

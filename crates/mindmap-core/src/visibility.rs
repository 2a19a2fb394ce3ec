//! Visibility resolver: which nodes a collapsed tree actually shows.
//!
//! A node is visible iff it is the root, or its parent is visible and not
//! collapsed. A collapsed node is itself still visible — only its
//! descendants are hidden. Resolved in one preorder traversal that simply
//! refuses to descend into collapsed nodes, so unreachable map entries are
//! excluded for free.

use crate::id::NodeId;
use crate::model::{Mindmap, MindmapNode};

/// Visible node ids in preorder (root first, children in sibling order).
pub fn visible_ids(map: &Mindmap) -> Vec<NodeId> {
    let mut out = Vec::new();
    let Some(root) = map.get(map.root_id) else {
        return out;
    };
    collect_visible(map, root, &mut out);
    out
}

fn collect_visible(map: &Mindmap, node: &MindmapNode, out: &mut Vec<NodeId>) {
    out.push(node.id);
    if node.collapsed {
        return;
    }
    for child_id in &node.children {
        if let Some(child) = map.get(*child_id) {
            collect_visible(map, child, out);
        }
    }
}

/// A node's currently visible children: none when it is collapsed,
/// otherwise every child id that resolves in the arena. Shared by the
/// layout engine and the graph projector so both agree on what "visible"
/// means.
pub fn visible_children<'a>(
    map: &'a Mindmap,
    node: &'a MindmapNode,
) -> impl Iterator<Item = &'a MindmapNode> {
    let children: &[NodeId] = if node.collapsed { &[] } else { &node.children };
    children.iter().filter_map(|id| map.get(*id))
}

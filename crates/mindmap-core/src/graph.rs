//! Graph projector: visible tree + positions → renderer-agnostic
//! node/edge lists.
//!
//! The projection carries display metadata (level color, selection flag,
//! collapse flag, box size) but knows nothing about the rendering surface.
//! It holds no state and is recomputed on every tree, collapse, or
//! selection change.

use crate::id::NodeId;
use crate::layout::{LayoutConfig, Position, compute_layout};
use crate::model::Mindmap;
use crate::visibility::visible_ids;
use serde::Serialize;
use std::collections::HashSet;

/// Rendered node box dimensions, shared with the layout spacing defaults.
pub const NODE_WIDTH: f32 = 150.0;
pub const NODE_HEIGHT: f32 = 40.0;

/// Level → color table for visual hierarchy. Levels past the end clamp to
/// the last entry.
pub const LEVEL_COLORS: [&str; 6] = [
    "#6366f1", // indigo - root
    "#8b5cf6", // violet - level 1
    "#a855f7", // purple - level 2
    "#d946ef", // fuchsia - level 3
    "#ec4899", // pink - level 4
    "#f43f5e", // rose - level 5+
];

/// Deterministic color for a depth level.
pub fn level_color(level: u32) -> &'static str {
    LEVEL_COLORS[(level as usize).min(LEVEL_COLORS.len() - 1)]
}

/// One visible node, ready for a renderer to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: NodeId,
    pub text: String,
    pub level: u32,
    pub is_root: bool,
    pub is_selected: bool,
    pub has_children: bool,
    pub is_collapsed: bool,
    pub color: &'static str,
    pub position: Position,
    pub width: f32,
    pub height: f32,
}

/// A directed parent → child edge between two visible nodes, colored by
/// the child's level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub color: &'static str,
}

/// The full renderer-facing projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MindmapGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Project the visible tree into node and edge lists with default spacing.
pub fn project_graph(map: &Mindmap, selected: &[NodeId]) -> MindmapGraph {
    project_graph_with(map, selected, &LayoutConfig::default())
}

/// Project with explicit layout spacing.
pub fn project_graph_with(
    map: &Mindmap,
    selected: &[NodeId],
    config: &LayoutConfig,
) -> MindmapGraph {
    let positions = compute_layout(map, config);
    let visible = visible_ids(map);
    let visible_set: HashSet<NodeId> = visible.iter().copied().collect();

    let mut nodes = Vec::with_capacity(visible.len());
    let mut edges = Vec::new();

    for node_id in &visible {
        let Some(node) = map.get(*node_id) else {
            continue;
        };
        let Some(position) = positions.get(node_id) else {
            continue;
        };

        nodes.push(GraphNode {
            id: node.id,
            text: node.text.clone(),
            level: node.level,
            is_root: node.parent_id.is_none(),
            is_selected: selected.contains(node_id),
            has_children: !node.children.is_empty(),
            is_collapsed: node.collapsed,
            color: level_color(node.level),
            position: *position,
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
        });

        // Edges leave a node only while it is expanded; edges into hidden
        // children are omitted entirely.
        if node.collapsed {
            continue;
        }
        for child_id in &node.children {
            if visible_set.contains(child_id) {
                edges.push(GraphEdge {
                    id: format!("{node_id}-{child_id}"),
                    source: *node_id,
                    target: *child_id,
                    color: level_color(node.level + 1),
                });
            }
        }
    }

    MindmapGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    #[test]
    fn projects_every_visible_node_and_edge() {
        let map = Mindmap::sample();
        let graph = project_graph(&map, &[]);

        assert_eq!(graph.nodes.len(), 10);
        // A tree has exactly n - 1 edges when fully expanded.
        assert_eq!(graph.edges.len(), 9);

        let root = graph.nodes.iter().find(|n| n.id == map.root_id).unwrap();
        assert!(root.is_root);
        assert!(root.has_children);
        assert_eq!(root.color, "#6366f1");
    }

    #[test]
    fn selection_flag_follows_selection_state() {
        let map = Mindmap::sample();
        let graph = project_graph(&map, &[id("goals"), id("budget")]);

        for node in &graph.nodes {
            let expected = node.id == id("goals") || node.id == id("budget");
            assert_eq!(node.is_selected, expected, "node {}", node.id);
        }
    }

    #[test]
    fn collapsed_node_emits_no_outgoing_edges() {
        let map = Mindmap::sample();
        let collapsed = map.toggle_collapse(id("timeline")).unwrap();
        let graph = project_graph(&collapsed, &[]);

        assert!(graph.nodes.iter().any(|n| n.id == id("timeline")));
        assert!(!graph.nodes.iter().any(|n| n.id == id("phase1")));
        assert!(!graph.nodes.iter().any(|n| n.id == id("phase2")));
        assert!(!graph.edges.iter().any(|e| e.source == id("timeline")));

        let timeline = graph.nodes.iter().find(|n| n.id == id("timeline")).unwrap();
        assert!(timeline.is_collapsed);
        // Still flagged as a parent so the renderer can show an expander.
        assert!(timeline.has_children);
    }

    #[test]
    fn edges_carry_the_child_level_color() {
        let map = Mindmap::sample();
        let graph = project_graph(&map, &[]);

        let edge = graph
            .edges
            .iter()
            .find(|e| e.source == id("goals") && e.target == id("goal1"))
            .unwrap();
        assert_eq!(edge.id, "goals-goal1");
        assert_eq!(edge.color, level_color(2));
    }

    #[test]
    fn level_color_clamps_past_the_table() {
        assert_eq!(level_color(0), "#6366f1");
        assert_eq!(level_color(5), "#f43f5e");
        assert_eq!(level_color(99), "#f43f5e");
    }

    #[test]
    fn projection_serializes_camel_case() {
        let map = Mindmap::sample();
        let graph = project_graph(&map, &[]);
        let value = serde_json::to_value(&graph).unwrap();

        let first = &value["nodes"][0];
        assert!(first.get("isRoot").is_some());
        assert!(first.get("hasChildren").is_some());
        assert!(first.get("isCollapsed").is_some());
    }
}

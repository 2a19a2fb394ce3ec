//! Proportional subtree-height tree layout.
//!
//! Deterministic and recomputed from scratch on every change — no caching,
//! no incremental update. Two passes over the visible tree:
//!
//! 1. post-order subtree weights: a leaf weighs 1, an internal node the sum
//!    of its visible children (collapsed children contribute nothing);
//! 2. top-down vertical-interval allocation: the root gets
//!    `total_weight * vertical_spacing` centered at 0, every node sits at
//!    the midpoint of its interval, and children split the interval
//!    proportionally to weight, in sibling order, with no gaps or overlap.
//!
//! Depth alone decides the horizontal axis: `x = level * horizontal_spacing`.

use crate::id::NodeId;
use crate::model::{Mindmap, MindmapNode};
use crate::visibility::visible_children;
use serde::Serialize;
use std::collections::HashMap;

/// A 2D position for a visible node. `y = 0` is the vertical center of the
/// whole layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Spacing units for the layout grid.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// Horizontal distance between adjacent depth levels.
    pub horizontal_spacing: f32,
    /// Vertical space allocated per unit of subtree weight.
    pub vertical_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 200.0,
            vertical_spacing: 80.0,
        }
    }
}

/// Compute a position for every visible node. Hidden nodes get no entry.
///
/// Purely a function of tree structure and collapse flags — selection never
/// moves anything.
pub fn compute_layout(map: &Mindmap, config: &LayoutConfig) -> HashMap<NodeId, Position> {
    let mut positions = HashMap::new();
    let Some(root) = map.get(map.root_id) else {
        return positions;
    };

    let mut weights = HashMap::new();
    let total = subtree_weight(map, root, &mut weights) as f32 * config.vertical_spacing;

    place_node(
        map,
        config,
        root,
        0.0,
        -total / 2.0,
        total / 2.0,
        &weights,
        &mut positions,
    );
    positions
}

/// Post-order weight computation over the visible subtree.
fn subtree_weight(
    map: &Mindmap,
    node: &MindmapNode,
    weights: &mut HashMap<NodeId, u32>,
) -> u32 {
    let weight = visible_children(map, node)
        .map(|child| subtree_weight(map, child, weights))
        .sum::<u32>()
        .max(1);
    weights.insert(node.id, weight);
    weight
}

#[allow(clippy::too_many_arguments)]
fn place_node(
    map: &Mindmap,
    config: &LayoutConfig,
    node: &MindmapNode,
    x: f32,
    y_start: f32,
    y_end: f32,
    weights: &HashMap<NodeId, u32>,
    positions: &mut HashMap<NodeId, Position>,
) {
    // Center the node in its allocated vertical interval.
    positions.insert(
        node.id,
        Position {
            x,
            y: (y_start + y_end) / 2.0,
        },
    );

    let total: u32 = visible_children(map, node)
        .map(|child| weights.get(&child.id).copied().unwrap_or(1))
        .sum();
    if total == 0 {
        return;
    }

    // Partition the interval among children proportionally, contiguously.
    let span = y_end - y_start;
    let mut cursor = y_start;
    for child in visible_children(map, node) {
        let child_weight = weights.get(&child.id).copied().unwrap_or(1);
        let allocated = span * child_weight as f32 / total as f32;
        place_node(
            map,
            config,
            child,
            x + config.horizontal_spacing,
            cursor,
            cursor + allocated,
            weights,
            positions,
        );
        cursor += allocated;
    }
}

//! Integration tests: mutations → visibility → layout → projection.
//!
//! Exercises the full `mindmap-core` pipeline starting from the default
//! "Project Planning" document.

use mindmap_core::id::NodeId;
use mindmap_core::layout::{LayoutConfig, compute_layout};
use mindmap_core::model::Mindmap;
use mindmap_core::project_graph;
use mindmap_core::visibility::visible_ids;
use pretty_assertions::assert_eq;

fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}

// ─── End-to-end mutation walk ────────────────────────────────────────────

#[test]
fn default_tree_mutation_walkthrough() {
    let map = Mindmap::sample();
    assert_eq!(map.nodes.len(), 10);

    // Add an idea under the root.
    let (map, new_id) = map.add_child(map.root_id, "New Idea").unwrap();
    assert_eq!(map.nodes.len(), 11);
    let node = map.get(new_id).unwrap();
    assert_eq!(node.level, 1);
    assert_eq!(node.parent_id, Some(map.root_id));
    assert!(visible_ids(&map).contains(&new_id));

    // Delete the goals branch: itself plus two leaves.
    let map = map.delete_subtree(id("goals")).unwrap();
    assert_eq!(map.nodes.len(), 8);
    map.validate().unwrap();

    // Collapse timeline and project: no edges out of it, leaves hidden.
    let map = map.toggle_collapse(id("timeline")).unwrap();
    let graph = project_graph(&map, &[]);
    assert!(!graph.edges.iter().any(|e| e.source == id("timeline")));
    assert!(!graph.nodes.iter().any(|n| n.id == id("phase1")));
    assert!(!graph.nodes.iter().any(|n| n.id == id("phase2")));
}

// ─── Interval accounting ─────────────────────────────────────────────────

/// The sum of the children's allocated interval lengths must equal the
/// parent's interval length; a leaf's interval is one vertical unit.
/// Interval lengths are recovered from the midpoint positions of a deep
/// asymmetric tree.
#[test]
fn child_intervals_tile_the_parent_interval() {
    let map = Mindmap::sample();
    // Deepen one branch so sibling weights are unequal.
    let (map, deep) = map.add_child(id("goal1"), "Deep A").unwrap();
    let (map, _) = map.add_child(id("goal1"), "Deep B").unwrap();
    let (map, _) = map.add_child(deep, "Deeper").unwrap();

    let config = LayoutConfig::default();
    let positions = compute_layout(&map, &config);

    // Total span equals total weight * vertical unit. Weights: goal1 now 2,
    // goal2 1 → goals 3; timeline 2; resources 2; root 7.
    let unit = config.vertical_spacing;
    let goals_span = 3.0 * unit;
    let timeline_span = 2.0 * unit;
    let resources_span = 2.0 * unit;
    let root_span = goals_span + timeline_span + resources_span;
    assert_eq!(root_span, 7.0 * unit);

    // Children tile the root interval contiguously: midpoints are each
    // child's half-span from the running edge, starting at -root_span/2.
    let mut edge = -root_span / 2.0;
    for (branch, span) in [
        ("goals", goals_span),
        ("timeline", timeline_span),
        ("resources", resources_span),
    ] {
        let expected_mid = edge + span / 2.0;
        let actual = positions[&id(branch)].y;
        assert!(
            (actual - expected_mid).abs() < 0.001,
            "branch {branch}: expected y {expected_mid}, got {actual}"
        );
        edge += span;
    }
}

// ─── Visibility round-trip ───────────────────────────────────────────────

#[test]
fn collapse_round_trip_restores_visible_set() {
    let map = Mindmap::sample();
    let before = visible_ids(&map);

    let collapsed = map.toggle_collapse(id("resources")).unwrap();
    let hidden: Vec<NodeId> = before
        .iter()
        .copied()
        .filter(|node_id| !visible_ids(&collapsed).contains(node_id))
        .collect();
    assert_eq!(hidden, vec![id("team"), id("budget")]);

    let restored = collapsed.toggle_collapse(id("resources")).unwrap();
    assert_eq!(visible_ids(&restored), before);
}

// ─── Invariants under mutation sequences ─────────────────────────────────

#[test]
fn invariants_hold_across_a_mutation_sequence() {
    let mut map = Mindmap::sample();

    let (next, branch_ids) = map
        .add_branch(
            id("timeline"),
            &["Q3 2025".to_string(), "Q4 2025".to_string()],
        )
        .unwrap();
    map = next;
    map.validate().unwrap();

    map = map.rename_node(branch_ids[0], "Q3 Launch").unwrap();
    map.validate().unwrap();

    map = map.delete_subtree(branch_ids[1]).unwrap();
    map.validate().unwrap();

    map = map.toggle_collapse(id("goals")).unwrap();
    map.validate().unwrap();

    // Levels always follow the parent.
    for node in map.nodes.values() {
        match node.parent_id {
            None => assert_eq!(node.level, 0),
            Some(parent_id) => {
                assert_eq!(node.level, map.get(parent_id).unwrap().level + 1)
            }
        }
    }
}

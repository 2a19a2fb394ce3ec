pub mod graph;
pub mod id;
pub mod layout;
pub mod model;
pub mod mutate;
pub mod normalize;
pub mod visibility;

pub use graph::{GraphEdge, GraphNode, MindmapGraph, level_color, project_graph};
pub use id::NodeId;
pub use layout::{LayoutConfig, Position, compute_layout};
pub use model::{Mindmap, MindmapError, MindmapNode, NodeStyle};
pub use normalize::normalize_tree;
pub use visibility::visible_ids;

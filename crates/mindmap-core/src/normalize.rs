//! Schema normalizer for externally supplied trees.
//!
//! Agent backends emit trees in a snake_case convention (`root_id`,
//! `parent_id`, `created_at`); the canonical in-memory schema is camelCase.
//! Detection is by marker field: a string-valued `rootId` means the payload
//! is already canonical and passes through unchanged. Everything else goes
//! through an explicit validate-then-convert decode that fails closed —
//! a payload missing required fields never becomes a `Mindmap`.

use crate::id::NodeId;
use crate::model::{Mindmap, MindmapError, MindmapNode, now_iso};
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Normalize an external tree payload into the canonical schema.
///
/// Both paths run `Mindmap::validate` before the tree is accepted, so a
/// referentially broken payload surfaces `MalformedInput` instead of
/// corrupting the store.
pub fn normalize_tree(value: Value) -> Result<Mindmap, MindmapError> {
    if value.get("rootId").is_some_and(Value::is_string) {
        // Already canonical: decode directly. Absent timestamps are
        // backfilled by the serde defaults; nothing else changes.
        let map: Mindmap = serde_json::from_value(value)
            .map_err(|e| MindmapError::MalformedInput(e.to_string()))?;
        map.validate()?;
        return Ok(map);
    }

    let Some(obj) = value.as_object() else {
        return Err(MindmapError::MalformedInput(
            "tree payload is not a JSON object".to_string(),
        ));
    };

    let id = require_str(obj, "id", "tree")?.to_string();
    let root_id = NodeId::intern(require_str(obj, "root_id", "tree")?);
    let title = opt_str(obj, "title").unwrap_or_default().to_string();

    let Some(raw_nodes) = obj.get("nodes").and_then(Value::as_object) else {
        return Err(MindmapError::MalformedInput(
            "missing required field `nodes` on tree".to_string(),
        ));
    };

    debug!(
        "normalizing snake_case tree `{id}` with {} node(s)",
        raw_nodes.len()
    );
    let mut nodes = HashMap::with_capacity(raw_nodes.len());
    for (key, raw) in raw_nodes {
        nodes.insert(NodeId::intern(key), normalize_node(key, raw)?);
    }

    let map = Mindmap {
        id,
        title,
        root_id,
        nodes,
        created_at: opt_str(obj, "created_at").map_or_else(now_iso, str::to_string),
        updated_at: opt_str(obj, "updated_at").map_or_else(now_iso, str::to_string),
    };
    map.validate()?;
    Ok(map)
}

/// Convert one snake_case node object, defaulting the optional fields.
fn normalize_node(key: &str, raw: &Value) -> Result<MindmapNode, MindmapError> {
    let Some(obj) = raw.as_object() else {
        return Err(MindmapError::MalformedInput(format!(
            "node `{key}` is not a JSON object"
        )));
    };

    let id = NodeId::intern(require_str(obj, "id", key)?);
    let text = require_str(obj, "text", key)?.to_string();
    let parent_id = opt_str(obj, "parent_id").map(NodeId::intern);
    let children = obj
        .get("children")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(NodeId::intern)
                .collect()
        })
        .unwrap_or_default();
    let level = obj.get("level").and_then(Value::as_u64).unwrap_or(0) as u32;
    let collapsed = obj
        .get("collapsed")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(MindmapNode {
        id,
        text,
        parent_id,
        children,
        level,
        collapsed,
        style: None,
    })
}

fn require_str<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    context: &str,
) -> Result<&'a str, MindmapError> {
    obj.get(field).and_then(Value::as_str).ok_or_else(|| {
        MindmapError::MalformedInput(format!(
            "missing required field `{field}` on `{context}`"
        ))
    })
}

fn opt_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    obj.get(field).and_then(Value::as_str)
}

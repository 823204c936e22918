//! JSON import and tree-JSON interchange
//!
//! [`from_json`] loads an ordinary JSON document as a graph. The tree form
//! ([`from_tree_json`] / [`to_tree_json`]) carries parsed paths and
//! expressions between processes without a text parser.

use serde_json::{json, Map, Value as JsonValue};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::limits::{ValidationError, MAX_DEPTH};
use crate::scalar::{Scalar, Value};

static NULL: JsonValue = JsonValue::Null;

/// Load a JSON document
///
/// Object keys become named children holding their values; array items
/// become consecutive children, with nested containers kept as unnamed
/// nodes. `null` adds nothing.
pub fn from_json(value: &JsonValue) -> Graph {
    let g = Graph::new();
    append_json(&g, value);
    g
}

fn append_json(parent: &Graph, value: &JsonValue) {
    match value {
        JsonValue::Null => {}
        JsonValue::Object(map) => {
            for (key, v) in map {
                let child = parent.add(key.as_str());
                append_json(&child, v);
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    let node = Graph::new();
                    append_json(&node, item);
                    parent.push(node);
                } else {
                    append_json(parent, item);
                }
            }
        }
        scalar => {
            if let Some(s) = scalar_from_json(scalar) {
                parent.add(s);
            }
        }
    }
}

/// Convert a JSON value for writing into a graph
///
/// Scalars map directly and `null` is `Nil`. Containers become a
/// transparent graph, so writing one splices its children in place.
pub fn value_from_json(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Nil,
        JsonValue::Object(_) | JsonValue::Array(_) => Value::Graph(from_json(value)),
        scalar => scalar_from_json(scalar).into(),
    }
}

fn scalar_from_json(value: &JsonValue) -> Option<Scalar> {
    match value {
        JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_f64().map(Scalar::Float)),
        JsonValue::String(s) => Some(Scalar::Str(s.clone())),
        _ => None,
    }
}

/// Read a node tree
///
/// A scalar is a leaf and `null` a transparent leaf. An array is
/// `[label, child...]`, and an object is the explicit form
/// `{"content": label, "children": [...]}` with both keys optional.
pub fn from_tree_json(value: &JsonValue) -> Result<Graph> {
    read_tree(value, 0)
}

fn read_tree(value: &JsonValue, depth: usize) -> Result<Graph> {
    if depth > MAX_DEPTH {
        return Err(ValidationError::GraphTooDeep { max: MAX_DEPTH }.into());
    }

    let (content, children): (&JsonValue, &[JsonValue]) = match value {
        JsonValue::Array(items) => match items.split_first() {
            Some((label, rest)) => (label, rest),
            None => return Err(Error::InvalidTree("empty node array".to_string())),
        },
        JsonValue::Object(map) => read_explicit(map)?,
        leaf => (leaf, &[]),
    };

    let node = Graph::from_content(tree_content(content)?);
    for child in children {
        node.push(read_tree(child, depth + 1)?);
    }
    Ok(node)
}

fn read_explicit(map: &Map<String, JsonValue>) -> Result<(&JsonValue, &[JsonValue])> {
    if let Some(key) = map.keys().find(|k| *k != "content" && *k != "children") {
        return Err(Error::InvalidTree(format!("unknown key: {}", key)));
    }
    let content = map.get("content").unwrap_or(&NULL);
    let children = match map.get("children") {
        None => &[][..],
        Some(JsonValue::Array(items)) => items.as_slice(),
        Some(other) => {
            return Err(Error::InvalidTree(format!(
                "children must be an array, got {}",
                other
            )))
        }
    };
    Ok((content, children))
}

fn tree_content(value: &JsonValue) -> Result<Option<Scalar>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Array(_) | JsonValue::Object(_) => Err(Error::InvalidTree(format!(
            "node content must be a scalar, got {}",
            value
        ))),
        scalar => Ok(scalar_from_json(scalar)),
    }
}

/// Write a node tree in the explicit form; `children` is left out of leaves
pub fn to_tree_json(g: &Graph) -> Result<JsonValue> {
    write_tree(g, 0)
}

fn write_tree(g: &Graph, depth: usize) -> Result<JsonValue> {
    if depth > MAX_DEPTH {
        return Err(ValidationError::GraphTooDeep { max: MAX_DEPTH }.into());
    }

    let content = serde_json::to_value(g.content())?;
    if g.is_empty() {
        return Ok(json!({ "content": content }));
    }
    let children = g
        .children()
        .iter()
        .map(|c| write_tree(c, depth + 1))
        .collect::<Result<Vec<_>>>()?;
    Ok(json!({ "content": content, "children": children }))
}

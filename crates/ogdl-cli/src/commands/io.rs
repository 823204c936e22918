//! Reading documents and parsed trees

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde_json::Value as JsonValue;

use ogdl_core::{json, Graph};

/// Read a JSON document from a file, or stdin for `-`
pub fn read_document(path: &Path) -> anyhow::Result<Graph> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    let value: JsonValue = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    tracing::debug!("Loaded document from {:?}", path);
    Ok(json::from_json(&value))
}

/// Parse a tree-JSON argument; `@file` reads it from a file
pub fn read_tree(arg: &str) -> anyhow::Result<Graph> {
    let text = match arg.strip_prefix('@') {
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file))?,
        None => arg.to_string(),
    };
    let value: JsonValue =
        serde_json::from_str(&text).with_context(|| format!("Invalid tree JSON: {}", text))?;
    Ok(json::from_tree_json(&value)?)
}

/// Parse a value argument: JSON if it parses, plain text otherwise
pub fn read_value(arg: &str) -> ogdl_core::Value {
    match serde_json::from_str::<JsonValue>(arg) {
        Ok(value) => json::value_from_json(&value),
        Err(_) => arg.into(),
    }
}

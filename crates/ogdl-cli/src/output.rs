//! Output formatting utilities

use ogdl_core::{emit, json, Graph, Value};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Format an evaluation result
///
/// In text form a node result is printed with its own label, while a
/// transparent container prints only its children. `Nil` prints nothing.
pub fn format_value(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(match value {
            Value::Graph(g) if !g.is_transparent() => emit::show(g),
            other => other.label(),
        }),
    }
}

/// Format a whole document
pub fn format_document(
    g: &Graph,
    format: OutputFormat,
    include_root: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json::to_tree_json(g)?)?),
        OutputFormat::Text if include_root => Ok(emit::show(g)),
        OutputFormat::Text => Ok(emit::text(g)),
    }
}

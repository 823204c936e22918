//! Scalar content of nodes and dynamically typed evaluation results

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::graph::Graph;

/// Content carried by a node
///
/// A node without a scalar (`Option<Scalar>::None`) is transparent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl Scalar {
    /// Text form used for field-name matching and emission
    pub fn label(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s.clone(),
            Scalar::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

/// Result of resolving a path or evaluating an expression
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Nothing: absent content or a failed resolution
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Graph(Graph),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Scalar form of this value, `None` for `Nil` and graphs
    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Nil | Value::Graph(_) => None,
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Int(i) => Some(Scalar::Int(*i)),
            Value::Float(f) => Some(Scalar::Float(*f)),
            Value::Str(s) => Some(Scalar::Str(s.clone())),
            Value::Bytes(b) => Some(Scalar::Bytes(b.clone())),
        }
    }

    /// Text form of this value; graphs render through the emitter
    pub fn label(&self) -> String {
        match self {
            Value::Nil => String::new(),
            Value::Graph(g) => crate::emit::text(g),
            other => other.to_scalar().map(|s| s.label()).unwrap_or_default(),
        }
    }

    pub fn as_graph(&self) -> Option<&Graph> {
        match self {
            Value::Graph(g) => Some(g),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Int(i) => Value::Int(i),
            Scalar::Float(f) => Value::Float(f),
            Scalar::Str(s) => Value::Str(s),
            Scalar::Bytes(b) => Value::Bytes(b),
        }
    }
}

impl From<Option<Scalar>> for Value {
    fn from(s: Option<Scalar>) -> Self {
        s.map(Value::from).unwrap_or(Value::Nil)
    }
}

impl From<Graph> for Value {
    fn from(g: Graph) -> Self {
        Value::Graph(g)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_none(),
            Value::Graph(g) => crate::json::to_tree_json(g)
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
            other => other.to_scalar().serialize(serializer),
        }
    }
}

//! OGDL Core - ordered graph data model
//!
//! A graph is a tree of nodes, each carrying an optional scalar and an
//! ordered list of children. Nodes are shared handles, so a graph may
//! alias subtrees or contain cycles. On top of the model this crate
//! resolves and writes paths, evaluates expressions, and renders text.
//!
//! Paths and expressions are consumed already parsed, as graphs whose
//! nodes carry the reserved tags in [`tag`].

pub mod convert;
pub mod emit;
pub mod error;
pub mod eval;
pub mod graph;
pub mod json;
pub mod limits;
pub mod options;
pub mod path;
pub mod scalar;
pub mod tag;

pub use convert::Number;
pub use error::{Error, Result};
pub use eval::Evaluator;
pub use graph::Graph;
pub use limits::{ValidationError, MAX_DEPTH, MAX_SET_INDEX};
pub use options::EvalOptions;
pub use scalar::{Scalar, Value};
pub use tag::{Operator, Tag};

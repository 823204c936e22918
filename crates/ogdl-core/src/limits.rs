//! Resource limits for graph probing and path writes

/// Depth beyond which a graph is reported as cyclic (100)
///
/// This is a heuristic: a tree deeper than this is indistinguishable from a
/// cycle. Use [`Graph::has_cycle`](crate::Graph::has_cycle) for a real check.
pub const MAX_DEPTH: usize = 100;

/// Largest index a path write may grow a children list to (1M)
pub const MAX_SET_INDEX: usize = 1 << 20;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    SetIndexTooLarge { index: usize, max: usize },
    GraphTooDeep { max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetIndexTooLarge { index, max } => {
                write!(f, "Index too large for write: {} (max {})", index, max)
            }
            Self::GraphTooDeep { max } => {
                write!(f, "Graph deeper than {} levels or cyclic", max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate an index used to grow a children list
pub fn validate_set_index(index: usize) -> Result<(), ValidationError> {
    if index > MAX_SET_INDEX {
        return Err(ValidationError::SetIndexTooLarge {
            index,
            max: MAX_SET_INDEX,
        });
    }
    Ok(())
}

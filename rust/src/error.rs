//! Error handling and result types for BTree operations.
//!
//! Expected outcomes (duplicate key on insert, missing key on delete) are plain
//! return values and never show up here. This type covers bad configuration and
//! the integrity failures reported by the validation helpers.

/// Error type for B-tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BTreeError {
    /// Invalid minimum degree specified at construction.
    InvalidMinDegree(String),
    /// Internal data structure integrity violation.
    DataIntegrityError(String),
    /// Node operation failed.
    NodeError(String),
}

impl BTreeError {
    /// Create an InvalidMinDegree error with context
    pub fn invalid_min_degree(min_degree: usize, min_required: usize) -> Self {
        Self::InvalidMinDegree(format!(
            "Minimum degree {} is invalid (minimum required: {})",
            min_degree, min_required
        ))
    }

    /// Create an InvalidMinDegree error for a degree above the supported maximum
    pub fn min_degree_too_large(min_degree: usize, max_allowed: usize) -> Self {
        Self::InvalidMinDegree(format!(
            "Minimum degree {} is invalid (maximum allowed: {})",
            min_degree, max_allowed
        ))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a NodeError with context
    pub fn node_error(node_id: u32, details: &str) -> Self {
        Self::NodeError(format!("node {}: {}", node_id, details))
    }

    /// Check if this error is a configuration error
    pub fn is_min_degree_error(&self) -> bool {
        matches!(self, Self::InvalidMinDegree(_))
    }

    /// Check if this error came from the invariant checker
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, Self::DataIntegrityError(_))
    }
}

impl std::fmt::Display for BTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BTreeError::InvalidMinDegree(msg) => write!(f, "Invalid minimum degree: {}", msg),
            BTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            BTreeError::NodeError(msg) => write!(f, "Node error: {}", msg),
        }
    }
}

impl std::error::Error for BTreeError {}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, BTreeError>;

/// Public result type for tree operations that may fail
pub type BTreeResult<T> = Result<T, BTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, BTreeError>;

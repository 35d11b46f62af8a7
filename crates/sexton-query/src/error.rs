//! Error types for the query pipeline.

use thiserror::Error;

/// Errors that can occur when configuring or running a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Page size must be at least one.
    #[error("invalid page size {page_size}: must be a positive integer")]
    InvalidPageSize { page_size: usize },

    /// Unknown sort direction keyword.
    #[error("invalid sort direction '{0}': expected 'asc' or 'desc'")]
    InvalidDirection(String),

    /// Query options document could not be parsed.
    #[error("invalid query options: {0}")]
    InvalidOptions(String),

    /// A pipeline stage failed while reading or comparing items.
    #[error("query failed unexpectedly: {0}")]
    Unexpected(String),
}

impl QueryError {
    /// Returns `true` for errors caused by the caller's configuration rather
    /// than by the data being processed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidPageSize { .. }
                | QueryError::InvalidDirection(_)
                | QueryError::InvalidOptions(_)
        )
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::InvalidOptions(err.to_string())
    }
}

impl From<serde_yaml::Error> for QueryError {
    fn from(err: serde_yaml::Error) -> Self {
        QueryError::InvalidOptions(err.to_string())
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

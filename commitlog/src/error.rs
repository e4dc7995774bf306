//! Error types for the commit log.

use crate::model::Offset;

/// Errors returned by [`AppendLog`](crate::AppendLog) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A read asked for an offset at or beyond the end of the log.
    ///
    /// Callers should treat this as "the record does not exist yet".
    #[error("offset not found: {0}")]
    OffsetNotFound(Offset),

    /// An append was rejected because the log already holds `capacity`
    /// records. Only returned when [`Config::capacity`](crate::Config::capacity)
    /// is set.
    #[error("log capacity of {capacity} records exceeded")]
    CapacityExceeded { capacity: usize },
}

/// Result type alias for commit log operations.
pub type Result<T> = std::result::Result<T, Error>;

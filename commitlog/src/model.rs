//! Core data types for the commit log.
//!
//! This module defines the record type stored by the log and the offset
//! type used to address it.

use bytes::Bytes;

/// Position of a record in the log.
///
/// Offsets are dense and zero-based: the first record appended to a log
/// receives offset 0, the next offset 1, and so on. An offset is assigned
/// by the log at append time and never changes afterwards.
pub type Offset = u64;

/// A record stored in the log.
///
/// Records are immutable once appended. Reading a record returns an owned
/// copy: the `value` is a reference-counted [`Bytes`] handle over memory
/// that is never written again, so later appends cannot be observed through
/// a previously returned record.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use commitlog::{AppendLog, LogRead};
///
/// let log = AppendLog::new();
/// let offset = log.append(Bytes::from("hello")).unwrap();
///
/// let record = log.read(offset).unwrap();
/// assert_eq!(record.offset, 0);
/// assert_eq!(record.value, Bytes::from("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The record payload.
    ///
    /// The log does not interpret or validate the contents. Empty payloads
    /// are permitted.
    pub value: Bytes,

    /// The offset assigned to this record when it was appended.
    pub offset: Offset,
}

impl Record {
    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

//! Read-only log access and the [`LogRead`] trait.
//!
//! This module provides:
//! - [`LogRead`]: The trait defining read operations on the log.
//! - [`AppendLogReader`]: A read-only view of the log that implements `LogRead`.

use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::model::{Offset, Record};

/// Trait for read operations on the log.
///
/// Implemented by both [`AppendLog`](crate::AppendLog), which can also
/// append, and [`AppendLogReader`], which cannot. Code that only consumes
/// records should be generic over this trait.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use commitlog::{AppendLog, LogRead, Record};
///
/// fn last_record(reader: &impl LogRead) -> Option<Record> {
///     let len = reader.len() as u64;
///     len.checked_sub(1).and_then(|offset| reader.read(offset).ok())
/// }
///
/// let log = AppendLog::new();
/// log.append(Bytes::from("a")).unwrap();
/// log.append(Bytes::from("b")).unwrap();
///
/// assert_eq!(last_record(&log).unwrap().value, Bytes::from("b"));
/// assert_eq!(last_record(&log.reader()).unwrap().offset, 1);
/// ```
pub trait LogRead {
    /// Reads the record stored at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OffsetNotFound`] if `offset` is not less than the
    /// length of the log at the time of the call.
    fn read(&self, offset: Offset) -> Result<Record>;

    /// Returns the number of records in the log.
    fn len(&self) -> usize;

    /// Returns true if no record has been appended yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records shared between a log and its readers.
///
/// The record at index `i` always has offset `i`. Every access happens under
/// the lock, so a reader never sees a length whose record is not yet stored.
#[derive(Debug, Default)]
pub(crate) struct Records {
    inner: RwLock<Vec<Record>>,
}

impl Records {
    pub(crate) fn read(&self, offset: Offset) -> Result<Record> {
        // A panic while holding the lock cannot leave the vector half-written,
        // so a poisoned lock is safe to keep using.
        let records = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        usize::try_from(offset)
            .ok()
            .and_then(|index| records.get(index))
            .cloned()
            .ok_or(Error::OffsetNotFound(offset))
    }

    pub(crate) fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Stores `value` at the end of the log and returns its offset.
    ///
    /// The length check, offset assignment and push happen under a single
    /// write guard.
    pub(crate) fn push(&self, value: Bytes, capacity: Option<usize>) -> Result<Offset> {
        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(capacity) = capacity {
            if records.len() >= capacity {
                return Err(Error::CapacityExceeded { capacity });
            }
        }
        let offset = records.len() as Offset;
        records.push(Record { value, offset });
        Ok(offset)
    }
}

/// A read-only view of an [`AppendLog`](crate::AppendLog).
///
/// `AppendLogReader` shares its records with the log it was created from,
/// so it observes every append made through the log, including those made
/// after the reader was created. It is cheap to clone and can be handed to
/// consumers that should not have write access.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use commitlog::{AppendLog, LogRead};
///
/// let log = AppendLog::new();
/// let reader = log.reader();
///
/// log.append(Bytes::from("event")).unwrap();
///
/// assert_eq!(reader.len(), 1);
/// assert_eq!(reader.read(0).unwrap().value, Bytes::from("event"));
/// ```
#[derive(Debug, Clone)]
pub struct AppendLogReader {
    records: Arc<Records>,
}

impl AppendLogReader {
    pub(crate) fn new(records: Arc<Records>) -> Self {
        Self { records }
    }
}

impl LogRead for AppendLogReader {
    fn read(&self, offset: Offset) -> Result<Record> {
        self.records.read(offset)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::AppendLog;

    #[test]
    fn should_read_records_through_reader() {
        // given
        let log = AppendLog::new();
        log.append(Bytes::from("first")).unwrap();
        log.append(Bytes::from("second")).unwrap();
        let reader = log.reader();

        // when
        let record = reader.read(1).unwrap();

        // then
        assert_eq!(record.value, Bytes::from("second"));
        assert_eq!(record.offset, 1);
        assert_eq!(reader.len(), 2);
    }

    #[test]
    fn should_observe_appends_made_after_reader_was_created() {
        // given
        let log = AppendLog::new();
        let reader = log.reader();
        assert!(reader.is_empty());

        // when
        log.append(Bytes::from("late")).unwrap();

        // then
        assert_eq!(reader.len(), 1);
        assert_eq!(reader.read(0).unwrap().value, Bytes::from("late"));
    }

    #[test]
    fn should_return_offset_not_found_from_reader() {
        // given
        let log = AppendLog::new();
        let reader = log.reader();

        // when
        let result = reader.read(0);

        // then
        assert_eq!(result, Err(Error::OffsetNotFound(0)));
    }

    #[test]
    fn should_share_records_between_cloned_readers() {
        // given
        let log = AppendLog::new();
        let reader = log.reader();
        let cloned = reader.clone();

        // when
        log.append(Bytes::from("shared")).unwrap();

        // then
        assert_eq!(reader.read(0).unwrap(), cloned.read(0).unwrap());
    }

    #[test]
    fn should_report_offset_not_found_for_offsets_beyond_usize() {
        // given
        let records = Records::default();

        // when
        let result = records.read(u64::MAX);

        // then
        assert_eq!(result, Err(Error::OffsetNotFound(u64::MAX)));
    }
}

//! Core log implementation with the append and read APIs.
//!
//! This module provides the [`AppendLog`] struct, the primary entry point
//! for interacting with the commit log. It exposes the write operation
//! ([`append`](AppendLog::append)) directly and the read operations via the
//! [`LogRead`] trait.

use std::sync::Arc;

use bytes::Bytes;

use crate::config::Config;
use crate::error::Result;
use crate::model::{Offset, Record};
use crate::reader::{AppendLogReader, LogRead, Records};

/// An in-memory, append-only sequence of records.
///
/// Each appended record is assigned the next offset, starting at zero, and
/// is stored at exactly that position. Records are never removed or
/// modified, so an offset returned by [`append`](AppendLog::append) stays
/// readable for the lifetime of the log.
///
/// # Thread Safety
///
/// `AppendLog` is designed to be shared across threads, typically behind an
/// `Arc`. All methods take `&self`. Appends are serialized by an internal
/// lock that also covers offset assignment, so two concurrent appends never
/// receive the same offset. Reads take the same lock and never observe a
/// partially appended record. The lock is only held for constant-time work.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use commitlog::{AppendLog, Error, LogRead};
///
/// let log = AppendLog::new();
///
/// assert_eq!(log.append(Bytes::from("hello")).unwrap(), 0);
/// assert_eq!(log.append(Bytes::from("world")).unwrap(), 1);
///
/// let record = log.read(1).unwrap();
/// assert_eq!(record.value, Bytes::from("world"));
/// assert_eq!(record.offset, 1);
///
/// assert_eq!(log.read(2), Err(Error::OffsetNotFound(2)));
/// ```
#[derive(Debug, Default)]
pub struct AppendLog {
    records: Arc<Records>,
    config: Config,
}

impl AppendLog {
    /// Creates an empty log with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            records: Arc::default(),
            config,
        }
    }

    /// Returns the configuration this log was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Appends a record containing `value` to the end of the log.
    ///
    /// The payload is stored as-is; empty payloads are permitted. Returns the
    /// offset assigned to the new record, which is the number of records in
    /// the log before this call.
    ///
    /// # Errors
    ///
    /// Never fails unless [`Config::capacity`] is set. With a capacity, returns
    /// [`Error::CapacityExceeded`](crate::Error::CapacityExceeded) when the log
    /// is already full; the log is left unchanged.
    pub fn append(&self, value: impl Into<Bytes>) -> Result<Offset> {
        self.records.push(value.into(), self.config.capacity)
    }

    /// Returns the offset the next successful append will be assigned.
    pub fn next_offset(&self) -> Offset {
        self.records.len() as Offset
    }

    /// Returns a read-only view sharing this log's records.
    pub fn reader(&self) -> AppendLogReader {
        AppendLogReader::new(Arc::clone(&self.records))
    }
}

impl LogRead for AppendLog {
    fn read(&self, offset: Offset) -> Result<Record> {
        self.records.read(offset)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use rstest::rstest;

    use super::*;
    use crate::error::Error;

    #[test]
    fn should_create_empty_log() {
        // given/when
        let log = AppendLog::new();

        // then
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(log.next_offset(), 0);
        assert_eq!(log.config(), &Config::default());
    }

    #[test]
    fn should_append_and_read_in_order() {
        // given
        let log = AppendLog::new();

        // when
        let first = log.append(Bytes::from("hello")).unwrap();
        let second = log.append(Bytes::from("world")).unwrap();

        // then
        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(
            log.read(0).unwrap(),
            Record {
                value: Bytes::from("hello"),
                offset: 0,
            }
        );
        assert_eq!(
            log.read(1).unwrap(),
            Record {
                value: Bytes::from("world"),
                offset: 1,
            }
        );
        assert_eq!(log.read(2), Err(Error::OffsetNotFound(2)));
    }

    #[test]
    fn should_append_empty_payload() {
        // given
        let log = AppendLog::new();

        // when
        let offset = log.append(Bytes::new()).unwrap();

        // then
        assert_eq!(offset, 0);
        let record = log.read(0).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
        assert_eq!(record.offset, 0);
    }

    #[test]
    fn should_accept_any_payload_convertible_to_bytes() {
        // given
        let log = AppendLog::new();

        // when
        log.append("str").unwrap();
        log.append(vec![0u8, 1, 2]).unwrap();
        log.append(&b"static"[..]).unwrap();

        // then
        assert_eq!(log.read(0).unwrap().value, Bytes::from("str"));
        assert_eq!(log.read(1).unwrap().value, Bytes::from(vec![0u8, 1, 2]));
        assert_eq!(log.read(2).unwrap().value, Bytes::from("static"));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(0, 1)]
    #[case(3, 3)]
    #[case(3, 4)]
    #[case(3, u64::MAX)]
    fn should_return_offset_not_found_at_or_beyond_end(
        #[case] appended: usize,
        #[case] offset: Offset,
    ) {
        // given
        let log = AppendLog::new();
        for i in 0..appended {
            log.append(format!("record-{i}")).unwrap();
        }

        // when
        let result = log.read(offset);

        // then
        assert_eq!(result, Err(Error::OffsetNotFound(offset)));
    }

    #[test]
    fn should_assign_dense_offsets_matching_positions() {
        // given
        let log = AppendLog::new();
        let n = 100;

        // when
        let offsets: Vec<Offset> = (0..n)
            .map(|i| log.append(format!("value-{i}")).unwrap())
            .collect();

        // then
        assert_eq!(offsets, (0..n as Offset).collect::<Vec<_>>());
        for i in 0..n {
            let record = log.read(i as Offset).unwrap();
            assert_eq!(record.offset, i as Offset);
            assert_eq!(record.value, Bytes::from(format!("value-{i}")));
        }
    }

    #[test]
    fn should_return_equal_records_on_repeated_reads() {
        // given
        let log = AppendLog::new();
        log.append(Bytes::from("stable")).unwrap();

        // when
        let first = log.read(0).unwrap();
        let second = log.read(0).unwrap();

        // then
        assert_eq!(first, second);
    }

    #[test]
    fn should_not_change_previously_read_record_after_append() {
        // given
        let log = AppendLog::new();
        log.append(Bytes::from("before")).unwrap();
        let record = log.read(0).unwrap();

        // when
        for i in 0..64 {
            log.append(format!("after-{i}")).unwrap();
        }

        // then
        assert_eq!(record.value, Bytes::from("before"));
        assert_eq!(record.offset, 0);
        assert_eq!(log.read(0).unwrap(), record);
    }

    #[test]
    fn should_assign_increasing_offsets_and_keep_earlier_offsets_readable() {
        // given
        let log = AppendLog::new();
        let mut previous = log.append(Bytes::from("first")).unwrap();

        for i in 0..10 {
            // when
            let next = log.append(format!("next-{i}")).unwrap();

            // then
            assert!(next > previous);
            assert!(log.read(previous).is_ok());
            previous = next;
        }
        assert_eq!(log.next_offset(), previous + 1);
    }

    #[test]
    fn should_reject_append_when_capacity_reached() {
        // given
        let log = AppendLog::with_config(Config { capacity: Some(2) });
        log.append(Bytes::from("a")).unwrap();
        log.append(Bytes::from("b")).unwrap();

        // when
        let result = log.append(Bytes::from("c"));

        // then
        assert_eq!(result, Err(Error::CapacityExceeded { capacity: 2 }));
        assert_eq!(log.len(), 2);
        assert_eq!(log.read(1).unwrap().value, Bytes::from("b"));
        assert_eq!(log.read(2), Err(Error::OffsetNotFound(2)));
    }

    #[test]
    fn should_reject_every_append_with_zero_capacity() {
        // given
        let log = AppendLog::with_config(Config { capacity: Some(0) });

        // when
        let result = log.append(Bytes::new());

        // then
        assert_eq!(result, Err(Error::CapacityExceeded { capacity: 0 }));
        assert!(log.is_empty());
    }

    #[test]
    fn should_assign_unique_offsets_to_concurrent_appends() {
        // given
        let log = Arc::new(AppendLog::new());
        let threads = 8;
        let per_thread = 250;

        // when
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    (0..per_thread)
                        .map(|i| {
                            let value = Bytes::from(format!("{t}-{i}"));
                            let offset = log.append(value.clone()).unwrap();
                            (offset, value)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let appended: Vec<(Offset, Bytes)> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        // then
        let total = threads * per_thread;
        let offsets: HashSet<Offset> = appended.iter().map(|(offset, _)| *offset).collect();
        assert_eq!(offsets.len(), total);
        assert_eq!(offsets, (0..total as Offset).collect::<HashSet<_>>());
        assert_eq!(log.len(), total);
        for (offset, value) in appended {
            let record = log.read(offset).unwrap();
            assert_eq!(record.offset, offset);
            assert_eq!(record.value, value);
        }
    }

    #[test]
    fn should_never_observe_missing_record_below_length_while_appending() {
        // given
        let log = Arc::new(AppendLog::new());
        let writer = {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..1_000 {
                    log.append(format!("v{i}")).unwrap();
                }
            })
        };

        // when
        let mut observed = 0;
        while observed < 1_000 {
            let len = log.len();
            for offset in observed..len {
                // then
                let record = log.read(offset as Offset).unwrap();
                assert_eq!(record.offset, offset as Offset);
                assert_eq!(record.value, Bytes::from(format!("v{offset}")));
            }
            observed = len;
        }
        writer.join().unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn should_assign_unique_offsets_to_concurrent_tasks() {
        // given
        let log = Arc::new(AppendLog::new());
        let tasks = 64;

        // when
        let handles: Vec<_> = (0..tasks)
            .map(|i| {
                let log = Arc::clone(&log);
                tokio::spawn(async move { log.append(format!("task-{i}")).unwrap() })
            })
            .collect();
        let mut offsets = Vec::with_capacity(tasks);
        for handle in handles {
            offsets.push(handle.await.unwrap());
        }

        // then
        offsets.sort_unstable();
        assert_eq!(offsets, (0..tasks as Offset).collect::<Vec<_>>());
    }

    #[test]
    fn should_keep_independent_logs_separate() {
        // given
        let a = AppendLog::new();
        let b = AppendLog::new();

        // when
        a.append(Bytes::from("only-in-a")).unwrap();

        // then
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
        assert_eq!(b.read(0), Err(Error::OffsetNotFound(0)));
    }
}

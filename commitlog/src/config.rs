//! Configuration options for the commit log.

/// Configuration for creating an [`AppendLog`](crate::AppendLog).
///
/// The default configuration places no bound on the number of records.
///
/// # Example
///
/// ```
/// use commitlog::{AppendLog, Config};
///
/// let log = AppendLog::with_config(Config {
///     capacity: Some(1_000),
/// });
/// assert_eq!(log.config().capacity, Some(1_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of records the log will hold.
    ///
    /// When `None` (the default), appends never fail. When set, an append
    /// made while the log already holds `capacity` records fails with
    /// [`Error::CapacityExceeded`](crate::Error::CapacityExceeded) and the
    /// log is left unchanged.
    pub capacity: Option<usize>,
}

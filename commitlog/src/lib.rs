//! Commit Log - an in-memory, append-only log of opaque byte records.
//!
//! Clients append payloads and receive the offset each one was stored at;
//! later they read a record back by that offset.
//!
//! # Key Concepts
//!
//! - **AppendLog**: The log itself, providing both append and read operations.
//!   It is created empty and only grows for its whole lifetime.
//! - **AppendLogReader**: A read-only view of a log, useful for consumers that
//!   should not have write access.
//! - **Offsets**: Each record is assigned an offset at append time. Offsets are
//!   dense and zero-based, so the record at offset `i` is the `i + 1`-th record
//!   appended, and an offset never changes once assigned.
//!
//! # Concurrency
//!
//! A log is typically shared as `Arc<AppendLog>`. Appends are linearized by an
//! internal lock so concurrent callers always receive distinct offsets, and a
//! read never observes a record that is only partially appended.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use commitlog::{AppendLog, Error, LogRead};
//!
//! let log = AppendLog::new();
//!
//! let offset = log.append(Bytes::from("order-123")).unwrap();
//! assert_eq!(offset, 0);
//!
//! let record = log.read(offset).unwrap();
//! assert_eq!(record.value, Bytes::from("order-123"));
//!
//! assert_eq!(log.read(1), Err(Error::OffsetNotFound(1)));
//! ```
//!
//! # HTTP server
//!
//! With the `http-server` feature (enabled by default) the [`server`] module
//! exposes a log over HTTP, and the `commitlog` binary runs that server.

mod config;
mod error;
mod log;
mod model;
mod reader;
#[cfg(feature = "http-server")]
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
pub use log::AppendLog;
pub use model::{Offset, Record};
pub use reader::{AppendLogReader, LogRead};

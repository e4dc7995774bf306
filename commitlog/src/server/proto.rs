//! Protobuf message definitions for the commit log HTTP API.
//!
//! These types support both binary protobuf encoding (`application/protobuf`)
//! and JSON encoding. In JSON, byte fields are base64 encoded.

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// Record is a single log record: a payload and the offset it is stored at.
///
/// The offset is assigned by the log. Any offset a client sends as part of
/// a produce request is ignored.
#[serde_as]
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct Record {
    #[prost(bytes = "bytes", tag = "1")]
    #[serde_as(as = "Base64")]
    #[serde(default)]
    pub value: bytes::Bytes,
    #[prost(uint64, tag = "2")]
    #[serde(default)]
    pub offset: u64,
}

impl From<crate::Record> for Record {
    fn from(record: crate::Record) -> Self {
        Self {
            value: record.value,
            offset: record.offset,
        }
    }
}

/// ProduceRequest is the request body for POST /.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct ProduceRequest {
    #[prost(message, optional, tag = "1")]
    pub record: Option<Record>,
}

/// ProduceResponse tells the caller at which offset the record was stored.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct ProduceResponse {
    #[prost(uint64, tag = "1")]
    pub offset: u64,
}

/// ConsumeRequest is the request body for GET /.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct ConsumeRequest {
    #[prost(uint64, tag = "1")]
    #[serde(default)]
    pub offset: u64,
}

/// ConsumeResponse carries the record stored at the requested offset.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct ConsumeResponse {
    #[prost(message, optional, tag = "1")]
    pub record: Option<Record>,
}

impl ConsumeResponse {
    /// Create a response carrying `record`.
    pub fn new(record: crate::Record) -> Self {
        Self {
            record: Some(record.into()),
        }
    }
}

/// ErrorResponse is returned for all error cases.
#[derive(Clone, PartialEq, Message, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[prost(string, tag = "1")]
    pub status: String,
    #[prost(string, tag = "2")]
    pub message: String,
}

impl ErrorResponse {
    /// Create an error response with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

//! HTTP request types for the commit log server.

use axum::http::{HeaderMap, header};
use bytes::Bytes;
use prost::Message;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::proto;
use super::response::is_binary_protobuf;
use crate::model::Offset;

/// Check if the request body is protobuf based on Content-Type header.
/// Only matches `application/protobuf`, not `application/protobuf+json`.
fn is_protobuf_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(is_binary_protobuf)
        .unwrap_or(false)
}

/// Decode a body as protobuf or JSON depending on the Content-Type header.
fn decode_body<T>(headers: &HeaderMap, body: &[u8]) -> Result<T, ApiError>
where
    T: Message + Default + DeserializeOwned,
{
    if is_protobuf_content(headers) {
        T::decode(body).map_err(|e| ApiError::InvalidInput(format!("Invalid protobuf: {}", e)))
    } else {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidInput(format!("Invalid JSON: {}", e)))
    }
}

/// A decoded request to append a record.
#[derive(Debug)]
pub struct ProduceRequest {
    /// Payload to append.
    pub value: Bytes,
}

impl ProduceRequest {
    /// Parse a produce request from the raw body based on Content-Type header.
    ///
    /// - `application/protobuf`: Parse as binary protobuf
    /// - anything else: Parse as JSON
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> Result<Self, ApiError> {
        let request: proto::ProduceRequest = decode_body(headers, body)?;
        let record = request
            .record
            .ok_or_else(|| ApiError::InvalidInput("record is required".to_string()))?;

        Ok(Self {
            value: record.value,
        })
    }
}

/// A decoded request to read the record at an offset.
#[derive(Debug)]
pub struct ConsumeRequest {
    /// Offset to read.
    pub offset: Offset,
}

impl ConsumeRequest {
    /// Parse a consume request from the raw body based on Content-Type header.
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> Result<Self, ApiError> {
        let request: proto::ConsumeRequest = decode_body(headers, body)?;
        Ok(Self {
            offset: request.offset,
        })
    }
}

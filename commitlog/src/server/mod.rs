//! HTTP interface to the commit log.
//!
//! The server is a thin shell over [`AppendLog`](crate::AppendLog): it decodes
//! requests, calls `append` or `read`, and maps results and errors onto HTTP
//! responses. The log itself has no knowledge of this module.
//!
//! | Method | Path        | Body                          | Response                          |
//! |--------|-------------|-------------------------------|-----------------------------------|
//! | POST   | `/`         | `{"record": {"value": b64}}`  | `{"offset": n}`                   |
//! | GET    | `/`         | `{"offset": n}`               | `{"record": {"value", "offset"}}` |
//! | GET    | `/metrics`  |                               | Prometheus text format            |
//! | GET    | `/-/healthy`|                               | `OK`                              |
//! | GET    | `/-/ready`  |                               | `OK`                              |

pub mod config;
pub mod error;
pub mod handlers;
mod http;
pub mod metrics;
pub mod middleware;
pub mod proto;
pub mod request;
pub mod response;

pub use config::{CliArgs, LogServerConfig};
pub use http::{LogServer, router};

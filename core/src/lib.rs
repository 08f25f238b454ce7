//! Blocking JSON-over-HTTP request executor.
//!
//! # Overview
//! Issues GET/POST/PUT/DELETE calls against caller-supplied absolute URLs and
//! decodes `200` response bodies into any `serde` deserializable type.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`).
//!   Building (`request`) and decoding (`decode`) are pure functions; only the
//!   `Transport` touches the network.
//! - `RequestExecutor` holds no mutable state. The default `UreqTransport`
//!   creates and drops its own agent on every call.
//! - The verb methods (`get`, `post`, ...) collapse every failure into `None`
//!   after logging it. The `try_*` methods and `execute` return the tagged
//!   `ApiError` instead.

pub mod client;
pub mod decode;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;

pub use client::RequestExecutor;
pub use decode::decode_response;
pub use error::ApiError;
pub use http::{Fields, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};

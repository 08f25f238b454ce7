//! Stateless request executor.
//!
//! # Design
//! `RequestExecutor` holds only its `Transport`. Each verb builds an
//! `HttpRequest` (see `request`), hands it to the transport, and decodes the
//! response (see `decode`). Two surfaces share that pipeline:
//! - `get` / `post` / `put` / `delete` collapse every failure into `None`.
//!   Failures are logged at error level, except `UnhandledStatus` and
//!   `EmptyBody`, which only show up at debug level.
//! - `try_*` and `execute` return the `ApiError` so callers can tell a 404
//!   from a parse failure.

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::decode::decode_response;
use crate::error::ApiError;
use crate::http::{Fields, HttpMethod, HttpRequest};
use crate::request::{build_delete, build_get, build_post, build_put};
use crate::transport::{Transport, UreqTransport};

/// Issues requests through `T` and decodes JSON responses.
///
/// Holds no per-call state, so a shared reference can be used from many
/// threads at once when `T` allows it.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor<T = UreqTransport> {
    transport: T,
}

impl RequestExecutor {
    pub fn new() -> Self {
        Self::with_transport(UreqTransport)
    }
}

impl<T: Transport> RequestExecutor<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and decode the response into `R`.
    pub fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let response = self.transport.execute(&request)?;
        decode_response(&response)
    }

    pub fn try_get<R: DeserializeOwned>(
        &self,
        url: &str,
        headers: Option<&Fields>,
    ) -> Result<R, ApiError> {
        self.execute(build_get(url, headers))
    }

    pub fn try_post<R: DeserializeOwned>(
        &self,
        url: &str,
        form: Option<&Fields>,
        headers: Option<&Fields>,
    ) -> Result<R, ApiError> {
        self.execute(build_post(url, form, headers)?)
    }

    pub fn try_put<R: DeserializeOwned>(
        &self,
        url: &str,
        form: Option<&Fields>,
        headers: Option<&Fields>,
    ) -> Result<R, ApiError> {
        self.execute(build_put(url, form, headers)?)
    }

    pub fn try_delete<R: DeserializeOwned>(
        &self,
        url: &str,
        headers: Option<&Fields>,
    ) -> Result<R, ApiError> {
        self.execute(build_delete(url, headers))
    }

    /// GET `url` and decode a `200` body into `R`; `None` on any failure.
    pub fn get<R: DeserializeOwned>(&self, url: &str, headers: Option<&Fields>) -> Option<R> {
        collapse(HttpMethod::Get, url, self.try_get(url, headers))
    }

    /// GET `url` expecting a JSON array of `R`.
    pub fn get_list<R: DeserializeOwned>(
        &self,
        url: &str,
        headers: Option<&Fields>,
    ) -> Option<Vec<R>> {
        self.get(url, headers)
    }

    /// POST `form` url-encoded to `url`; `None` on any failure.
    pub fn post<R: DeserializeOwned>(
        &self,
        url: &str,
        form: Option<&Fields>,
        headers: Option<&Fields>,
    ) -> Option<R> {
        collapse(HttpMethod::Post, url, self.try_post(url, form, headers))
    }

    /// POST expecting a JSON array of `R`.
    pub fn post_list<R: DeserializeOwned>(
        &self,
        url: &str,
        form: Option<&Fields>,
        headers: Option<&Fields>,
    ) -> Option<Vec<R>> {
        self.post(url, form, headers)
    }

    /// PUT `form` url-encoded to `url`; `None` on any failure.
    pub fn put<R: DeserializeOwned>(
        &self,
        url: &str,
        form: Option<&Fields>,
        headers: Option<&Fields>,
    ) -> Option<R> {
        collapse(HttpMethod::Put, url, self.try_put(url, form, headers))
    }

    /// DELETE `url`; `None` on any failure.
    pub fn delete<R: DeserializeOwned>(&self, url: &str, headers: Option<&Fields>) -> Option<R> {
        collapse(HttpMethod::Delete, url, self.try_delete(url, headers))
    }
}

fn collapse<R>(method: HttpMethod, url: &str, result: Result<R, ApiError>) -> Option<R> {
    match result {
        Ok(value) => Some(value),
        Err(ApiError::UnhandledStatus { status, .. }) => {
            debug!(%method, url, status, "no value for response status");
            None
        }
        Err(ApiError::EmptyBody) => {
            debug!(%method, url, "empty response body");
            None
        }
        Err(err) => {
            error!(%method, url, error = %err, "request failed");
            None
        }
    }
}

//! The seam between request data and the network.
//!
//! # Design
//! `UreqTransport` builds a fresh agent for every call and drops it before
//! returning, so no connection outlives a single request. Status codes are
//! never treated as errors here: every response that arrives is handed back
//! as data and classified by `decode_response`. Bodies are kept as raw bytes.

use tracing::debug;
use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one `HttpRequest` and returns the raw response.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by `ureq`, using its default timeouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    fn agent() -> Agent {
        Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = Self::agent();
        let url = request.url.as_str();
        let body = request.body.as_deref().unwrap_or_default().as_bytes();

        debug!(method = %request.method, url, "sending request");
        let mut response = match request.method {
            HttpMethod::Get => with_headers(agent.get(url), &request.headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(url), &request.headers).call(),
            HttpMethod::Post => with_headers(agent.post(url), &request.headers).send(body),
            HttpMethod::Put => with_headers(agent.put(url), &request.headers).send(body),
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Only a 200 body is ever decoded, so a body that cannot be read
        // must not mask the status of any other response.
        let body = match response.body_mut().read_to_vec() {
            Ok(body) => body,
            Err(err) if status != 200 => {
                debug!(
                    method = %request.method,
                    url,
                    status,
                    error = %err,
                    "discarding unreadable body"
                );
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };
        debug!(method = %request.method, url, status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

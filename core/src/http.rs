//! HTTP transport types described as plain data.
//!
//! # Design
//! The request builders produce `HttpRequest` values and the decoder consumes
//! `HttpResponse` values without touching the network. Only a `Transport`
//! turns one into the other. All fields use owned types so values can be
//! recorded, replayed from test vectors, or moved across threads freely.

use std::collections::BTreeMap;
use std::fmt;

use ureq::http::StatusCode;

/// Name/value mapping used for both form parameters and headers.
///
/// Ordered so the encoded form body and header list are deterministic.
pub type Fields = BTreeMap<String, String>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is passed to the transport untouched: it is neither validated nor
/// escaped here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `body` holds the raw bytes; only a `200` body is ever interpreted, as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// `"<code> <reason>"`, e.g. `404 Not Found`. Falls back to the bare code
    /// when the status has no canonical reason phrase.
    pub fn status_line(&self) -> String {
        let reason = StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason());
        match reason {
            Some(reason) => format!("{} {reason}", self.status),
            None => self.status.to_string(),
        }
    }
}

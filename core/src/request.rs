//! Pure request builders, one per verb.
//!
//! POST and PUT always carry a form-encoded body, even when no parameters
//! are given; GET and DELETE never carry one. Caller headers are forwarded
//! as-is; the form content type is added only when the caller did not set
//! a content type of their own.

use crate::error::ApiError;
use crate::http::{Fields, HttpMethod, HttpRequest};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub fn build_get(url: &str, headers: Option<&Fields>) -> HttpRequest {
    bodiless(HttpMethod::Get, url, headers)
}

pub fn build_delete(url: &str, headers: Option<&Fields>) -> HttpRequest {
    bodiless(HttpMethod::Delete, url, headers)
}

pub fn build_post(
    url: &str,
    form: Option<&Fields>,
    headers: Option<&Fields>,
) -> Result<HttpRequest, ApiError> {
    with_form(HttpMethod::Post, url, form, headers)
}

pub fn build_put(
    url: &str,
    form: Option<&Fields>,
    headers: Option<&Fields>,
) -> Result<HttpRequest, ApiError> {
    with_form(HttpMethod::Put, url, form, headers)
}

/// Url-encode `form` as an `application/x-www-form-urlencoded` body.
pub fn encode_form(form: Option<&Fields>) -> Result<String, ApiError> {
    match form {
        Some(fields) => serde_urlencoded::to_string(fields)
            .map_err(|e| ApiError::SerializationError(e.to_string())),
        None => Ok(String::new()),
    }
}

fn bodiless(method: HttpMethod, url: &str, headers: Option<&Fields>) -> HttpRequest {
    HttpRequest {
        method,
        url: url.to_string(),
        headers: header_list(headers),
        body: None,
    }
}

fn with_form(
    method: HttpMethod,
    url: &str,
    form: Option<&Fields>,
    headers: Option<&Fields>,
) -> Result<HttpRequest, ApiError> {
    let body = encode_form(form)?;
    let mut headers = header_list(headers);
    let has_content_type = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
    if !has_content_type {
        headers.push(("content-type".to_string(), FORM_CONTENT_TYPE.to_string()));
    }
    Ok(HttpRequest {
        method,
        url: url.to_string(),
        headers,
        body: Some(body),
    })
}

fn header_list(headers: Option<&Fields>) -> Vec<(String, String)> {
    headers
        .map(|fields| {
            fields
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

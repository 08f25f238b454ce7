//! Status dispatch and JSON decoding of responses.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Decode `response` into `T`.
///
/// Only `200` carries a value. `404` and `401` map to their own variants;
/// every other status is reported as `UnhandledStatus`. An empty `200` body
/// is read as JSON `null`, so `()` and `Option<_>` targets accept it; any
/// other target gets `EmptyBody` rather than a parse error.
pub fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    match response.status {
        200 => {
            let body = response.body.trim_ascii();
            if body.is_empty() {
                return serde_json::from_str("null").map_err(|_| ApiError::EmptyBody);
            }
            serde_json::from_slice(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
        }
        404 => Err(ApiError::NotFound {
            status_line: response.status_line(),
        }),
        401 => Err(ApiError::Unauthorized {
            status_line: response.status_line(),
        }),
        status => Err(ApiError::UnhandledStatus {
            status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }),
    }
}

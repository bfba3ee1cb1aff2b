//! Response envelope and body parsing

use super::transport::HttpResponse;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Successful response: status, headers and the parsed body
#[derive(Debug, Clone)]
pub struct DetailedResponse<T = Value> {
    status: u16,
    headers: HeaderMap,
    result: Option<T>,
}

impl<T> DetailedResponse<T> {
    /// Create a response envelope
    pub fn new(status: u16, headers: HeaderMap, result: Option<T>) -> Self {
        Self {
            status,
            headers,
            result,
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parsed body, `None` when the response had no body
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Consume the envelope and return the parsed body
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}

impl DetailedResponse<Value> {
    /// Reinterpret the JSON body as a typed value
    pub fn into_typed<U: DeserializeOwned>(self) -> Result<DetailedResponse<U>> {
        let result = match self.result {
            Some(value) => Some(serde_json::from_value(value)?),
            None => None,
        };
        Ok(DetailedResponse {
            status: self.status,
            headers: self.headers,
            result,
        })
    }

    /// Build the envelope from a successful transport response
    pub(crate) fn from_http(response: HttpResponse, accept: Option<&str>) -> Result<Self> {
        let result = parse_body(&response, accept)?;
        Ok(Self::new(response.status, response.headers, result))
    }
}

/// Parse a response body according to its content type (JSON by default)
fn parse_body(response: &HttpResponse, accept: Option<&str>) -> Result<Option<Value>> {
    if response.body.is_empty() {
        return Ok(None);
    }

    let content_type = response
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let is_json = match content_type {
        Some(ct) => is_json_media_type(ct),
        None => accept.is_none_or(is_json_media_type),
    };

    if is_json {
        serde_json::from_slice(&response.body)
            .map(Some)
            .map_err(|e| Error::decode(format!("Invalid JSON body: {e}")))
    } else {
        let text = String::from_utf8_lossy(&response.body).into_owned();
        Ok(Some(Value::String(text)))
    }
}

fn is_json_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}

/// Build a structured error from a non-2xx response
pub(crate) fn error_from_response(response: &HttpResponse) -> Error {
    let body: Option<Value> = serde_json::from_slice(&response.body).ok();
    let message = body
        .as_ref()
        .and_then(extract_error_message)
        .or_else(|| {
            let text = String::from_utf8_lossy(&response.body).trim().to_string();
            (!text.is_empty() && body.is_none()).then_some(text)
        })
        .unwrap_or_else(|| {
            StatusCode::from_u16(response.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string()
        });

    Error::HttpStatus {
        status: response.status,
        message,
        body,
    }
}

/// Pull a human readable message out of a service error document
pub(crate) fn extract_error_message(body: &Value) -> Option<String> {
    let from = |v: &Value| v.as_str().map(str::to_string);

    if let Some(first) = body.get("errors").and_then(|e| e.get(0)) {
        if let Some(msg) = first.get("message").and_then(from) {
            return Some(msg);
        }
    }
    match body.get("error") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Object(obj)) => {
            if let Some(msg) = obj.get("message").and_then(from) {
                return Some(msg);
            }
        }
        _ => {}
    }
    ["message", "errorMessage", "error_description"]
        .iter()
        .find_map(|key| body.get(*key).and_then(from))
}

//! Request descriptor construction
//!
//! Turns an [`OperationDescriptor`] plus [`CallParams`] into a fully resolved
//! [`RequestDescriptor`]. Pure transformation and validation; no I/O.

use super::descriptor::{CallParams, FileData, OperationDescriptor, ParamSpec};
use crate::error::{Error, Result};
use crate::types::{
    ArrayStyle, JsonObject, Method, ParamLocation, JSON_CONTENT_TYPE, MERGE_PATCH_CONTENT_TYPE,
    MULTIPART_CONTENT_TYPE,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::trace;
use url::Url;

/// Regex for matching path placeholders: {bucket_id}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Value of a multipart form part
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// Plain text field
    Text(String),
    /// Binary field with its content type
    File(FileData),
}

/// One multipart form part
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    /// Wire name of the field
    pub name: String,
    /// Field value
    pub value: FormValue,
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(Value),
    /// Multipart form
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Check if there is no body
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// JSON body, if any
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Multipart parts, if any
    pub fn as_multipart(&self) -> Option<&[FormPart]> {
        match self {
            Self::Multipart(parts) => Some(parts),
            _ => None,
        }
    }
}

/// A fully resolved request, ready for the transport
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Name of the operation that produced this request
    pub operation: &'static str,
    /// HTTP method
    pub method: Method,
    /// Service URL with path parameters substituted (no query string)
    pub url: Url,
    /// Query parameters in declaration order
    pub query: Vec<(String, String)>,
    /// Final request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: RequestBody,
    /// Declared safe to retry regardless of method
    pub idempotent: bool,
}

impl RequestDescriptor {
    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// First query value for a key
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// URL including the query string
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        url
    }
}

/// Builds request descriptors against one service URL
#[derive(Debug, Clone)]
pub struct RequestFactory {
    base_url: String,
    default_headers: HeaderMap,
}

impl RequestFactory {
    /// Create a factory for the given service URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: HeaderMap::new(),
        }
    }

    /// Set headers sent with every request (lowest precedence)
    #[must_use]
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Service URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request descriptor
    pub fn build(
        &self,
        op: &OperationDescriptor,
        params: &CallParams,
    ) -> Result<RequestDescriptor> {
        op.validate(params)?;

        let path = resolve_path(op, params)?;
        let url = Url::parse(&format!("{}{}", self.base_url.trim_end_matches('/'), path))?;
        let query = build_query(op, params);
        let body = build_body(op, params);
        let headers = self.build_headers(op, params, &body)?;

        trace!(operation = op.name, method = %op.method, url = %url, "Built request");

        Ok(RequestDescriptor {
            operation: op.name,
            method: op.method,
            url,
            query,
            headers,
            body,
            idempotent: op.idempotent,
        })
    }

    fn build_headers(
        &self,
        op: &OperationDescriptor,
        params: &CallParams,
        body: &RequestBody,
    ) -> Result<HeaderMap> {
        let mut headers = self.default_headers.clone();

        headers.insert(ACCEPT, HeaderValue::from_static(op.accept));

        let content_type = match body {
            RequestBody::Empty => None,
            RequestBody::Json(_) if op.method == Method::PATCH => Some(MERGE_PATCH_CONTENT_TYPE),
            RequestBody::Json(_) => Some(JSON_CONTENT_TYPE),
            RequestBody::Multipart(_) => Some(MULTIPART_CONTENT_TYPE),
        };
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }

        for spec in op.params_in(ParamLocation::Header) {
            if let Some(value) = params.present(spec.name) {
                insert_header(&mut headers, spec.wire_name, &value_to_string(value))?;
            }
        }

        // Caller overrides always win
        for (key, value) in params.headers() {
            insert_header(&mut headers, key, value)?;
        }

        Ok(headers)
    }
}

fn resolve_path(op: &OperationDescriptor, params: &CallParams) -> Result<String> {
    let mut resolved = String::with_capacity(op.path.len());
    let mut last = 0;

    for caps in PLACEHOLDER_REGEX.captures_iter(op.path) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let key = key.as_str();

        let spec = op
            .params_in(ParamLocation::Path)
            .find(|p| p.wire_name == key)
            .ok_or_else(|| {
                Error::invalid_param(key, "path placeholder has no declared parameter")
            })?;
        let value = params
            .present(spec.name)
            .ok_or_else(|| Error::missing_params([spec.name]))?;

        let segment = value_to_string(value);
        // Url normalizes dot segments, including their %2E forms
        if segment == "." || segment == ".." {
            return Err(Error::invalid_param(
                spec.name,
                format!("'{segment}' is not a valid path segment"),
            ));
        }

        resolved.push_str(&op.path[last..whole.start()]);
        resolved.extend(utf8_percent_encode(&segment, PATH_SEGMENT));
        last = whole.end();
    }

    resolved.push_str(&op.path[last..]);
    Ok(resolved)
}

fn build_query(op: &OperationDescriptor, params: &CallParams) -> Vec<(String, String)> {
    let mut query = Vec::new();

    for spec in op.params_in(ParamLocation::Query) {
        let Some(value) = params.present(spec.name) else {
            continue;
        };
        match (value, spec.array_style) {
            (Value::Array(items), ArrayStyle::Multi) => {
                for item in items {
                    query.push((spec.wire_name.to_string(), value_to_string(item)));
                }
            }
            _ => query.push((spec.wire_name.to_string(), value_to_string(value))),
        }
    }

    query
}

fn build_body(op: &OperationDescriptor, params: &CallParams) -> RequestBody {
    if op.has_form_data() {
        let parts = op
            .params_in(ParamLocation::FormData)
            .filter_map(|spec| form_part(spec, params))
            .collect();
        return RequestBody::Multipart(parts);
    }

    if op.has_body() {
        let mut body = JsonObject::new();
        for spec in op.params_in(ParamLocation::Body) {
            if let Some(value) = params.present(spec.name) {
                body.insert(spec.wire_name.to_string(), value.clone());
            }
        }
        return RequestBody::Json(Value::Object(body));
    }

    RequestBody::Empty
}

fn form_part(spec: &ParamSpec, params: &CallParams) -> Option<FormPart> {
    let value = if let Some(file) = params.file(spec.name) {
        FormValue::File(file.clone())
    } else {
        FormValue::Text(value_to_string(params.present(spec.name)?))
    };
    Some(FormPart {
        name: spec.wire_name.to_string(),
        value,
    })
}

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) -> Result<()> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| Error::invalid_param(key, format!("invalid header name: {e}")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::invalid_param(key, format!("invalid header value: {e}")))?;
    headers.insert(name, value);
    Ok(())
}

/// Render a parameter value as wire text.
///
/// Strings are sent raw, arrays comma-joined, objects as JSON text.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

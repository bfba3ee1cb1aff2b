//! Common types used throughout the SDK
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    HEAD,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Upper-case method name as sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::HEAD => reqwest::Method::HEAD,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Parameter Types
// ============================================================================

/// Where a declared operation parameter is placed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Substituted into a `{placeholder}` of the path template
    Path,
    /// Appended to the query string
    Query,
    /// Merged into the JSON request body
    Body,
    /// Sent as a request header
    Header,
    /// Sent as a multipart form part
    FormData,
}

/// Serialization of array values in the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayStyle {
    /// `state=a,b`
    #[default]
    Csv,
    /// `state=a&state=b`
    Multi,
}

// ============================================================================
// Media Types
// ============================================================================

/// `application/json`
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type used for PATCH bodies
pub const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// Content type used for file uploads
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// Default content type for binary form parts
pub const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// Header threading the tenant/instance id through every request
pub const AUTH_INSTANCE_ID_HEADER: &str = "AuthInstanceId";

//! Operation descriptors and per-call parameters
//!
//! An [`OperationDescriptor`] is the static description of one REST call.
//! [`CallParams`] carries the values a caller supplies for one invocation.

use crate::error::{Error, Result};
use crate::types::{
    ArrayStyle, JsonObject, Method, ParamLocation, StringMap, JSON_CONTENT_TYPE,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// A declared parameter of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Caller-facing name (key in [`CallParams`])
    pub name: &'static str,
    /// Name used on the wire (path placeholder, query key, body field, header)
    pub wire_name: &'static str,
    /// Where the parameter goes
    pub location: ParamLocation,
    /// Whether the call fails without it
    pub required: bool,
    /// Serialization of array values (query parameters only)
    pub array_style: ArrayStyle,
}

impl ParamSpec {
    /// Declare a parameter whose wire name equals its caller-facing name
    pub const fn new(name: &'static str, location: ParamLocation) -> Self {
        Self {
            name,
            wire_name: name,
            location,
            required: false,
            array_style: ArrayStyle::Csv,
        }
    }

    /// Path parameter (always required)
    pub const fn path(name: &'static str) -> Self {
        Self::new(name, ParamLocation::Path).required()
    }

    /// Query parameter
    pub const fn query(name: &'static str) -> Self {
        Self::new(name, ParamLocation::Query)
    }

    /// JSON body field
    pub const fn body(name: &'static str) -> Self {
        Self::new(name, ParamLocation::Body)
    }

    /// Header parameter sent under `wire_name`
    pub const fn header(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, ParamLocation::Header).wire(wire_name)
    }

    /// Multipart form field
    pub const fn form(name: &'static str) -> Self {
        Self::new(name, ParamLocation::FormData)
    }

    /// Mark as required
    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Override the wire name
    #[must_use]
    pub const fn wire(self, wire_name: &'static str) -> Self {
        Self { wire_name, ..self }
    }

    /// Serialize arrays as repeated query keys
    #[must_use]
    pub const fn multi(self) -> Self {
        Self {
            array_style: ArrayStyle::Multi,
            ..self
        }
    }
}

/// Static description of one REST operation
#[derive(Debug, Clone, Copy)]
pub struct OperationDescriptor {
    /// Operation name, used in logs
    pub name: &'static str,
    /// HTTP method
    pub method: Method,
    /// Path template with `{placeholder}` segments
    pub path: &'static str,
    /// Declared parameters, in order
    pub params: &'static [ParamSpec],
    /// Explicitly safe to retry regardless of method
    pub idempotent: bool,
    /// Media type requested through `Accept`
    pub accept: &'static str,
}

impl OperationDescriptor {
    /// Describe an operation
    pub const fn new(
        name: &'static str,
        method: Method,
        path: &'static str,
        params: &'static [ParamSpec],
    ) -> Self {
        Self {
            name,
            method,
            path,
            params,
            idempotent: false,
            accept: JSON_CONTENT_TYPE,
        }
    }

    /// Declare the operation safe to retry
    #[must_use]
    pub const fn idempotent(self) -> Self {
        Self {
            idempotent: true,
            ..self
        }
    }

    /// Override the `Accept` media type
    #[must_use]
    pub const fn accept(self, accept: &'static str) -> Self {
        Self { accept, ..self }
    }

    /// Look up a declared parameter by caller-facing name
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Parameters in a given location
    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(move |p| p.location == location)
    }

    /// Whether any parameter is sent as a JSON body field
    pub fn has_body(&self) -> bool {
        self.params_in(ParamLocation::Body).next().is_some()
    }

    /// Whether any parameter is sent as multipart form data
    pub fn has_form_data(&self) -> bool {
        self.params_in(ParamLocation::FormData).next().is_some()
    }

    /// Caller-facing names of the required parameters missing from `params`
    pub fn missing_params(&self, params: &CallParams) -> Vec<String> {
        self.params
            .iter()
            .filter(|p| p.required && !params.is_present(p.name))
            .map(|p| p.name.to_string())
            .collect()
    }

    /// Fail with [`Error::MissingRequiredParameters`] if any required parameter is absent
    pub fn validate(&self, params: &CallParams) -> Result<()> {
        let missing = self.missing_params(params);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingRequiredParameters { names: missing })
        }
    }
}

/// Binary content for a multipart form part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    /// Raw bytes
    pub data: Bytes,
    /// Filename reported in the part's content disposition
    pub filename: Option<String>,
    /// Content type of the part
    pub content_type: Option<String>,
}

impl FileData {
    /// Wrap raw bytes
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            filename: None,
            content_type: None,
        }
    }

    /// Set the filename
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the content type
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Values supplied by the caller for one invocation
#[derive(Debug, Clone, Default)]
pub struct CallParams {
    values: JsonObject,
    files: HashMap<String, FileData>,
    headers: StringMap,
}

impl CallParams {
    /// Create empty call parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any serializable struct whose fields are caller-facing names.
    /// `None` fields should be skipped or serialize to null; both count as absent.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(values) => Ok(Self {
                values,
                ..Self::default()
            }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::invalid_param(
                "params",
                format!("expected an object, got {other}"),
            )),
        }
    }

    /// Add a value
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Add a file
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, file: FileData) -> Self {
        self.files.insert(name.into(), file);
        self
    }

    /// Add a header override
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set a value in place
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Remove a value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Replace all header overrides
    pub fn set_headers(&mut self, headers: StringMap) {
        self.headers = headers;
    }

    /// Get a raw value (may be null)
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a value if it is present (not null and not an empty string)
    pub fn present(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }

    /// Get a file
    pub fn file(&self, name: &str) -> Option<&FileData> {
        self.files.get(name)
    }

    /// Whether a parameter counts as supplied
    pub fn is_present(&self, name: &str) -> bool {
        self.files.contains_key(name) || self.present(name).is_some()
    }

    /// Header overrides
    pub fn headers(&self) -> &StringMap {
        &self.headers
    }
}

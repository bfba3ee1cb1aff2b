//! Transport abstraction
//!
//! The [`Transport`] trait is the seam between the retry executor and the
//! network. [`ReqwestTransport`] is the production implementation; tests
//! substitute their own.

use crate::error::{Error, Result};
use crate::request::{FormPart, FormValue, RequestBody};
use crate::types::{Method, MULTIPART_CONTENT_TYPE, OCTET_STREAM_CONTENT_TYPE};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// One HTTP exchange as seen by the transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Full URL including the query string
    pub url: Url,
    /// Headers, credentials already attached
    pub headers: HeaderMap,
    /// Request body
    pub body: RequestBody,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

/// Raw response returned by the transport
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub body: Bytes,
}

impl HttpResponse {
    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single HTTP request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request. Network-level failures are reported as
    /// [`Error::Transport`] or [`Error::Timeout`]; any received response,
    /// whatever its status, is returned as `Ok`.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with the given default timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            mut headers,
            body,
            timeout,
        } = request;
        let timeout = timeout.unwrap_or(self.timeout);

        debug!("Sending {} {}", method, url);

        let mut req = self.client.request(method.into(), url);

        req = match body {
            RequestBody::Empty => req.headers(headers),
            RequestBody::Json(value) => req.headers(headers).body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(parts) => {
                // reqwest writes its own content type carrying the boundary
                let is_multipart = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|ct| ct.starts_with(MULTIPART_CONTENT_TYPE));
                if is_multipart {
                    headers.remove(CONTENT_TYPE);
                }
                req.headers(headers).multipart(build_form(parts)?)
            }
        };

        let response = req.timeout(timeout).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                }
            } else {
                Error::from(e)
            }
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form> {
    let mut form = Form::new();
    for FormPart { name, value } in parts {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File(file) => {
                let content_type = file
                    .content_type
                    .as_deref()
                    .unwrap_or(OCTET_STREAM_CONTENT_TYPE);
                let mut part = Part::bytes(file.data.to_vec())
                    .mime_str(content_type)
                    .map_err(|e| Error::invalid_param(name.clone(), e.to_string()))?;
                if let Some(filename) = file.filename {
                    part = part.file_name(filename);
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

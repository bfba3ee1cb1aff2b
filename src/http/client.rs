//! HTTP client with authentication, retry and rate limiting
//!
//! Sends request descriptors through a [`Transport`], handling:
//! - Credential attachment before every attempt
//! - Automatic retries with backoff and jitter for retry-safe requests
//! - Client-side rate limiting
//! - Response parsing and error classification

use super::rate_limit::RateLimiter;
use super::response::{error_from_response, DetailedResponse};
use super::retry::RetryPolicy;
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::auth::Authenticate;
use crate::config::ServiceOptions;
use crate::error::{Error, Result};
use crate::request::{CallParams, OperationDescriptor, RequestDescriptor, RequestFactory};
use crate::types::AUTH_INSTANCE_ID_HEADER;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client shared by all operations of a service
///
/// Cheap to clone: configuration is immutable and collaborators are shared.
#[derive(Clone)]
pub struct HttpClient {
    factory: RequestFactory,
    transport: Arc<dyn Transport>,
    authenticator: Arc<dyn Authenticate>,
    retry: RetryPolicy,
    rate_limiter: Option<RateLimiter>,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client using the reqwest transport
    pub fn new(options: &ServiceOptions, authenticator: Arc<dyn Authenticate>) -> Result<Self> {
        let transport = ReqwestTransport::new(options.timeout, &options.user_agent)?;
        Self::with_transport(options, authenticator, Arc::new(transport))
    }

    /// Create a client with a custom transport
    pub fn with_transport(
        options: &ServiceOptions,
        authenticator: Arc<dyn Authenticate>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        options.validate()?;

        let mut default_headers = HeaderMap::new();
        for (key, value) in &options.default_headers {
            default_headers.insert(header_name(key)?, header_value(key, value)?);
        }
        if let Some(id) = &options.auth_instance_id {
            default_headers.insert(
                HeaderName::from_static("authinstanceid"),
                header_value(AUTH_INSTANCE_ID_HEADER, id)?,
            );
        }

        let factory =
            RequestFactory::new(options.service_url.clone()).with_default_headers(default_headers);

        Ok(Self {
            factory,
            transport,
            authenticator,
            retry: options.retry.clone(),
            rate_limiter: options.rate_limit.as_ref().map(RateLimiter::new),
            timeout: options.timeout,
        })
    }

    /// Request factory bound to the service URL
    pub fn factory(&self) -> &RequestFactory {
        &self.factory
    }

    /// Retry policy applied when a call does not supply its own
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Build and send one operation
    pub async fn call(
        &self,
        op: &OperationDescriptor,
        params: &CallParams,
    ) -> Result<DetailedResponse<Value>> {
        let request = self.factory.build(op, params)?;
        self.send(request).await
    }

    /// Send a request with the client's retry policy
    pub async fn send(&self, request: RequestDescriptor) -> Result<DetailedResponse<Value>> {
        self.send_with_policy(request, &self.retry).await
    }

    /// Send a request with an explicit retry policy
    pub async fn send_with_policy(
        &self,
        request: RequestDescriptor,
        policy: &RetryPolicy,
    ) -> Result<DetailedResponse<Value>> {
        let max_retries = if policy.allows(request.method, request.idempotent) {
            policy.max_retries
        } else {
            0
        };
        let url = request.full_url();
        let accept = request.header("accept").map(str::to_string);
        let mut attempt = 0;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut headers = request.headers.clone();
            self.authenticator
                .attach_credentials(&mut headers)
                .await
                .map_err(into_auth_error)?;

            let http_request = HttpRequest {
                method: request.method,
                url: url.clone(),
                headers,
                body: request.body.clone(),
                timeout: Some(self.timeout),
            };

            let (err, retry_after) = match self.transport.execute(http_request).await {
                Ok(response) if response.is_success() => {
                    debug!(
                        "{} {} {} -> {}",
                        request.operation, request.method, url, response.status
                    );
                    return DetailedResponse::from_http(response, accept.as_deref());
                }
                Ok(response) => (
                    error_from_response(&response),
                    parse_retry_after(&response.headers),
                ),
                Err(e) => (e, None),
            };

            if attempt >= max_retries || !err.is_retryable() {
                if attempt > 0 {
                    warn!(
                        "{} failed after {} attempts: {}",
                        request.operation,
                        attempt + 1,
                        err
                    );
                }
                return Err(err);
            }

            let delay = retry_after
                .map(|d| d.min(policy.max_delay))
                .unwrap_or_else(|| policy.backoff(attempt));
            warn!(
                "{} failed ({}), attempt {}/{}, retrying in {:?}",
                request.operation,
                err,
                attempt + 1,
                max_retries + 1,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("service_url", &self.factory.base_url())
            .field("retry", &self.retry)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn into_auth_error(err: Error) -> Error {
    match err {
        Error::Authentication { .. } => err,
        other => Error::auth(other.to_string()),
    }
}

/// Extract a delay-seconds `Retry-After` header
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn header_name(key: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| Error::config(format!("invalid default header name '{key}': {e}")))
}

fn header_value(key: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::config(format!("invalid value for default header '{key}': {e}")))
}

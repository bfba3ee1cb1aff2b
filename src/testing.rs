//! Test doubles for the transport and authenticator seams

use crate::auth::Authenticate;
use crate::config::ServiceOptions;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpRequest, HttpResponse, RetryPolicy, Transport};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) const TEST_SERVICE_URL: &str = "https://lakehouse.test/lakehouse/api";

/// Transport that replays scripted outcomes and records every request
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_json(&self, status: u16, body: Value) {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.push(Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }));
    }

    pub(crate) fn push_status(&self, status: u16) {
        self.push(Ok(HttpResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }));
    }

    pub(crate) fn push_response(&self, response: HttpResponse) {
        self.push(Ok(response));
    }

    pub(crate) fn push_error(&self, error: Error) {
        self.push(Err(error));
    }

    fn push(&self, outcome: Result<HttpResponse>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport("no scripted response left")))
    }
}

/// Authenticator that attaches a fixed bearer token and counts calls
#[derive(Default)]
pub(crate) struct StaticToken {
    pub(crate) calls: AtomicUsize,
}

#[async_trait]
impl Authenticate for StaticToken {
    async fn attach_credentials(&self, headers: &mut HeaderMap) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer test-token"));
        Ok(())
    }
}

/// Authenticator that always fails
pub(crate) struct FailingAuth;

#[async_trait]
impl Authenticate for FailingAuth {
    async fn attach_credentials(&self, _headers: &mut HeaderMap) -> Result<()> {
        Err(Error::auth("credentials unavailable"))
    }
}

/// Retry policy with millisecond delays and no jitter
pub(crate) fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy::exponential()
        .max_retries(max_retries)
        .delays(Duration::from_millis(1), Duration::from_millis(5))
        .jitter(0.0)
}

pub(crate) fn test_options(retry: RetryPolicy) -> ServiceOptions {
    ServiceOptions::builder()
        .service_url(TEST_SERVICE_URL)
        .retry(retry)
        .build()
}

pub(crate) fn test_client(transport: Arc<ScriptedTransport>, retry: RetryPolicy) -> HttpClient {
    HttpClient::with_transport(
        &test_options(retry),
        Arc::new(StaticToken::default()),
        transport,
    )
    .unwrap()
}

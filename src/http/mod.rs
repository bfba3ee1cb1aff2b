//! HTTP module
//!
//! Sends resolved requests with authentication, retry and rate limiting.
//!
//! # Features
//!
//! - **Transport seam**: [`Transport`] trait with a reqwest implementation
//! - **Automatic Retries**: immutable [`RetryPolicy`] with backoff and jitter
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Response Envelope**: [`DetailedResponse`] with status, headers and result

mod client;
mod rate_limit;
mod response;
mod retry;
mod transport;

pub use client::HttpClient;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use response::DetailedResponse;
pub use retry::RetryPolicy;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # watsonx.data Rust SDK
//!
//! Client for the IBM watsonx.data lakehouse REST API.
//!
//! ## Features
//!
//! - **Typed operations**: bucket and database registrations, engines,
//!   catalogs, schemas, tables and ingestion jobs
//! - **Request building**: path templates, query arrays, JSON, merge-patch and
//!   multipart bodies from one static operation description
//! - **Retries**: exponential backoff with jitter for retry-safe requests
//! - **Pagination**: token-driven pagers with `get_next`, `get_all` and a `Stream`
//! - **Auth**: IAM API key exchange with token caching, bearer, basic, API key
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use watsonx_data::{AuthConfig, Authenticator, ServiceOptions, WatsonxData};
//! use watsonx_data::service::ListIngestionJobsParams;
//!
//! #[tokio::main]
//! async fn main() -> watsonx_data::Result<()> {
//!     let auth = Authenticator::new(AuthConfig::iam("my-api-key"));
//!     let options = ServiceOptions::builder()
//!         .auth_instance_id("crn:v1:bluemix:public:lakehouse:us-south:a/...")
//!         .build();
//!     let service = WatsonxData::new(&options, Arc::new(auth))?;
//!
//!     let mut pager = service.ingestion_jobs_pager(ListIngestionJobsParams::default())?;
//!     for job in pager.get_all().await? {
//!         println!("{} {:?}", job.job_id, job.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    WatsonxData (service)                      │
//! │   typed params ──► CallParams ──► OperationDescriptor         │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──────────┬──────────────────────┐
//! │   request    │          http           │     pagination       │
//! ├──────────────┼─────────────────────────┼──────────────────────┤
//! │ Path/Query   │ Auth attach  Rate limit │ Token threading      │
//! │ JSON/Patch   │ Retry/Backoff Transport │ get_next / get_all   │
//! │ Multipart    │ DetailedResponse        │ Stream               │
//! └──────────────┴─────────────────────────┴──────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Authentication (IAM, bearer, basic, API key)
pub mod auth;
/// Service configuration
pub mod config;
/// Error types
pub mod error;
/// Transport, retry and response handling
pub mod http;
/// Token-based pagination
pub mod pagination;
/// Request descriptor building
pub mod request;
/// watsonx.data operations
pub mod service;
/// Common types
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use auth::{AuthConfig, Authenticate, Authenticator};
pub use config::{ServiceConfig, ServiceOptions};
pub use error::{Error, Result, ResultExt};
pub use http::{DetailedResponse, HttpClient, RetryPolicy, Transport};
pub use pagination::{PageSpec, Pager, TokenSource};
pub use request::{CallParams, FileData, OperationDescriptor, ParamSpec, RequestDescriptor};
pub use service::WatsonxData;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SDK name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Authentication module
//!
//! Supports: Bearer, Basic, API Key, IBM Cloud IAM, Custom Headers
//!
//! The [`Authenticate`] trait is the seam the HTTP client calls before every
//! attempt. [`Authenticator`] implements it for all configured schemes and
//! caches IAM tokens until shortly before they expire.

mod authenticator;
mod types;

pub use authenticator::{Authenticate, Authenticator};
pub use types::{AuthConfig, CachedToken, DEFAULT_IAM_URL};

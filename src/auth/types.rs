//! Auth configuration types
//!
//! These types describe how credentials are obtained. They deserialize from
//! the `auth` section of a service configuration file.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// Default IBM Cloud IAM endpoint
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Static bearer token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// API key sent verbatim in a header
    ApiKey {
        /// Header name
        #[serde(default = "default_api_key_header")]
        header_name: String,
        /// Prefix to add before the value (e.g., "Bearer ")
        #[serde(default)]
        prefix: Option<String>,
        /// The API key value
        value: String,
    },

    /// IBM Cloud IAM: exchange an API key for a short-lived bearer token
    Iam {
        /// The IAM API key
        apikey: String,
        /// IAM base URL (token path is `/identity/token`)
        #[serde(default = "default_iam_url")]
        url: String,
        /// Optional client id for basic auth against the token endpoint
        #[serde(default)]
        client_id: Option<String>,
        /// Optional client secret for basic auth against the token endpoint
        #[serde(default)]
        client_secret: Option<String>,
        /// Optional space-separated scopes
        #[serde(default)]
        scope: Option<String>,
    },

    /// Fixed headers added to each request
    CustomHeaders {
        /// Headers to add to each request
        headers: HashMap<String, String>,
    },
}

fn default_api_key_header() -> String {
    "Authorization".to_string()
}

fn default_iam_url() -> String {
    DEFAULT_IAM_URL.to_string()
}

impl AuthConfig {
    /// IAM config against the default endpoint
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: default_iam_url(),
            client_id: None,
            client_secret: None,
            scope: None,
        }
    }

    /// Short name of the scheme, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bearer { .. } => "bearer",
            Self::Basic { .. } => "basic",
            Self::ApiKey { .. } => "api_key",
            Self::Iam { .. } => "iam",
            Self::CustomHeaders { .. } => "custom_headers",
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

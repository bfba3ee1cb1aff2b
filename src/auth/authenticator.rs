//! Authenticator implementation
//!
//! Handles attaching credentials to request headers and managing token refresh.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const IAM_TOKEN_PATH: &str = "/identity/token";
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Attaches credentials to outgoing requests
#[async_trait]
pub trait Authenticate: Send + Sync {
    /// Add credentials to `headers`. Any failure is fatal for the request.
    async fn attach_credentials(&self, headers: &mut HeaderMap) -> Result<()>;
}

/// Config-driven authenticator
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached token for IAM auth
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Check the configuration for empty or malformed credentials
    pub fn validate(&self) -> Result<()> {
        let blank = |field: &str, value: &str| {
            if value.trim().is_empty() {
                Err(Error::config(format!(
                    "{} authentication requires a non-empty '{field}'",
                    self.config.kind()
                )))
            } else {
                Ok(())
            }
        };

        match &self.config {
            AuthConfig::None => Ok(()),
            AuthConfig::Bearer { token } => blank("token", token),
            AuthConfig::Basic { username, password } => {
                blank("username", username)?;
                blank("password", password)
            }
            AuthConfig::ApiKey {
                header_name, value, ..
            } => {
                blank("header_name", header_name)?;
                blank("value", value)
            }
            AuthConfig::Iam {
                apikey,
                url,
                client_id,
                client_secret,
                ..
            } => {
                blank("apikey", apikey)?;
                blank("url", url)?;
                if client_id.is_some() != client_secret.is_some() {
                    return Err(Error::config(
                        "iam authentication requires both 'client_id' and 'client_secret' or neither",
                    ));
                }
                Ok(())
            }
            AuthConfig::CustomHeaders { .. } => Ok(()),
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_iam_token().await.inspect_err(|e| {
            warn!("IAM token request failed: {e}");
        })?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange the API key for an access token
    async fn fetch_iam_token(&self) -> Result<CachedToken> {
        let AuthConfig::Iam {
            apikey,
            url,
            client_id,
            client_secret,
            scope,
        } = &self.config
        else {
            return Err(Error::auth("Token refresh not supported for this auth type"));
        };

        let token_url = if url.trim_end_matches('/').ends_with(IAM_TOKEN_PATH) {
            url.clone()
        } else {
            format!("{}{IAM_TOKEN_PATH}", url.trim_end_matches('/'))
        };

        let mut form = vec![
            ("grant_type", IAM_GRANT_TYPE.to_string()),
            ("apikey", apikey.clone()),
            ("response_type", "cloud_iam".to_string()),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope.clone()));
        }

        debug!("Requesting IAM token from {}", token_url);

        let mut req = self
            .http_client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&form);
        if let (Some(id), Some(secret)) = (client_id, client_secret) {
            req = req.basic_auth(id, Some(secret));
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::auth(format!("Invalid token response: {e}")))?;
        Ok(token_response.into_cached_token())
    }

    /// Clear the cached token (forces a refresh on the next request)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[async_trait]
impl Authenticate for Authenticator {
    async fn attach_credentials(&self, headers: &mut HeaderMap) -> Result<()> {
        match &self.config {
            AuthConfig::None => Ok(()),

            AuthConfig::Bearer { token } => {
                insert(headers, AUTHORIZATION, &format!("Bearer {token}"))
            }

            AuthConfig::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"));
                insert(headers, AUTHORIZATION, &format!("Basic {encoded}"))
            }

            AuthConfig::ApiKey {
                header_name,
                prefix,
                value,
            } => {
                let name = header_name_from(header_name)?;
                let val = format!("{}{}", prefix.as_deref().unwrap_or(""), value);
                insert(headers, name, &val)
            }

            AuthConfig::Iam { .. } => {
                let token = self.get_or_refresh_token().await?;
                insert(headers, AUTHORIZATION, &format!("Bearer {token}"))
            }

            AuthConfig::CustomHeaders { headers: extra } => {
                for (key, value) in extra {
                    insert(headers, header_name_from(key)?, value)?;
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("kind", &self.config.kind())
            .finish_non_exhaustive()
    }
}

fn header_name_from(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::auth(format!("Invalid credential header name '{name}': {e}")))
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|e| Error::auth(format!("Invalid credential value: {e}")))?;
    value.set_sensitive(true);
    headers.insert(name, value);
    Ok(())
}

/// IAM token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry as unix seconds
    #[serde(default)]
    expiration: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        let expires_at = self
            .expiration
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .or_else(|| {
                self.expires_in
                    .map(|secs| Utc::now() + chrono::Duration::seconds(secs))
            });
        CachedToken::new(self.access_token, expires_at)
    }
}

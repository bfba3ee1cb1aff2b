//! Service configuration
//!
//! [`ServiceOptions`] is the immutable runtime configuration read by every
//! call. [`ServiceConfig`] is its file representation, loaded from YAML.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{RateLimiterConfig, RetryPolicy};
use crate::types::{BackoffType, Method};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default watsonx.data service URL
pub const DEFAULT_SERVICE_URL: &str = "https://us-south.lakehouse.cloud.ibm.com/lakehouse/api";

/// Default service name
pub const DEFAULT_SERVICE_NAME: &str = "watsonx_data";

// ============================================================================
// Runtime Options
// ============================================================================

/// Runtime options for a service client
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Base URL for all requests
    pub service_url: String,
    /// Service name, used in logs and the user agent
    pub service_name: String,
    /// Request timeout
    pub timeout: Duration,
    /// Automatic retry behaviour
    pub retry: RetryPolicy,
    /// Client-side rate limiting
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// Instance id sent as `AuthInstanceId` unless a call overrides it
    pub auth_instance_id: Option<String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::disabled(),
            rate_limit: None,
            default_headers: HashMap::new(),
            auth_instance_id: None,
            user_agent: format!("watsonx-data-rust-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServiceOptions {
    /// Create a new options builder
    pub fn builder() -> ServiceOptionsBuilder {
        ServiceOptionsBuilder::default()
    }

    /// Check the options before a client is built
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.service_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "service URL must be http or https, got '{}'",
                self.service_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for service options
#[derive(Default)]
pub struct ServiceOptionsBuilder {
    options: ServiceOptions,
}

impl ServiceOptionsBuilder {
    /// Set the service URL
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.options.service_url = url.into();
        self
    }

    /// Set the service name
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.options.service_name = name.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.options.retry = policy;
        self
    }

    /// Enable client-side rate limiting
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.options.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the instance id sent with every request
    pub fn auth_instance_id(mut self, id: impl Into<String>) -> Self {
        self.options.auth_instance_id = Some(id.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.options.user_agent = agent.into();
        self
    }

    /// Build the options
    pub fn build(self) -> ServiceOptions {
        self.options
    }
}

// ============================================================================
// File Configuration
// ============================================================================

/// Service configuration as loaded from a YAML document
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL for API requests
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Instance id sent as `AuthInstanceId`
    #[serde(default)]
    pub auth_instance_id: Option<String>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,

    /// Default headers for all requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

/// Retry section of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Whether retries are enabled
    #[serde(default)]
    pub enabled: bool,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff type
    #[serde(default)]
    pub backoff_type: BackoffType,

    /// Exponential growth factor
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Randomized fraction of each delay
    #[serde(default = "default_jitter")]
    pub jitter: f64,

    /// Methods retried without an idempotency flag
    #[serde(default = "default_retry_safe_methods")]
    pub retry_safe_methods: Vec<Method>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_type: BackoffType::default(),
            multiplier: default_multiplier(),
            jitter: default_jitter(),
            retry_safe_methods: default_retry_safe_methods(),
        }
    }
}

fn default_max_retries() -> u32 {
    4
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_multiplier() -> f64 {
    2.0
}

fn default_jitter() -> f64 {
    0.5
}

fn default_retry_safe_methods() -> Vec<Method> {
    vec![Method::GET, Method::HEAD]
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        let policy = if config.enabled {
            RetryPolicy::exponential()
        } else {
            RetryPolicy::disabled()
        };
        policy
            .max_retries(config.max_retries)
            .delays(
                Duration::from_millis(config.initial_delay_ms),
                Duration::from_millis(config.max_delay_ms),
            )
            .backoff_type(config.backoff_type)
            .multiplier(config.multiplier)
            .jitter(config.jitter)
            .retry_safe_methods(config.retry_safe_methods.clone())
    }
}

/// Rate limit section of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,
    /// Burst size
    #[serde(default)]
    pub burst_size: Option<u32>,
}

impl ServiceConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Runtime options described by this configuration
    pub fn options(&self) -> ServiceOptions {
        let mut builder = ServiceOptions::builder()
            .service_url(&self.service_url)
            .service_name(&self.service_name)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .retry(RetryPolicy::from(&self.retry));

        if let Some(id) = &self.auth_instance_id {
            builder = builder.auth_instance_id(id);
        }
        if let Some(limit) = &self.rate_limit {
            builder = builder.rate_limit(RateLimiterConfig::new(
                limit.requests_per_second,
                limit.burst_size.unwrap_or(limit.requests_per_second),
            ));
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
service_url: https://cpd.example.com/lakehouse/api
auth_instance_id: "crn:v1:bluemix:public:lakehouse:us-south:a/123::"
timeout_seconds: 15
auth:
  type: iam
  apikey: my-key
retry:
  enabled: true
  max_retries: 2
  initial_delay_ms: 50
  retry_safe_methods: [GET, DELETE]
rate_limit:
  requests_per_second: 5
headers:
  X-Client: demo
"#;

    #[test]
    fn test_options_default() {
        let options = ServiceOptions::default();
        assert_eq!(options.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(options.service_name, "watsonx_data");
        assert!(!options.retry.enabled);
        assert!(options.rate_limit.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_builder() {
        let options = ServiceOptions::builder()
            .service_url("http://localhost:8080")
            .timeout(Duration::from_secs(5))
            .retry(RetryPolicy::exponential().max_retries(2))
            .header("X-Custom", "value")
            .auth_instance_id("instance-1")
            .user_agent("test-agent/1.0")
            .build();

        assert_eq!(options.service_url, "http://localhost:8080");
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.retry.max_retries, 2);
        assert_eq!(
            options.default_headers.get("X-Custom"),
            Some(&"value".to_string())
        );
        assert_eq!(options.auth_instance_id.as_deref(), Some("instance-1"));
        assert_eq!(options.user_agent, "test-agent/1.0");
    }

    #[test]
    fn test_options_validate() {
        let bad_url = ServiceOptions::builder().service_url("not a url").build();
        assert!(matches!(bad_url.validate(), Err(Error::InvalidUrl(_))));

        let bad_scheme = ServiceOptions::builder().service_url("ftp://x").build();
        assert!(matches!(bad_scheme.validate(), Err(Error::Config { .. })));

        let zero = ServiceOptions::builder().timeout(Duration::ZERO).build();
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let config = ServiceConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.auth, AuthConfig::iam("my-key"));

        let options = config.options();
        assert_eq!(options.service_url, "https://cpd.example.com/lakehouse/api");
        assert_eq!(options.timeout, Duration::from_secs(15));
        assert!(options.retry.enabled);
        assert_eq!(options.retry.max_retries, 2);
        assert_eq!(options.retry.initial_delay, Duration::from_millis(50));
        assert_eq!(options.retry.max_delay, Duration::from_secs(30));
        assert!(options.retry.allows(Method::DELETE, false));
        assert_eq!(options.rate_limit.unwrap().burst_size, 5);
        assert_eq!(
            options.default_headers.get("X-Client"),
            Some(&"demo".to_string())
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = ServiceConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.auth, AuthConfig::None);
        assert!(!config.retry.enabled);
        assert!(!config.options().retry.enabled);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_seconds, 15);
    }

    #[test]
    fn test_config_missing_file() {
        let err = ServiceConfig::from_file("/nonexistent/watsonx.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_config_invalid_yaml() {
        let err = ServiceConfig::from_yaml_str("auth: [unclosed").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }
}

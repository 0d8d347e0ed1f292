//! Client configuration
//!
//! `ClientConfig` can be loaded from YAML, built in code with
//! [`ClientConfigBuilder`], and overridden from `PAGEWISE_*` environment
//! variables.
//!
//! ```yaml
//! base_url: https://api.example.com/v2
//! dialect: old
//! dialect_header:
//!   name: X-Api-Dialect
//!   old: "2019-06-01"
//!   new: "2024-01-15"
//! default_page_size: 100
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! ```

use crate::dialect::Dialect;
use crate::error::{Error, Result, ResultExt};
use crate::http::RateLimiterConfig;
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "PAGEWISE_BASE_URL";
/// Environment variable overriding `api_key`
pub const ENV_API_KEY: &str = "PAGEWISE_API_KEY";
/// Environment variable overriding `dialect`
pub const ENV_DIALECT: &str = "PAGEWISE_DIALECT";

// ============================================================================
// Dialect Header
// ============================================================================

/// How the dialect selector is sent on each request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectHeader {
    /// Header name
    #[serde(default = "default_dialect_header_name")]
    pub name: String,
    /// Header value sent for the old dialect
    #[serde(default = "default_old_value")]
    pub old: String,
    /// Header value sent for the new dialect
    #[serde(default = "default_new_value")]
    pub new: String,
}

fn default_dialect_header_name() -> String {
    "X-Api-Dialect".to_string()
}

fn default_old_value() -> String {
    Dialect::Old.as_str().to_string()
}

fn default_new_value() -> String {
    Dialect::New.as_str().to_string()
}

impl Default for DialectHeader {
    fn default() -> Self {
        Self {
            name: default_dialect_header_name(),
            old: default_old_value(),
            new: default_new_value(),
        }
    }
}

impl DialectHeader {
    /// Header value for `dialect`
    pub fn value_for(&self, dialect: Dialect) -> &str {
        match dialect {
            Dialect::Old => &self.old,
            Dialect::New => &self.new,
        }
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL all request paths are joined onto
    pub base_url: String,

    /// Dialect active when the client is created
    #[serde(default)]
    pub dialect: Dialect,

    /// Dialect selector header
    #[serde(default)]
    pub dialect_header: DialectHeader,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page size applied to listings that do not set their own
    #[serde(default)]
    pub default_page_size: Option<u32>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,

    /// Bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("pagewise/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Create a config with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            dialect: Dialect::default(),
            dialect_header: DialectHeader::default(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            default_page_size: None,
            headers: StringMap::new(),
            api_key: None,
            rate_limit: None,
        }
    }

    /// Create a new config builder
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(base_url),
        }
    }

    /// Parse a YAML document and validate it
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config file without validating it, for callers that
    /// layer overrides on top before calling [`ClientConfig::validate`]
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the config for values the transport cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }
        if self.default_page_size == Some(0) {
            return Err(Error::invalid_value(
                "default_page_size",
                "must be positive",
            ));
        }
        if self.dialect_header.name.trim().is_empty() {
            return Err(Error::missing_field("dialect_header.name"));
        }
        Ok(())
    }

    /// Apply `PAGEWISE_*` overrides using `lookup` to read variables
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api_key = Some(api_key).filter(|k| !k.is_empty());
        }
        if let Some(dialect) = lookup(ENV_DIALECT) {
            self.dialect = dialect.parse()?;
        }
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(mut self) -> Result<Self> {
        self.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(self)
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the initial dialect
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    /// Set the dialect selector header
    pub fn dialect_header(mut self, header: DialectHeader) -> Self {
        self.config.dialect_header = header;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the default page size
    pub fn default_page_size(mut self, size: u32) -> Self {
        self.config.default_page_size = Some(size);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set the bearer token
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://api.example.com");
        assert_eq!(config.dialect, Dialect::New);
        assert_eq!(config.dialect_header, DialectHeader::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("pagewise/"));
        assert!(config.default_page_size.is_none());
        assert!(config.rate_limit.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_from_yaml_minimal() {
        let config = ClientConfig::from_yaml_str("base_url: https://api.example.com\n").unwrap();
        assert_eq!(config, ClientConfig::new("https://api.example.com"));
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
base_url: https://api.example.com/v2
dialect: old
dialect_header:
  name: Api-Version
  old: "2019-06-01"
  new: "2024-01-15"
timeout_secs: 10
default_page_size: 50
headers:
  X-Team: billing
api_key: secret
rate_limit:
  requests_per_second: 5
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.dialect, Dialect::Old);
        assert_eq!(config.dialect_header.name, "Api-Version");
        assert_eq!(config.dialect_header.value_for(Dialect::Old), "2019-06-01");
        assert_eq!(config.dialect_header.value_for(Dialect::New), "2024-01-15");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.default_page_size, Some(50));
        assert_eq!(config.headers.get("X-Team"), Some(&"billing".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(5, 1)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            ClientConfig::new("").validate(),
            Err(Error::MissingConfigField { .. })
        ));
        assert!(matches!(
            ClientConfig::new("not a url").validate(),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com").validate(),
            Err(Error::InvalidConfigValue { .. })
        ));

        let mut config = ClientConfig::new("https://api.example.com");
        config.default_page_size = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder("http://localhost:8080")
            .dialect(Dialect::Old)
            .timeout(Duration::from_secs(5))
            .user_agent("test-agent/1.0")
            .default_page_size(25)
            .header("X-Custom", "value")
            .api_key("key")
            .rate_limit(RateLimiterConfig::new(2, 2))
            .build()
            .unwrap();

        assert_eq!(config.dialect, Dialect::Old);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.default_page_size, Some(25));
        assert_eq!(config.headers.get("X-Custom"), Some(&"value".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://staging.example.com"),
            (ENV_API_KEY, "from-env"),
            (ENV_DIALECT, "old"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::new("https://api.example.com");
        config
            .apply_env_overrides(|key| env.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.dialect, Dialect::Old);
    }

    #[test]
    fn test_env_override_bad_dialect() {
        let mut config = ClientConfig::new("https://api.example.com");
        let result = config.apply_env_overrides(|key| {
            (key == ENV_DIALECT).then(|| "sideways".to_string())
        });
        assert!(result.is_err());
        assert_eq!(config.dialect, Dialect::New);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://api.example.com").unwrap();
        writeln!(file, "dialect: old").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dialect, Dialect::Old);
    }

    #[test]
    fn test_read_file_defers_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: not a url").unwrap();

        let config = ClientConfig::read_file(file.path()).unwrap();
        assert_eq!(config.base_url, "not a url");
        assert!(config.validate().is_err());
        assert!(ClientConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::from_file(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}

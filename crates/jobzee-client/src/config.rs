//! Client configuration.

use std::time::Duration;

/// Default backend location for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/v1";

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (includes `/api/v1`)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("JOBZEE_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("JOBZEE_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("JOBZEE_API_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }

    /// Point the config at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var("JOBZEE_API_URL", "https://jobs.example.com/api/v1");
        std::env::set_var("JOBZEE_API_TIMEOUT_SECS", "12");
        std::env::remove_var("JOBZEE_API_CONNECT_TIMEOUT_SECS");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "https://jobs.example.com/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));

        std::env::remove_var("JOBZEE_API_URL");
        std::env::remove_var("JOBZEE_API_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_config_handles_invalid_env_values() {
        std::env::set_var("JOBZEE_API_URL", "  ");
        std::env::set_var("JOBZEE_API_TIMEOUT_SECS", "soon");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));

        std::env::remove_var("JOBZEE_API_URL");
        std::env::remove_var("JOBZEE_API_TIMEOUT_SECS");
    }
}

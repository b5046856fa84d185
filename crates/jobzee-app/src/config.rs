//! Application configuration.

use jobzee_client::ClientConfig;

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Colored human-readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment (development/production)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Backend connection settings
    pub client: ClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
            client: ClientConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("JOBZEE_ENV")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "development".to_string()),
            log_format: std::env::var("LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
            client: ClientConfig::from_env(),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("JOBZEE_ENV");
        std::env::remove_var("LOG_FORMAT");
        std::env::remove_var("JOBZEE_API_URL");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = AppConfig::from_env();
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.is_production());
        assert_eq!(config.client.base_url, ClientConfig::default().base_url);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("JOBZEE_ENV", "Production");
        std::env::set_var("LOG_FORMAT", "JSON");
        std::env::set_var("JOBZEE_API_URL", "https://api.jobzee.example/api/v1");

        let config = AppConfig::from_env();
        assert!(config.is_production());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.client.base_url, "https://api.jobzee.example/api/v1");

        clear_env();
    }

    #[test]
    fn test_unknown_log_format_is_pretty() {
        assert_eq!(LogFormat::parse("logfmt"), LogFormat::Pretty);
    }
}

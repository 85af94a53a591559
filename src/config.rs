//! Configuration handling for the sales dashboard.
//!
//! Configuration comes from CLI arguments and environment variables, with a
//! `.env` file loaded first so local setups match production secrets layout.

use clap::Parser;
use std::time::Duration;

pub const DEFAULT_DB_PATH: &str = "normalized.db";
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ROW_LIMIT: u32 = 1000;

/// Insecure default shared secret, kept for local testing parity.
/// Deployments must override it via `APP_PASSWORD`.
pub const DEFAULT_PASSWORD: &str = "test123";

pub const DEFAULT_AI_BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "llama-3.3-70b-versatile";

/// Configuration for the sales dashboard server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sales-dashboard",
    about = "Password-gated dashboard backend for canned reports, custom SQL, and AI-generated SQL over a SQLite database",
    version
)]
pub struct Config {
    /// Path to the SQLite database file. The file must already exist.
    #[arg(
        short = 'd',
        long = "database",
        value_name = "PATH",
        default_value = DEFAULT_DB_PATH,
        env = "DASHBOARD_DATABASE"
    )]
    pub db_path: String,

    /// Shared secret gating all API routes.
    /// WARNING: the default is insecure and intended for local testing only.
    #[arg(long, default_value = DEFAULT_PASSWORD, env = "APP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// API key for the hosted chat-completion service.
    /// Required: startup fails without it.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// Chat-completion endpoint URL
    #[arg(long, default_value = DEFAULT_AI_BASE_URL, env = "DASHBOARD_AI_URL")]
    pub ai_base_url: String,

    /// Model identifier sent with every chat-completion request
    #[arg(long, default_value = DEFAULT_AI_MODEL, env = "DASHBOARD_AI_MODEL")]
    pub ai_model: String,

    /// HTTP host to bind to
    #[arg(long, default_value = DEFAULT_HTTP_HOST, env = "DASHBOARD_HTTP_HOST")]
    pub http_host: String,

    /// HTTP port to bind to
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env = "DASHBOARD_HTTP_PORT")]
    pub http_port: u16,

    /// Query timeout in seconds
    #[arg(long, default_value_t = DEFAULT_QUERY_TIMEOUT_SECS, env = "DASHBOARD_QUERY_TIMEOUT")]
    pub query_timeout: u64,

    /// Maximum rows returned per query
    #[arg(long, default_value_t = DEFAULT_ROW_LIMIT, env = "DASHBOARD_ROW_LIMIT")]
    pub row_limit: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DASHBOARD_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "DASHBOARD_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Load configuration: read `.env` if present, then parse CLI/env.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            groq_api_key: None,
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            query_timeout: DEFAULT_QUERY_TIMEOUT_SECS,
            row_limit: DEFAULT_ROW_LIMIT,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Get the configured API key, failing when it is absent.
    pub fn require_api_key(&self) -> Result<&str, crate::error::DashboardError> {
        self.groq_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                crate::error::DashboardError::startup_config(
                    "GROQ_API_KEY not found in environment",
                )
            })
    }

    /// True when the insecure default password is still in use.
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_PASSWORD
    }

    /// Get the HTTP bind address.
    pub fn http_bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get the query timeout as a Duration.
    pub fn query_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.db_path, DEFAULT_DB_PATH);
        assert_eq!(config.http_host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert!(config.uses_default_password());
    }

    #[test]
    fn test_http_bind_addr() {
        let config = Config {
            http_host: "0.0.0.0".to_string(),
            http_port: 3000,
            ..Config::default()
        };
        assert_eq!(config.http_bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_query_timeout_duration() {
        let config = Config {
            query_timeout: 60,
            ..Config::default()
        };
        assert_eq!(config.query_timeout_duration(), Duration::from_secs(60));
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = Config::default();
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_require_api_key_blank_rejected() {
        let config = Config {
            groq_api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_require_api_key_present() {
        let config = Config {
            groq_api_key: Some("gsk_test".to_string()),
            ..Config::default()
        };
        assert_eq!(config.require_api_key().unwrap(), "gsk_test");
    }

    #[test]
    fn test_custom_password_not_flagged_as_default() {
        let config = Config {
            password: "s3cret".to_string(),
            ..Config::default()
        };
        assert!(!config.uses_default_password());
    }
}

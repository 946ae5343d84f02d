//! Configuration loading for the Hook Warden CLI.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the webhook secret.
///
/// Takes precedence over the configuration file so the secret can stay
/// out of files checked into version control.
pub const SECRET_ENV_VAR: &str = "HW_WEBHOOK_SECRET";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Webhook verification settings.
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from a file and applies environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_env();
        Ok(config)
    }

    /// Applies environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(secret) = std::env::var(SECRET_ENV_VAR) {
            self.webhook.secret = secret;
        }
    }

    /// Creates a copy with secrets redacted.
    pub fn redact_secrets(&self) -> Self {
        let mut config = self.clone();
        if !config.webhook.secret.is_empty() {
            config.webhook.secret = "***REDACTED***".to_string();
        }
        config
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if format!("{}:{}", self.server.host, self.server.port)
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            result.errors.push(format!(
                "invalid bind address {}:{}",
                self.server.host, self.server.port
            ));
        }

        if self.webhook.verify && self.webhook.secret.is_empty() {
            result.warnings.push(format!(
                "signature verification is enabled but no secret is configured; \
                 set webhook.secret or {SECRET_ENV_VAR} (an empty HMAC key provides \
                 no authentication)"
            ));
        }

        if !self.webhook.verify {
            result.warnings.push(
                "signature verification is disabled; deliveries will be accepted unsigned"
                    .to_string(),
            );
        }

        if !matches!(
            self.logging.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            result
                .errors
                .push(format!("unknown log level {:?}", self.logging.level));
        }

        if let Some(dir) = &self.server.static_dir {
            if !Path::new(dir).is_dir() {
                result
                    .warnings
                    .push(format!("static directory {dir:?} does not exist"));
            }
        }

        result
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Hostname to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/static/`, if any.
    #[serde(default)]
    pub static_dir: Option<String>,

    /// Whether to expose the Swagger UI.
    #[serde(default = "default_true")]
    pub enable_swagger: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            enable_swagger: true,
        }
    }
}

/// Webhook verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Shared secret for signature verification.
    #[serde(default)]
    pub secret: String,

    /// Whether to verify delivery signatures.
    #[serde(default = "default_true")]
    pub verify: bool,

    /// Log the decoded event body for each delivery.
    #[serde(default)]
    pub print_body: bool,

    /// Log the request headers for each delivery.
    #[serde(default)]
    pub print_headers: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            verify: true,
            print_body: false,
            print_headers: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to use JSON format.
    #[serde(default)]
    pub json_format: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Problems that prevent the server from starting.
    pub errors: Vec<String>,
    /// Problems worth surfacing that do not block startup.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Prints errors and warnings to stdout.
    pub fn print(&self) {
        for error in &self.errors {
            println!("  {} {}", "error:".red().bold(), error);
        }
        for warning in &self.warnings {
            println!("  {} {}", "warning:".yellow().bold(), warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(config.webhook.verify);
        assert!(config.webhook.secret.is_empty());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 9000
  static_dir: static

webhook:
  secret: topsecret
  print_body: true

logging:
  level: debug
  json_format: true
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.static_dir.as_deref(), Some("static"));
        assert_eq!(config.webhook.secret, "topsecret");
        assert!(config.webhook.verify, "verify defaults to true");
        assert!(config.webhook.print_body);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_redact_secrets() {
        let mut config = AppConfig::default();
        config.webhook.secret = "hunter2".to_string();

        let redacted = config.redact_secrets();
        assert_eq!(redacted.webhook.secret, "***REDACTED***");

        // An empty secret stays empty rather than looking configured.
        assert_eq!(AppConfig::default().redact_secrets().webhook.secret, "");
    }

    #[test]
    fn test_validate_flags_empty_secret() {
        let config = AppConfig::default();
        let result = config.validate();
        assert!(!result.has_errors());
        assert!(result.has_warnings());
    }

    #[test]
    fn test_validate_rejects_bad_address_and_level() {
        let mut config = AppConfig::default();
        config.server.host = "not a host".to_string();
        config.logging.level = "loud".to_string();

        let result = config.validate();
        assert_eq!(result.errors.len(), 2);
    }
}

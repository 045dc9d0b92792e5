//! Configuration model loaded from external sources.

use serde::Deserialize;
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Signs session cookies and anti-forgery tokens. Must be at least 64 bytes.
    #[validate(length(min = 64))]
    pub secret: String,
    /// Lifetime of an anti-forgery token issued with a page view.
    #[validate(range(min = 60))]
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: i64,
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_token_ttl_seconds() -> i64 {
    12 * 60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, ttl: i64) -> ServerConfig {
        ServerConfig {
            domain: "localhost".to_string(),
            address: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "app.db".to_string(),
            templates_dir: "templates/**/*".to_string(),
            secret: secret.to_string(),
            token_ttl_seconds: ttl,
            cookie_secure: false,
        }
    }

    #[test]
    fn short_secret_fails_validation() {
        assert!(config("short", 3600).validate().is_err());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(config(&"x".repeat(64), 3600).validate().is_ok());
        assert!(config(&"x".repeat(64), 10).validate().is_err());
    }
}

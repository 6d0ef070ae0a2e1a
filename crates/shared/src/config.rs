//! Application configuration management.
//!
//! All configuration is loaded once at startup into explicit structs and
//! passed by reference through the application state; there is no global
//! mutable configuration.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// ID-proof upload configuration.
    #[serde(default)]
    pub uploads: UploadSettings,
    /// Quote-of-the-day configuration.
    #[serde(default)]
    pub quotes: QuoteSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// JWT configuration (deserialized form; see `jwt::JwtConfig` for the service).
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604_800 // 7 days
}

/// ID-proof upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    /// Directory where uploaded files are stored.
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Page the upload form redirects back to on rejection.
    #[serde(default = "default_upload_redirect")]
    pub redirect_path: String,
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024 // 5 MiB
}

fn default_upload_redirect() -> String {
    "/upload".to_string()
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_file_size: default_max_file_size(),
            redirect_path: default_upload_redirect(),
        }
    }
}

/// Quote-of-the-day configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSettings {
    /// Quote API endpoint returning `[{"q": "...", "a": "..."}]`.
    #[serde(default = "default_quote_url")]
    pub url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_quote_timeout")]
    pub timeout_secs: u64,
}

fn default_quote_url() -> String {
    "https://zenquotes.io/api/today".to_string()
}

fn default_quote_timeout() -> u64 {
    3
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            url: default_quote_url(),
            timeout_secs: default_quote_timeout(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STAFFLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_defaults() {
        let settings = UploadSettings::default();
        assert_eq!(settings.max_file_size, 5 * 1024 * 1024);
        assert_eq!(settings.dir, "./uploads");
        assert_eq!(settings.redirect_path, "/upload");
    }

    #[test]
    fn test_quote_defaults() {
        let settings = QuoteSettings::default();
        assert_eq!(settings.timeout_secs, 3);
        assert!(settings.url.starts_with("https://"));
    }
}

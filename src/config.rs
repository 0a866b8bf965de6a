//! Configuration module for villadesk.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, VillaError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Production mode. Affects cookie attributes and error detail.
    #[serde(default)]
    pub production: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            production: false,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/villadesk.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Session store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Persist sessions in the SQLite database.
    Sqlite,
    /// Keep sessions in process memory (tests, development).
    Memory,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Store backend.
    #[serde(default = "default_session_backend")]
    pub backend: SessionBackend,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Sliding-window session lifetime in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub ttl_hours: u64,
    /// Interval between expired-session purge runs, in seconds.
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,
}

fn default_session_backend() -> SessionBackend {
    SessionBackend::Sqlite
}

fn default_cookie_name() -> String {
    "sessionId".to_string()
}

fn default_session_ttl_hours() -> u64 {
    24
}

fn default_purge_interval() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            cookie_name: default_cookie_name(),
            ttl_hours: default_session_ttl_hours(),
            purge_interval_secs: default_purge_interval(),
        }
    }
}

/// Credential source selection. Chosen once at startup, never per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSourceKind {
    /// Verify against the users table.
    Store,
    /// Verify against a single configured pair (environments without a store).
    Static,
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Which credential source to use.
    #[serde(default = "default_credential_source")]
    pub credential_source: CredentialSourceKind,
    /// Password for the seeded admin account on first run.
    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,
    /// Username for the static fallback source.
    #[serde(default)]
    pub static_username: String,
    /// Password for the static fallback source.
    #[serde(default)]
    pub static_password: String,
}

fn default_credential_source() -> CredentialSourceKind {
    CredentialSourceKind::Store
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credential_source: default_credential_source(),
            default_admin_password: default_admin_password(),
            static_username: String::new(),
            static_password: String::new(),
        }
    }
}

/// Static file and upload storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticConfig {
    /// Public site root (marketing pages, index.html).
    #[serde(default = "default_site_path")]
    pub site_path: String,
    /// Admin panel assets, served only to admitted requests.
    #[serde(default = "default_admin_path")]
    pub admin_path: String,
    /// Directory where uploaded property images are written.
    #[serde(default = "default_uploads_path")]
    pub uploads_path: String,
    /// Image reference used when a property is created without an upload.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_site_path() -> String {
    "site".to_string()
}

fn default_admin_path() -> String {
    "site/admin".to_string()
}

fn default_uploads_path() -> String {
    "data/uploads".to_string()
}

fn default_placeholder_image() -> String {
    "/assets/img/property-placeholder.jpg".to_string()
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            site_path: default_site_path(),
            admin_path: default_admin_path(),
            uploads_path: default_uploads_path(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

/// Access guard configuration.
///
/// The login page paths are configuration, not guard logic: every externally
/// reachable spelling must be listed here.
#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    /// Paths admitted regardless of session state (exact match).
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
    /// Path prefixes admitted regardless of session state.
    #[serde(default = "default_public_prefixes")]
    pub public_prefixes: Vec<String>,
    /// Where unauthenticated browser clients are sent.
    #[serde(default = "default_login_page")]
    pub login_page: String,
    /// Where authenticated admins land after login.
    #[serde(default = "default_dashboard_page")]
    pub dashboard_page: String,
}

fn default_public_paths() -> Vec<String> {
    vec!["/admin/login.html".to_string()]
}

fn default_public_prefixes() -> Vec<String> {
    vec![]
}

fn default_login_page() -> String {
    "/admin/login.html".to_string()
}

fn default_dashboard_page() -> String {
    "/admin/dashboard.html".to_string()
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            public_paths: default_public_paths(),
            public_prefixes: default_public_prefixes(),
            login_page: default_login_page(),
            dashboard_page: default_dashboard_page(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/villadesk.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Static file settings.
    #[serde(default, rename = "static")]
    pub static_files: StaticConfig,
    /// Access guard settings.
    #[serde(default)]
    pub guard: GuardConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VillaError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VillaError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `VILLADESK_DATABASE_PATH`: SQLite database path
    /// - `VILLADESK_ADMIN_PASSWORD`: first-run admin password
    /// - `VILLADESK_PRODUCTION`: "1" or "true" enables production mode
    /// - `PORT`: listen port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("VILLADESK_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
        if let Ok(password) = std::env::var("VILLADESK_ADMIN_PASSWORD") {
            if !password.is_empty() {
                self.auth.default_admin_password = password;
            }
        }
        if let Ok(flag) = std::env::var("VILLADESK_PRODUCTION") {
            self.server.production = flag == "1" || flag.eq_ignore_ascii_case("true");
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the static credential source is selected without a configured pair
    /// - the static credential source is selected in production mode
    pub fn validate(&self) -> Result<()> {
        if self.auth.credential_source == CredentialSourceKind::Static {
            if self.auth.static_username.is_empty() || self.auth.static_password.is_empty() {
                return Err(VillaError::Config(
                    "static credential source requires static_username and static_password"
                        .to_string(),
                ));
            }
            if self.server.production {
                return Err(VillaError::Config(
                    "static credential source is not allowed in production".to_string(),
                ));
            }
        }
        if self.session.ttl_hours == 0 {
            return Err(VillaError::Config(
                "session ttl_hours must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert!(!config.server.production);
        assert_eq!(config.session.cookie_name, "sessionId");
        assert_eq!(config.session.ttl_hours, 24);
        assert_eq!(config.auth.credential_source, CredentialSourceKind::Store);
        assert_eq!(config.guard.login_page, "/admin/login.html");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::parse(
            r#"
            [server]
            port = 8080
            production = true

            [session]
            backend = "memory"
            ttl_hours = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.server.production);
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.session.ttl_hours, 1);
        // Unspecified sections fall back to defaults
        assert_eq!(config.database.path, "data/villadesk.db");
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(Config::parse("[server\nport = ").is_err());
    }

    #[test]
    fn test_validate_static_source_requires_pair() {
        let mut config = Config::default();
        config.auth.credential_source = CredentialSourceKind::Static;
        assert!(config.validate().is_err());

        config.auth.static_username = "admin".to_string();
        config.auth.static_password = "letmein".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_static_source_rejected_in_production() {
        let mut config = Config::default();
        config.auth.credential_source = CredentialSourceKind::Static;
        config.auth.static_username = "admin".to_string();
        config.auth.static_password = "letmein".to_string();
        config.server.production = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_ttl() {
        let mut config = Config::default();
        config.session.ttl_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_guard_defaults_include_login_page() {
        let config = Config::default();
        assert!(config
            .guard
            .public_paths
            .contains(&"/admin/login.html".to_string()));
    }
}

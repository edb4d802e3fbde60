//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `tyrehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Longest accepted session lifetime: ten years.
const MAX_SESSION_TTL_HOURS: u32 = 87_600;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Sessions and the bootstrap admin account.
    pub auth: AuthConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Pool size for file databases. In-memory databases always use one.
    pub max_connections: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Authentication settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Lifetime of a login session.
    pub session_ttl_hours: u32,
    /// Display name of the bootstrap admin.
    pub admin_name: String,
    /// Email of the admin account created at startup, if any.
    pub admin_email: Option<String>,
    /// Password of that account. Set together with `admin_email`.
    pub admin_password: Option<String>,
}

/// Credentials of the admin account to make sure of at startup.
#[derive(Debug, PartialEq, Eq)]
pub struct AdminBootstrap<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl Config {
    /// Load configuration from `tyrehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("tyrehub.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("TYREHUB_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("TYREHUB_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("TYREHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("TYREHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("TYREHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(ttl) = var("TYREHUB_SESSION_TTL_HOURS").and_then(|val| val.parse().ok()) {
            self.auth.session_ttl_hours = ttl;
        }
        if let Some(val) = var("TYREHUB_ADMIN_EMAIL") {
            self.auth.admin_email = Some(val);
        }
        if let Some(val) = var("TYREHUB_ADMIN_PASSWORD") {
            self.auth.admin_password = Some(val);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.session_ttl_hours == 0 {
            return Err(ConfigError::Validation(
                "session_ttl_hours must be non-zero".to_string(),
            ));
        }
        if self.auth.session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(ConfigError::Validation(format!(
                "session_ttl_hours must be at most {MAX_SESSION_TTL_HOURS}"
            )));
        }
        if self.auth.admin_email.is_some() != self.auth.admin_password.is_some() {
            return Err(ConfigError::Validation(
                "admin_email and admin_password must be set together".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// The admin account to bootstrap, when one is configured.
    #[must_use]
    pub fn admin_bootstrap(&self) -> Option<AdminBootstrap<'_>> {
        match (&self.auth.admin_email, &self.auth.admin_password) {
            (Some(email), Some(password)) => Some(AdminBootstrap {
                name: &self.auth.admin_name,
                email,
                password,
            }),
            _ => None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:tyrehub.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "tyrehubd=info,tyrehub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: 24,
            admin_name: "Administrator".to_string(),
            admin_email: None,
            admin_password: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Empty means no document store; every repository serves fallback data.
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Send `Strict-Transport-Security`. Only enable behind TLS.
    #[serde(default)]
    pub hsts_enabled: bool,
}

/// Where the AppSettings document lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    /// Key of the settings document. `"app"` is only read when set here explicitly.
    #[serde(default = "default_document_key")]
    pub document_key: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            document_key: default_document_key(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout() -> u64 {
    5
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_run_migrations() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_document_key() -> String {
    domain::models::CANONICAL_SETTINGS_KEY.to_string()
}

const LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with ADMIN__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("ADMIN").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration from embedded defaults plus overrides.
    ///
    /// Does not touch the filesystem or the environment and skips validation,
    /// so integration tests can build partial configs.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            request_timeout_secs = 30

            [database]
            url = ""
            max_connections = 2
            min_connections = 0
            connect_timeout_secs = 1
            idle_timeout_secs = 60
            run_migrations = false

            [logging]
            level = "debug"
            format = "pretty"

            [security]
            cors_origins = []
            hsts_enabled = false

            [settings]
            document_key = "dashboard"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.settings.document_key.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "ADMIN__SETTINGS__DOCUMENT_KEY must not be empty".to_string(),
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "Unknown log format '{}', expected one of {:?}",
                self.logging.format, LOG_FORMATS
            )));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}

impl From<&DatabaseConfig> for persistence::db::DatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            connect_timeout_secs: config.connect_timeout_secs,
            idle_timeout_secs: config.idle_timeout_secs,
            run_migrations: config.run_migrations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_with_defaults() {
        let config = Config::load_for_test(&[]).expect("Failed to load config");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.database.url.is_empty());
        assert_eq!(config.settings.document_key, "dashboard");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::load_for_test(&[
            ("server.port", "9000"),
            ("logging.level", "warn"),
            ("settings.document_key", "app"),
        ])
        .expect("Failed to load config");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.settings.document_key, "app");
    }

    #[test]
    fn test_validation_rejects_empty_document_key() {
        let config = Config::load_for_test(&[("settings.document_key", " ")])
            .expect("Failed to load config");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("DOCUMENT_KEY"));
    }

    #[test]
    fn test_validation_rejects_unknown_log_format() {
        let config = Config::load_for_test(&[("logging.format", "xml")])
            .expect("Failed to load config");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        let config =
            Config::load_for_test(&[("server.port", "0")]).expect("Failed to load config");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_pool_settings() {
        let config = Config::load_for_test(&[
            ("database.min_connections", "10"),
            ("database.max_connections", "2"),
        ])
        .expect("Failed to load config");

        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("min_connections"));
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::load_for_test(&[("server.port", "3000")])
            .expect("Failed to load config");
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");

        let bad = Config::load_for_test(&[("server.host", "not a host")])
            .expect("Failed to load config");
        assert!(bad.socket_addr().is_err());
    }

    #[test]
    fn test_database_config_conversion() {
        let config = Config::load_for_test(&[("database.url", "postgres://localhost/admin")])
            .expect("Failed to load config");
        let db: persistence::db::DatabaseConfig = (&config.database).into();
        assert_eq!(db.url, "postgres://localhost/admin");
        assert!(!db.run_migrations);
        assert_eq!(db.max_connections, 2);
    }
}

//! Configuration for the nodegate server.

use config::ConfigError;
use serde::Deserialize;

use nodegate_graph::GraphConfig;

/// Top-level server configuration.
///
/// Loaded from `nodegate.toml` or `NODEGATE__` environment variables
/// (e.g. `NODEGATE__NEO4J__URI`, `NODEGATE__AUTH__TOKEN`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Graph engine connection.
    pub neo4j: GraphConfig,

    /// HTTP listener.
    pub server: ServerConfig,

    /// Bearer token guarding the segment routes.
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind (default: "127.0.0.1:8000").
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret compared against `Authorization: Bearer <token>`.
    pub token: String,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_token() -> String {
    "secret".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
        }
    }
}

impl AppConfig {
    /// Layer the optional config file under environment overrides.
    ///
    /// Environment values stay strings so secrets like `007` survive
    /// intact; numeric fields are converted on deserialize.
    pub fn load(file_prefix: &str) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("NODEGATE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Self::from_config(cfg)
    }

    fn from_config(cfg: config::Config) -> Result<Self, ConfigError> {
        let app: AppConfig = cfg.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token.is_empty() {
            return Err(ConfigError::Message(
                "auth.token must not be empty".to_string(),
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
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.auth.token, "secret");
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j.user, "neo4j");
        assert_eq!(config.neo4j.max_connections, 16);
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let cfg = config::Config::builder()
            .set_override("neo4j.uri", "bolt://graph:7687")
            .unwrap()
            .set_override("auth.token", "12345")
            .unwrap()
            .build()
            .unwrap();

        let config = AppConfig::from_config(cfg).unwrap();
        assert_eq!(config.neo4j.uri, "bolt://graph:7687");
        assert_eq!(config.neo4j.password, "password");
        assert_eq!(config.auth.token, "12345");
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_numeric_looking_secrets_stay_verbatim() {
        std::env::set_var("NODEGATE__AUTH__TOKEN", "007");
        std::env::set_var("NODEGATE__NEO4J__PASSWORD", "1.50");
        std::env::set_var("NODEGATE__NEO4J__MAX_CONNECTIONS", "4");

        let loaded = AppConfig::load("nodegate-test-missing-file");

        std::env::remove_var("NODEGATE__AUTH__TOKEN");
        std::env::remove_var("NODEGATE__NEO4J__PASSWORD");
        std::env::remove_var("NODEGATE__NEO4J__MAX_CONNECTIONS");

        let config = loaded.unwrap();
        assert_eq!(config.auth.token, "007");
        assert_eq!(config.neo4j.password, "1.50");
        assert_eq!(config.neo4j.max_connections, 4);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let cfg = config::Config::builder()
            .set_override("auth.token", "")
            .unwrap()
            .build()
            .unwrap();

        assert!(AppConfig::from_config(cfg).is_err());
    }
}

mod sources;

pub use sources::{EnvConfig, FileConfig};

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Fully resolved runtime configuration.
///
/// Resolution order, later wins: built-in defaults, TOML file, environment.
/// CLI flags are applied on top by the binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path of the JSON catalog file.
    pub file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                file: PathBuf::from("movies.json"),
            },
        }
    }
}

impl Config {
    /// Merge an optional file config and the environment over the defaults.
    pub fn resolve(file: Option<FileConfig>, env: EnvConfig) -> Self {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(host) = file.server.host {
                config.server.host = host;
            }
            if let Some(port) = file.server.port {
                config.server.port = port;
            }
            if let Some(origins) = file.cors.allowed_origins {
                config.cors.allowed_origins = origins;
            }
            if let Some(path) = file.database.file {
                config.database.file = path;
            }
        }

        if let Some(host) = env.server_host {
            config.server.host = host;
        }
        if let Some(port) = env.server_port {
            config.server.port = port;
        }
        if let Some(origins) = env.cors_allowed_origins {
            config.cors.allowed_origins = origins;
        }
        if let Some(path) = env.database_file {
            config.database.file = path;
        }

        config
    }

    /// Read and parse a TOML configuration file.
    pub fn load_file(path: &Path) -> anyhow::Result<FileConfig> {
        let text = std::fs::read_to_string(path).with_context(|| {
            format!("failed to read config file {}", path.display())
        })?;
        toml::from_str(&text).with_context(|| {
            format!("failed to parse config file {}", path.display())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.database.file, PathBuf::from("movies.json"));
    }

    #[test]
    fn environment_wins_over_file() {
        let file: FileConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            file = "catalog.json"
            "#,
        )
        .unwrap();

        let env = EnvConfig {
            server_port: Some(9100),
            ..EnvConfig::default()
        };

        let config = Config::resolve(Some(file), env);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.file, PathBuf::from("catalog.json"));
    }
}

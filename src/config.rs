//! Configuration loaded from environment variables, with defaults for local development

use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Location of the data files read at startup
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub clubs_path: PathBuf,
    pub competitions_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: var("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5000),
            },
            data: DataConfig {
                clubs_path: var("CLUBS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("data/clubs.json")),
                competitions_path: var("COMPETITIONS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("data/competitions.json")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(|_| None);

        assert_that!(config.server.host.as_str()).is_equal_to("127.0.0.1");
        assert_that!(config.server.port).is_equal_to(5000);
        assert_that!(config.data.clubs_path).is_equal_to(PathBuf::from("data/clubs.json"));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("COMPETITIONS_PATH", "/srv/competitions.json"),
        ]);

        let config = Config::from_vars(|key| vars.get(key).map(|value| value.to_string()));

        assert_that!(config.server.port).is_equal_to(8080);
        assert_that!(config.server.host.as_str()).is_equal_to("0.0.0.0");
        assert_that!(config.data.competitions_path)
            .is_equal_to(PathBuf::from("/srv/competitions.json"));
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = Config::from_vars(|key| (key == "PORT").then(|| "http".to_string()));

        assert_that!(config.server.port).is_equal_to(5000);
    }
}

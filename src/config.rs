use std::env;
use std::net::IpAddr;
use std::sync::OnceLock;
use thiserror::Error;

/// Port used when `ARTICLES_PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the articles server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub host: IpAddr,
    /// TCP port the HTTP listener binds to.
    pub port: u16,
    /// Optional path of a file that receives a copy of the logs.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(load_env_optional)
    }

    /// Build a configuration from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: parse_optional(lookup("ARTICLES_HOST"), "ARTICLES_HOST")?
                .unwrap_or(defaults.host),
            port: parse_optional(lookup("ARTICLES_PORT"), "ARTICLES_PORT")?
                .unwrap_or(defaults.port),
            log_file: lookup("ARTICLES_LOG_FILE"),
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, host: Option<IpAddr>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

fn parse_optional<T: std::str::FromStr>(
    value: Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load configuration from the environment (and `.env`), apply overrides, and cache it.
pub fn init_config(
    host: Option<IpAddr>,
    port: Option<u16>,
) -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?.with_overrides(host, port);
    Ok(CONFIG.get_or_init(|| config))
}

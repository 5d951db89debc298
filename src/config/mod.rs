use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::language::Language;

pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-in-production";
pub const DEFAULT_API_BASE: &str =
    "https://{lang}.wikipedia.org/api/rest_v1/feed/onthisday/{type}/{month}/{day}";
pub const DEFAULT_USER_AGENT: &str = "EphemeridesApp/1.0 (Educational Project)";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

// Top-level container for every setting
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub wikipedia: WikipediaConfig,
    pub assets: AssetsConfig,
}

// Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub rust_log: String,
    pub log_json: bool,
    pub secret_key: String,
    pub default_language: Language,
}

// Remote event source
#[derive(Debug, Clone, Deserialize)]
pub struct WikipediaConfig {
    pub api_base: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

// On-disk front-end files
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    pub translations_dir: PathBuf,
    pub static_dir: PathBuf,
    pub templates_dir: PathBuf,
}

impl AppConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl WikipediaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, so tests do not
    /// have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let debug = parse(&lookup, "DEBUG", true, "boolean")?;
        let default_log = if debug {
            "ephemerides=debug,tower_http=debug"
        } else {
            "ephemerides=info,tower_http=info"
        };

        Ok(Config {
            app: AppConfig {
                host: var("HOST", "0.0.0.0"),
                port: parse(&lookup, "PORT", 5000, "port number")?,
                debug,
                rust_log: var("RUST_LOG", default_log),
                log_json: var("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
                secret_key: var("SECRET_KEY", DEFAULT_SECRET_KEY),
                default_language: parse(&lookup, "DEFAULT_LANGUAGE", Language::default(), "language code")?,
            },
            wikipedia: WikipediaConfig {
                api_base: var("WIKIPEDIA_API_BASE", DEFAULT_API_BASE),
                user_agent: var("WIKIPEDIA_USER_AGENT", DEFAULT_USER_AGENT),
                timeout_seconds: parse(&lookup, "WIKIPEDIA_TIMEOUT_SECONDS", 10, "number of seconds")?,
            },
            assets: AssetsConfig {
                translations_dir: var("TRANSLATIONS_DIR", "translations").into(),
                static_dir: var("STATIC_DIR", "static").into(),
                templates_dir: var("TEMPLATES_DIR", "templates").into(),
            },
        })
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}

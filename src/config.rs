use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Runtime configuration, read from the environment (and `.env` via dotenvy)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Root directory for uploaded images, served under `/uploads`
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Bearer tokens accepted on admin routes
    pub api_tokens: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let api_tokens = parse_tokens(&env::var("API_TOKENS").unwrap_or_default());
        if api_tokens.is_empty() {
            warn!("API_TOKENS not set; admin routes will reject every request");
        }

        Ok(Self {
            database_url,
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:5000")?,
            upload_dir: try_load("UPLOAD_DIR", "uploads")?,
            max_upload_bytes: try_load("MAX_UPLOAD_BYTES", "10485760")?,
            api_tokens,
        })
    }
}

/// Split a comma-separated token list, dropping blanks
pub fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(parse_tokens("a, b ,,c"), vec!["a", "b", "c"]);
        assert!(parse_tokens("").is_empty());
        assert!(parse_tokens(" , ").is_empty());
    }
}

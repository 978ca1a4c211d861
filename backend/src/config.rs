use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_GAME_ADDR: &str = "127.0.0.1:20000";
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_LOG_DIR: &str = "./logs";

pub const GAME_ADDR_VAR: &str = "GOMOKU_ADDR";
pub const HTTP_ADDR_VAR: &str = "GOMOKU_HTTP_ADDR";
pub const LOG_DIR_VAR: &str = "GOMOKU_LOG_DIR";

#[derive(Error, Debug)]
#[error("{var} is not a valid socket address: {value:?}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    #[source]
    source: AddrParseError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub game_addr: SocketAddr,
    pub http_addr: SocketAddr,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(ServerConfig {
            game_addr: parse_addr(&lookup, GAME_ADDR_VAR, DEFAULT_GAME_ADDR)?,
            http_addr: parse_addr(&lookup, HTTP_ADDR_VAR, DEFAULT_HTTP_ADDR)?,
            log_dir: lookup(LOG_DIR_VAR)
                .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
                .into(),
        })
    }
}

fn parse_addr<F>(lookup: &F, var: &'static str, default: &str) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError { var, value, source })
}

use std::env;
use std::net::IpAddr;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Listener settings from `BACKEND_HOST` / `BACKEND_PORT`, plus the reverse
/// proxies listed in `TRUSTED_PROXIES` (comma-separated IPs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub trusted_proxies: Vec<IpAddr>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };
        let trusted_proxies = match lookup("TRUSTED_PROXIES") {
            Some(raw) => parse_proxies(&raw)?,
            None => Vec::new(),
        };
        Ok(Self {
            host,
            port,
            trusted_proxies,
        })
    }
}

fn parse_proxies(raw: &str) -> Result<Vec<IpAddr>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse::<IpAddr>().map_err(|_| {
                AppError::config(format!("TRUSTED_PROXIES entry '{entry}' is not an IP address"))
            })
        })
        .collect()
}

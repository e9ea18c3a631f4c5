// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// Default token lifetime: 7 days
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 24 * 7;

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Secret key used to sign session tokens. No default: a process
    /// without a secret must not start.
    #[serde(default)]
    pub token_secret: String,
    /// Token TTL in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Password requirements
    #[serde(default)]
    pub password_requirements: PasswordRequirements,
}

/// Password complexity requirements
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordRequirements {
    /// Minimum password length
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Require uppercase letters
    #[serde(default = "default_true")]
    pub require_uppercase: bool,
    /// Require lowercase letters
    #[serde(default = "default_true")]
    pub require_lowercase: bool,
    /// Require digits
    #[serde(default = "default_true")]
    pub require_digit: bool,
    /// Require special characters
    #[serde(default)]
    pub require_special: bool,
}

fn default_bind_addr() -> SocketAddr {
    "127.0.0.1:3000".parse().unwrap()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_min_length() -> usize {
    6
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            log_level: default_log_level(),
            token_secret: String::new(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: false,
        }
    }
}

impl Settings {
    /// Load settings from `signet.toml` and `SIGNET_`-prefixed
    /// environment variables, the latter taking precedence.
    pub fn load() -> Result<Self> {
        Self::load_from("signet.toml")
    }

    /// Load settings from an explicit config file path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SIGNET_"))
            .extract()?;
        Ok(settings)
    }
}

// src/config.rs

use std::{env, fmt};

use dotenvy::dotenv;

use crate::evaluation::DuplicatePolicy;

/// Role whose members are evaluated unless configured otherwise.
pub const DEFAULT_EVALUATION_ROLE: &str = "peternak";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,
    pub log_dir: String,
    /// Members with this role make up the evaluated population.
    pub evaluation_role: String,
    /// Default choice between duplicate submissions of one member.
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "invalid {}: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => 3000,
        };

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        let evaluation_role = lookup("EVALUATION_ROLE")
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EVALUATION_ROLE.to_string());

        let duplicate_policy = match lookup("DUPLICATE_POLICY") {
            Some(raw) => raw
                .parse::<DuplicatePolicy>()
                .map_err(|reason| ConfigError::Invalid {
                    key: "DUPLICATE_POLICY",
                    reason,
                })?,
            None => DuplicatePolicy::default(),
        };

        Ok(Self {
            database_url,
            rust_log,
            port,
            log_dir,
            evaluation_role,
            duplicate_policy,
        })
    }
}

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::modules::directory::DirectoryConfig;
use crate::{DEFAULT_DATA_FILE, DEFAULT_HASH_ITERATIONS, DEFAULT_LOG_FILE};

/// Runtime configuration for the portal binary
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub hash_iterations: u32,
    pub seed_demo_accounts: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            seed_demo_accounts: true,
        }
    }
}

impl PortalConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any variable lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_file = lookup("PORTAL_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);
        let log_file = lookup("PORTAL_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let hash_iterations = match lookup("PORTAL_HASH_ITERATIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(ConfigError::InvalidHashIterations(raw)),
            },
            None => defaults.hash_iterations,
        };

        let seed_demo_accounts = match lookup("PORTAL_SEED_DEMO") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                key: "PORTAL_SEED_DEMO",
                value: raw,
            })?,
            None => defaults.seed_demo_accounts,
        };

        Ok(Self {
            data_file,
            log_file,
            hash_iterations,
            seed_demo_accounts,
        })
    }

    /// Settings handed to the account directory
    pub fn directory(&self) -> DirectoryConfig {
        DirectoryConfig {
            hash_iterations: self.hash_iterations,
            seed_demo_accounts: self.seed_demo_accounts,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Errors raised while reading configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidHashIterations(String),
    InvalidFlag { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHashIterations(value) => write!(
                f,
                "PORTAL_HASH_ITERATIONS must be a positive integer, got '{}'",
                value
            ),
            ConfigError::InvalidFlag { key, value } => {
                write!(f, "{} must be true or false, got '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

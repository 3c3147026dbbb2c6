//! Runtime configuration loaded from the environment.
//!
//! Required values fail startup with a typed error; no fallback identifiers
//! are ever substituted for missing configuration.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Database connection string.
const DATABASE_URL: &str = "DATABASE_URL";
/// Capacity of the in-process hand-off channel.
const HANDOFF_QUEUE_CAPACITY: &str = "HANDOFF_QUEUE_CAPACITY";
/// Base URL of the managed agent runtime.
const AGENT_RUNTIME_ENDPOINT: &str = "AGENT_RUNTIME_ENDPOINT";
/// Identifier of the agent runtime to invoke.
const AGENT_RUNTIME_ID: &str = "AGENT_RUNTIME_ID";
/// Timeout for one agent invocation, in seconds.
const AGENT_TIMEOUT_SECS: &str = "AGENT_TIMEOUT_SECS";

const DEFAULT_QUEUE_CAPACITY: usize = 64;
const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 120;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    /// An environment variable holds an unparseable value.
    #[error("environment variable {name} is invalid: {reason}")]
    Invalid {
        /// Name of the offending variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Connection settings for the managed agent runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRuntimeConfig {
    /// Base URL of the runtime service.
    pub endpoint: String,
    /// Identifier of the runtime to invoke.
    pub runtime_id: String,
    /// Timeout applied to one invocation.
    pub timeout: Duration,
}

/// Full service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `PostgreSQL` connection string for the task store.
    pub database_url: String,
    /// Capacity of the in-process hand-off channel.
    pub queue_capacity: usize,
    /// Agent runtime connection settings.
    pub agent: AgentRuntimeConfig,
}

impl ServiceConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when a required variable is unset
    /// or empty, and [`ConfigError::Invalid`] when a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require(DATABASE_URL)?,
            queue_capacity: parse_or(HANDOFF_QUEUE_CAPACITY, DEFAULT_QUEUE_CAPACITY)?,
            agent: AgentRuntimeConfig {
                endpoint: require(AGENT_RUNTIME_ENDPOINT)?,
                runtime_id: require(AGENT_RUNTIME_ID)?,
                timeout: Duration::from_secs(parse_or(
                    AGENT_TIMEOUT_SECS,
                    DEFAULT_AGENT_TIMEOUT_SECS,
                )?),
            },
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

fn parse_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    std::env::var(name).ok().map_or(Ok(default), |raw| {
        raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            name,
            reason: err.to_string(),
        })
    })
}

//! Service configuration loading.
//!
//! Layers, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. A YAML file, when one is given
//! 3. `HARDLY_*` environment variables (`__` separates nested keys)
//! 4. The bare `PROJECT` variable naming the deployment

use crate::sync::domain::{SyncDomainError, TargetRule};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Prefix of the environment variables read by [`ConfigLoader`].
pub const ENV_PREFIX: &str = "HARDLY_";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The layered sources could not be merged or deserialized.
    #[error("failed to extract configuration: {0}")]
    Extract(Box<figment::Error>),

    /// A merge-request target pattern is invalid.
    #[error(transparent)]
    InvalidTarget(#[from] SyncDomainError),

    /// The log level is not one of `trace`, `debug`, `info`, `warn`, `error`.
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level; `RUST_LOG` directives take precedence.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Json,
        }
    }
}

/// A merge-request target the service handles, as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRuleConfig {
    /// Pattern for `namespace/name` of the targeted repository.
    #[serde(default)]
    pub repo: Option<String>,
    /// Pattern for the targeted branch.
    #[serde(default)]
    pub branch: Option<String>,
}

/// Service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Handled targets; empty means every target is handled.
    pub merge_request_targets_handled: Vec<TargetRuleConfig>,
    /// Deployment project name (`stream-prod`, `fedora-source-git`, ...).
    pub project: String,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Compiles the configured targets into rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTarget`] for an invalid pattern.
    pub fn target_rules(&self) -> Result<Vec<TargetRule>, ConfigError> {
        self.merge_request_targets_handled
            .iter()
            .map(|target| {
                TargetRule::new(target.repo.as_deref(), target.branch.as_deref())
                    .map_err(ConfigError::from)
            })
            .collect()
    }
}

/// Loads [`ServiceConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Builds the layered configuration sources.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(ServiceConfig::default()));
        if let Some(file) = path {
            figment = figment.merge(Yaml::file(file));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["PROJECT"]))
    }

    /// Loads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn load(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
        let config: ServiceConfig = Self::figment(path).extract()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown log level or an invalid
    /// target pattern.
    pub fn validate(config: &ServiceConfig) -> Result<(), ConfigError> {
        if config.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        config.target_rules()?;
        Ok(())
    }
}

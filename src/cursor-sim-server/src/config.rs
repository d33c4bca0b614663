//! Server configuration: lifecycle mode, seed/corpus paths, generation
//! knobs, and the ambient auth/logging settings.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub use cursor_sim_seed::Velocity;

/// Lifecycle mode: generate a corpus at startup, or load one from disk
/// and serve it read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Runtime,
    Replay,
}

/// Authentication configuration: a single static credential.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// When `None`, any non-empty bearer/basic credential is accepted.
    /// When `Some`, the presented credential must match exactly.
    pub static_credential: Option<String>,
}

/// Logging configuration, mirrored 1:1 onto the CLI flags in `main.rs`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

/// Fully validated server configuration, assembled from CLI args (see
/// `main.rs::Args`) by [`ServerConfig::try_from_args`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub mode: Mode,
    pub seed_path: Option<PathBuf>,
    pub corpus_path: Option<PathBuf>,
    /// Where to persist the generated corpus after a runtime-mode run,
    /// so a later process can replay it.
    pub corpus_out_path: Option<PathBuf>,
    pub port: u16,
    pub days: u32,
    pub velocity: Velocity,
    pub max_commits: u64,
    pub prng_seed: Option<u64>,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mode=runtime requires --seed")]
    RuntimeMissingSeed,
    #[error("mode=replay requires --corpus")]
    ReplayMissingCorpus,
    #[error("port must be in 1..=65535, got {0}")]
    InvalidPort(u32),
    #[error("days must be > 0 in runtime mode")]
    NonPositiveDays,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            Mode::Runtime => {
                if self.seed_path.is_none() {
                    return Err(ConfigError::RuntimeMissingSeed);
                }
                if self.days == 0 {
                    return Err(ConfigError::NonPositiveDays);
                }
            }
            Mode::Replay => {
                if self.corpus_path.is_none() {
                    return Err(ConfigError::ReplayMissingCorpus);
                }
            }
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(0));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ServerConfig {
        ServerConfig {
            mode: Mode::Runtime,
            seed_path: Some("seed.json".into()),
            corpus_path: None,
            corpus_out_path: None,
            port: 8080,
            days: 30,
            velocity: Velocity::Medium,
            max_commits: 0,
            prng_seed: Some(42),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn runtime_mode_requires_a_seed_path() {
        let mut config = base();
        config.seed_path = None;
        assert_eq!(config.validate(), Err(ConfigError::RuntimeMissingSeed));
    }

    #[test]
    fn replay_mode_requires_a_corpus_path() {
        let mut config = base();
        config.mode = Mode::Replay;
        assert_eq!(config.validate(), Err(ConfigError::ReplayMissingCorpus));
    }

    #[test]
    fn zero_days_is_rejected_in_runtime_mode() {
        let mut config = base();
        config.days = 0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveDays));
    }

    #[test]
    fn well_formed_config_validates() {
        assert!(base().validate().is_ok());
    }
}

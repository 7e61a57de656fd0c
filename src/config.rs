//! Configuration management for the relay
//!
//! The `Config` struct holds every setting the relay needs. It is loaded with
//! the `figment` crate by layering built-in defaults, an optional TOML file,
//! the process environment and finally command-line arguments.

use crate::cli::Cli;
use crate::formatting::TimeZoneSetting;
use crate::relay::FailurePolicy;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Environment variables read without a prefix, as the deployment sets them.
const RAW_ENV_KEYS: [&str; 3] = ["TOPIC_BASE", "SUBJECT_BASE", "REGION"];

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Prefix of every destination channel; the sensor id is appended.
    pub topic_base: String,
    /// Prefix of every message subject; the sensor id is appended.
    pub subject_base: String,
    /// Region of the notification service.
    pub region: String,
    /// The logging level for the application.
    pub log_level: String,
    /// Behaviour when a record of a batch fails.
    pub failure_policy: FailurePolicy,
    /// Time zone used to render event timestamps.
    pub time_zone: TimeZoneSetting,
}

impl Config {
    /// Builds the layered configuration sources without extracting them.
    pub fn figment(cli: &Cli) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::raw().only(&RAW_ENV_KEYS))
            // e.g., RELAY_FAILURE_POLICY=abort
            .merge(Env::prefixed("RELAY_"))
            .merge(cli)
    }

    /// Loads the application configuration.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config: Config = Self::figment(cli).extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic_base: String::new(),
            subject_base: String::new(),
            region: "us-east-1".to_string(),
            log_level: "info".to_string(),
            failure_policy: FailurePolicy::Isolate,
            time_zone: TimeZoneSetting::Local,
        }
    }
}

//! Command-Line Interface (CLI) argument parsing.
//!
//! Arguments are parsed at startup and merged on top of the configuration
//! file and environment variables, so a flag always wins.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Relays sensor deviation records to per-sensor notification topics.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Prefix of destination topics; the sensor id is appended.
    #[arg(long, value_name = "PREFIX")]
    pub topic_base: Option<String>,

    /// Prefix of message subjects; the sensor id is appended.
    #[arg(long, value_name = "PREFIX")]
    pub subject_base: Option<String>,

    /// Region of the notification service.
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// What to do when a record fails: `isolate` or `abort`.
    #[arg(long, value_name = "POLICY")]
    pub failure_policy: Option<String>,

    /// Time zone for rendered timestamps: `local`, `utc` or an offset like `+02:00`.
    #[arg(long, value_name = "ZONE")]
    pub time_zone: Option<String>,

    /// Log level filter (overridden by RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log notifications instead of publishing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Process a local file, one record per line, instead of serving Lambda invocations.
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        let overrides = [
            ("topic_base", &self.topic_base),
            ("subject_base", &self.subject_base),
            ("region", &self.region),
            ("failure_policy", &self.failure_policy),
            ("time_zone", &self.time_zone),
            ("log_level", &self.log_level),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                dict.insert(key.into(), Value::from(value.clone()));
            }
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}

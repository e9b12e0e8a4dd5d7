//! Monitor configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix, e.g. `MONITOR_REPORT_EVERY=5`
pub const ENV_PREFIX: &str = "MONITOR";

/// Monitor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Identifier attached to every log event
    #[serde(default = "default_boiler_id")]
    pub boiler_id: String,

    /// Telemetry source: a file path, or "-" for stdin
    #[serde(default = "default_input")]
    pub input: String,

    /// Optional analytics configuration file
    #[serde(default)]
    pub analytics_config: Option<PathBuf>,

    /// Run the full analysis every N accepted samples
    #[serde(default = "default_report_every")]
    pub report_every: u64,

    /// Seed for the economizer noise term; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_boiler_id() -> String {
    std::env::var("BOILER_ID").unwrap_or_else(|_| "unknown".to_string())
}

fn default_input() -> String {
    "-".to_string()
}

fn default_report_every() -> u64 {
    1
}

impl MonitorConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        Self::from_env(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()?;

        let mut loaded: MonitorConfig = config.try_deserialize()?;
        loaded.report_every = loaded.report_every.max(1);
        Ok(loaded)
    }

    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}

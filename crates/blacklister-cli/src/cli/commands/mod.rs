//! Command implementations.

pub mod blacklist;
pub mod config;

use blacklister_client::BlacklistClient;
use blacklister_core::BackendConfig;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration, environment overrides applied
    pub config: Config,

    /// Where the configuration was looked for
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,

    /// Echo raw response bodies
    pub debug: bool,

    /// Whether to explain requests before sending them
    pub explain: bool,
}

impl Context {
    /// Backend configurations, built once per run
    pub fn backends(&self) -> Vec<BackendConfig> {
        self.config.backends()
    }

    /// Create a client with the configured endpoints and timeout.
    pub fn client(&self) -> anyhow::Result<BlacklistClient> {
        let client = BlacklistClient::builder()
            .endpoints(self.config.endpoints())
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .capture_body(self.debug)
            .build()?;
        Ok(client)
    }
}

//! Configuration management.

use anyhow::{Context as _, Result};
use blacklister_client::Endpoints;
use blacklister_core::{BackendConfig, BackendCredentials, DEFAULT_DOME9_TTL};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output::OutputFormat;

/// Environment variables that override credentials from the file.
pub const ENV_DOME9_USER: &str = "BLACKLISTER_DOME9_USER";
pub const ENV_DOME9_API_KEY: &str = "BLACKLISTER_DOME9_API_KEY";
pub const ENV_CLOUDFLARE_EMAIL: &str = "BLACKLISTER_CLOUDFLARE_EMAIL";
pub const ENV_CLOUDFLARE_API_KEY: &str = "BLACKLISTER_CLOUDFLARE_API_KEY";

const EXAMPLE_CONFIG: &str = r#"# blacklister configuration
#
# You can configure either Cloudflare or Dome9 or both.

# Per-request timeout in seconds
timeout_secs = 30

# Default output format: pretty, json, yaml or csv
# output_format = "pretty"

[dome9]
enabled = true
# Your Dome9 username (eg. user@email.com)
username = ""
# Your Dome9 API key (https://secure.dome9.com/settings under API Key)
api_key = ""
# Seconds until blacklist items auto-expire; 0 for permanent blacklisting
ttl = 86400

[cloudflare]
enabled = true
# Your Cloudflare account email (eg. user@email.com)
email = ""
# Your Cloudflare global API key
api_key = ""
"#;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Dome9 settings.
    pub dome9: Dome9Section,

    /// Cloudflare settings.
    pub cloudflare: CloudflareSection,
}

/// `[dome9]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Dome9Section {
    pub enabled: bool,
    pub username: String,
    pub api_key: String,
    /// Blacklist expiry in seconds; 0 is permanent.
    pub ttl: u64,
    /// Alternate API URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// `[cloudflare]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CloudflareSection {
    pub enabled: bool,
    pub email: String,
    pub api_key: String,
    /// Alternate API URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            output_format: None,
            dome9: Dome9Section::default(),
            cloudflare: CloudflareSection::default(),
        }
    }
}

impl Default for Dome9Section {
    fn default() -> Self {
        Self {
            enabled: true,
            username: String::new(),
            api_key: String::new(),
            ttl: DEFAULT_DOME9_TTL,
            endpoint: None,
        }
    }
}

impl Default for CloudflareSection {
    fn default() -> Self {
        Self {
            enabled: true,
            email: String::new(),
            api_key: String::new(),
            endpoint: None,
        }
    }
}

impl Config {
    /// Resolve the config file path: an explicit path, or the platform default.
    pub fn path(explicit: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(PathBuf::from(shellexpand::tilde(path).as_ref()));
        }

        let dirs = ProjectDirs::from("com", "securitygeneration", "blacklister")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() {
            if explicit {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse TOML configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }
        Ok(config)
    }

    /// Apply credential overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply credential overrides from a lookup function; blank values are ignored.
    #[must_use]
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_DOME9_USER) {
            self.dome9.username = v;
        }
        if let Some(v) = get(ENV_DOME9_API_KEY) {
            self.dome9.api_key = v;
        }
        if let Some(v) = get(ENV_CLOUDFLARE_EMAIL) {
            self.cloudflare.email = v;
        }
        if let Some(v) = get(ENV_CLOUDFLARE_API_KEY) {
            self.cloudflare.api_key = v;
        }
        self
    }

    /// Backend configurations, Dome9 first.
    pub fn backends(&self) -> Vec<BackendConfig> {
        vec![
            BackendConfig::dome9(
                self.dome9.enabled,
                BackendCredentials::new(&self.dome9.username, &self.dome9.api_key),
                self.dome9.ttl,
            ),
            BackendConfig::cloudflare(
                self.cloudflare.enabled,
                BackendCredentials::new(&self.cloudflare.email, &self.cloudflare.api_key),
            ),
        ]
    }

    /// API endpoints, with any overrides from the file.
    pub fn endpoints(&self) -> Endpoints {
        let mut endpoints = Endpoints::default();
        if let Some(url) = &self.dome9.endpoint {
            endpoints = endpoints.dome9(url);
        }
        if let Some(url) = &self.cloudflare.endpoint {
            endpoints = endpoints.cloudflare(url);
        }
        endpoints
    }

    /// Annotated example configuration.
    pub const fn example() -> &'static str {
        EXAMPLE_CONFIG
    }
}

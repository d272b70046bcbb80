//! Endpoint configuration.

use blacklister_core::{BackendKind, BlacklistError, Result};
use url::Url;

/// Dome9 blacklist items endpoint
pub const DOME9_BLACKLIST_URL: &str = "https://api.dome9.com/v1/blacklist/Items/";

/// Cloudflare user-level firewall access rules endpoint
pub const CLOUDFLARE_ACCESS_RULES_URL: &str =
    "https://api.cloudflare.com/client/v4/user/firewall/access_rules/rules";

/// Where each backend's requests are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Dome9 blacklist URL
    pub dome9: String,

    /// Cloudflare access rules URL
    pub cloudflare: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dome9: DOME9_BLACKLIST_URL.to_string(),
            cloudflare: CLOUDFLARE_ACCESS_RULES_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Endpoints of the real services
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the Dome9 URL
    #[must_use]
    pub fn dome9(mut self, url: impl Into<String>) -> Self {
        self.dome9 = url.into();
        self
    }

    /// Override the Cloudflare URL
    #[must_use]
    pub fn cloudflare(mut self, url: impl Into<String>) -> Self {
        self.cloudflare = url.into();
        self
    }

    /// Configured URL for a backend
    #[must_use]
    pub fn get(&self, backend: BackendKind) -> &str {
        match backend {
            BackendKind::Dome9 => self.dome9.as_str(),
            BackendKind::Cloudflare => self.cloudflare.as_str(),
        }
    }

    /// Parse the URL for a backend
    pub(crate) fn parse(&self, backend: BackendKind) -> Result<Url> {
        let raw = self.get(backend);
        let url = Url::parse(raw).map_err(|e| BlacklistError::InvalidUrl {
            backend,
            message: format!("{raw}: {e}"),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(BlacklistError::InvalidUrl {
                backend,
                message: format!("{raw}: unsupported scheme `{other}`"),
            }),
        }
    }
}

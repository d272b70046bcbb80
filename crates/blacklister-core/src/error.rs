use thiserror::Error;

use crate::types::BackendKind;

/// Result type alias for client construction
pub type Result<T> = std::result::Result<T, BlacklistError>;

/// Configuration problems caught before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Every backend is disabled
    #[error("no backend selected: enable Dome9, Cloudflare or both")]
    NoBackendSelected,

    /// A backend is enabled but its identity or API key is blank
    #[error("configured to use {backend} but the {backend} {label} or API key is not set", label = .backend.identity_label())]
    MissingCredentials {
        /// Backend with the incomplete credential pair
        backend: BackendKind,
    },
}

impl ConfigError {
    /// Remediation hint for the operator
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::NoBackendSelected => {
                "Set `enabled = true` under [dome9] or [cloudflare] in the config file."
            }
            Self::MissingCredentials {
                backend: BackendKind::Dome9,
            } => {
                "Set `username` and `api_key` under [dome9] (API key: https://secure.dome9.com/settings) \
                 or export BLACKLISTER_DOME9_USER / BLACKLISTER_DOME9_API_KEY."
            }
            Self::MissingCredentials {
                backend: BackendKind::Cloudflare,
            } => {
                "Set `email` and `api_key` under [cloudflare] (API key: https://dash.cloudflare.com/profile/api-tokens) \
                 or export BLACKLISTER_CLOUDFLARE_EMAIL / BLACKLISTER_CLOUDFLARE_API_KEY."
            }
        }
    }

    /// Backend named by the error, if any
    #[must_use]
    pub const fn backend(&self) -> Option<BackendKind> {
        match self {
            Self::NoBackendSelected => None,
            Self::MissingCredentials { backend } => Some(*backend),
        }
    }
}

/// Errors raised while setting up the HTTP client
#[derive(Error, Debug)]
pub enum BlacklistError {
    /// Endpoint URL could not be parsed
    #[error("invalid URL for {backend}: {message}")]
    InvalidUrl {
        /// Backend the endpoint belongs to
        backend: BackendKind,
        /// Parser message
        message: String,
    },

    /// The underlying HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Http(String),
}

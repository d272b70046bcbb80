use serde::{Deserialize, Serialize};

/// Dome9 default blacklist expiry, 24 hours
pub const DEFAULT_DOME9_TTL: u64 = 86_400;

/// The external blocking services a request can be submitted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Dome9 TTL-based blacklist
    Dome9,
    /// Cloudflare permanent firewall access rule
    Cloudflare,
}

impl BackendKind {
    /// All backends, in submission and reporting order
    pub const ALL: [Self; 2] = [Self::Dome9, Self::Cloudflare];

    /// Human-readable service name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Dome9 => "Dome9",
            Self::Cloudflare => "Cloudflare",
        }
    }

    /// Name of the identity field as the service calls it
    #[must_use]
    pub const fn identity_label(self) -> &'static str {
        match self {
            Self::Dome9 => "username",
            Self::Cloudflare => "email",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identity/secret pair used to authenticate against one backend
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BackendCredentials {
    /// Account identity (Dome9 username, Cloudflare email)
    pub identity: String,

    /// API key
    pub secret: String,
}

impl BackendCredentials {
    /// Create a credential pair
    #[must_use]
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }

    /// Returns true if neither field is blank
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.identity.trim().is_empty() && !self.secret.trim().is_empty()
    }

    /// Secret with everything but its edges hidden, for display
    #[must_use]
    pub fn masked_secret(&self) -> String {
        mask(&self.secret)
    }
}

impl std::fmt::Debug for BackendCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCredentials")
            .field("identity", &self.identity)
            .field("secret", &mask(&self.secret))
            .finish()
    }
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => String::from("(not set)"),
        n if n > 8 => {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[n - 4..].iter().collect();
            format!("{head}...{tail}")
        }
        _ => String::from("****"),
    }
}

/// Options that only make sense for one backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOptions {
    /// Dome9 blacklist settings
    Dome9 {
        /// Expiry applied when a request carries no override; 0 is permanent
        default_ttl: u64,
    },
    /// Cloudflare has no tunables: access rules are permanent
    Cloudflare,
}

impl BackendOptions {
    /// Backend these options belong to
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Dome9 { .. } => BackendKind::Dome9,
            Self::Cloudflare => BackendKind::Cloudflare,
        }
    }
}

/// Startup configuration for a single backend.
///
/// Built once and only read afterwards; the gate and the submitters borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Whether this backend should receive submissions
    pub enabled: bool,

    /// Credentials used for every request to this backend
    pub credentials: BackendCredentials,

    /// Backend-specific settings
    pub options: BackendOptions,
}

impl BackendConfig {
    /// Dome9 configuration with the given default TTL
    #[must_use]
    pub const fn dome9(enabled: bool, credentials: BackendCredentials, default_ttl: u64) -> Self {
        Self {
            enabled,
            credentials,
            options: BackendOptions::Dome9 { default_ttl },
        }
    }

    /// Cloudflare configuration
    #[must_use]
    pub const fn cloudflare(enabled: bool, credentials: BackendCredentials) -> Self {
        Self {
            enabled,
            credentials,
            options: BackendOptions::Cloudflare,
        }
    }

    /// Which backend this configures
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        self.options.kind()
    }

    /// Enabled and carrying a full credential pair
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.enabled && self.credentials.is_complete()
    }
}

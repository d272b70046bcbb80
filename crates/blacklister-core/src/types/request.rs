use serde::{Deserialize, Serialize};

/// A single request to deny access from one address.
///
/// The address is passed through verbatim; the backends reject
/// anything they cannot parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRequest {
    /// Address to block
    pub target_ip: String,

    /// Free-text comment stored with the block
    #[serde(default)]
    pub note: String,

    /// Expiry override in seconds; `Some(0)` forces a permanent block
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl BlockRequest {
    /// Create a request with an empty note and no TTL override
    #[must_use]
    pub fn new(target_ip: impl Into<String>) -> Self {
        Self {
            target_ip: target_ip.into(),
            note: String::new(),
            ttl: None,
        }
    }

    /// Attach a note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Override the backend's default TTL
    #[must_use]
    pub const fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// TTL to apply given a backend default
    #[must_use]
    pub fn effective_ttl(&self, default_ttl: u64) -> u64 {
        self.ttl.unwrap_or(default_ttl)
    }
}

/// How long a block stays in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expiry {
    /// Expires after this many seconds
    Seconds(u64),
    /// Never expires
    Permanent,
}

impl Expiry {
    /// Map a TTL where 0 means "no expiry"
    #[must_use]
    pub const fn from_ttl(ttl: u64) -> Self {
        if ttl == 0 {
            Self::Permanent
        } else {
            Self::Seconds(ttl)
        }
    }
}

impl std::fmt::Display for Expiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seconds(secs) => write!(f, "{secs}"),
            Self::Permanent => f.write_str("Permanent"),
        }
    }
}

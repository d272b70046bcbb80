use serde::Serialize;

use super::{BackendKind, Expiry};

/// Status used when a request never produced an HTTP response
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Terminal state of one backend submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Backend accepted the block (HTTP 200)
    Success,
    /// Backend refused the credentials (HTTP 403)
    AuthFailure,
    /// Anything else, including transport faults
    OtherFailure,
}

impl Outcome {
    /// Classify an HTTP status code.
    ///
    /// Only 200 and 403 are distinguished; 429 and 5xx land in
    /// `OtherFailure` along with everything else.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            200 => Self::Success,
            403 => Self::AuthFailure,
            _ => Self::OtherFailure,
        }
    }

    /// Returns true for `Success`
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::AuthFailure => write!(f, "auth_failure"),
            Self::OtherFailure => write!(f, "other_failure"),
        }
    }
}

/// What happened when one backend was asked to block an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    /// Backend that was contacted
    pub backend: BackendKind,

    /// Address that was submitted
    pub target_ip: String,

    /// Classified outcome
    pub outcome: Outcome,

    /// HTTP status, or [`TRANSPORT_FAILURE_STATUS`] when no response arrived
    pub http_status: u16,

    /// Expiry that was requested, for backends that support one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<Expiry>,

    /// Transport error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Response body, kept only in diagnostic mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
}

impl SubmissionResult {
    /// Result for a request that received an HTTP response
    #[must_use]
    pub fn from_status(backend: BackendKind, target_ip: impl Into<String>, status: u16) -> Self {
        Self {
            backend,
            target_ip: target_ip.into(),
            outcome: Outcome::from_status(status),
            http_status: status,
            expiry: None,
            error: None,
            raw_body: None,
        }
    }

    /// Result for a request that failed before any response arrived
    #[must_use]
    pub fn transport_failure(
        backend: BackendKind,
        target_ip: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            target_ip: target_ip.into(),
            outcome: Outcome::OtherFailure,
            http_status: TRANSPORT_FAILURE_STATUS,
            expiry: None,
            error: Some(error.into()),
            raw_body: None,
        }
    }

    /// Record the requested expiry
    #[must_use]
    pub const fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Attach the raw response body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    /// True when the request never reached an HTTP response
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.http_status == TRANSPORT_FAILURE_STATUS
    }
}

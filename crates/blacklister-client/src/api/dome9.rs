//! Dome9 blacklist endpoint.

use super::Submitter;
use crate::BlacklistClient;
use async_trait::async_trait;
use blacklister_core::{BackendCredentials, BackendKind, BlockRequest, Expiry, SubmissionResult};
use serde::Serialize;
use tracing::debug;

/// Query parameters for a Dome9 blacklist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dome9Payload<'r> {
    /// Address to blacklist
    #[serde(rename = "IP")]
    pub ip: &'r str,

    /// Operator note
    #[serde(rename = "Comment")]
    pub comment: &'r str,

    /// Expiry in seconds; absent for permanent items
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl<'r> Dome9Payload<'r> {
    /// Build the payload, resolving the TTL against the configured default
    #[must_use]
    pub fn new(request: &'r BlockRequest, default_ttl: u64) -> Self {
        let ttl = request.effective_ttl(default_ttl);
        Self {
            ip: &request.target_ip,
            comment: &request.note,
            ttl: (ttl > 0).then_some(ttl),
        }
    }

    /// Expiry this payload requests
    #[must_use]
    pub fn expiry(&self) -> Expiry {
        self.ttl.map_or(Expiry::Permanent, Expiry::Seconds)
    }
}

/// Dome9 blacklist submitter
pub struct Dome9Api<'a> {
    client: &'a BlacklistClient,
    credentials: &'a BackendCredentials,
    default_ttl: u64,
}

impl<'a> Dome9Api<'a> {
    pub(crate) const fn new(
        client: &'a BlacklistClient,
        credentials: &'a BackendCredentials,
        default_ttl: u64,
    ) -> Self {
        Self {
            client,
            credentials,
            default_ttl,
        }
    }
}

#[async_trait]
impl<'a> Submitter for Dome9Api<'a> {
    fn backend(&self) -> BackendKind {
        BackendKind::Dome9
    }

    async fn submit(&self, request: &BlockRequest) -> SubmissionResult {
        let payload = Dome9Payload::new(request, self.default_ttl);
        let url = self.client.endpoint(BackendKind::Dome9);
        debug!(url = %url, ip = %request.target_ip, ttl = ?payload.ttl, "Dome9 blacklist request");

        // Dome9 takes the item fields as query parameters on the POST.
        let builder = self
            .client
            .http()
            .post(url.clone())
            .basic_auth(&self.credentials.identity, Some(&self.credentials.secret))
            .query(&payload);

        self.client
            .dispatch(BackendKind::Dome9, &request.target_ip, builder)
            .await
            .with_expiry(payload.expiry())
    }
}

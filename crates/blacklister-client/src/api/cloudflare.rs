//! Cloudflare firewall access rules endpoint.

use super::Submitter;
use crate::BlacklistClient;
use async_trait::async_trait;
use blacklister_core::{BackendCredentials, BackendKind, BlockRequest, SubmissionResult};
use serde::Serialize;
use tracing::debug;

/// JSON body of a Cloudflare access rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudflarePayload<'r> {
    /// Rule action, always `block`
    pub mode: &'static str,

    /// What the rule matches
    pub configuration: AccessRuleConfiguration<'r>,

    /// Operator note
    pub notes: &'r str,
}

/// Match target of an access rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRuleConfiguration<'r> {
    /// Target type, always `ip`
    pub target: &'static str,

    /// Address being matched
    pub value: &'r str,
}

impl<'r> CloudflarePayload<'r> {
    /// Build a block rule for the request's address
    #[must_use]
    pub fn new(request: &'r BlockRequest) -> Self {
        Self {
            mode: "block",
            configuration: AccessRuleConfiguration {
                target: "ip",
                value: &request.target_ip,
            },
            notes: &request.note,
        }
    }
}

/// Cloudflare access rule submitter
pub struct CloudflareApi<'a> {
    client: &'a BlacklistClient,
    credentials: &'a BackendCredentials,
}

impl<'a> CloudflareApi<'a> {
    pub(crate) const fn new(client: &'a BlacklistClient, credentials: &'a BackendCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

#[async_trait]
impl<'a> Submitter for CloudflareApi<'a> {
    fn backend(&self) -> BackendKind {
        BackendKind::Cloudflare
    }

    async fn submit(&self, request: &BlockRequest) -> SubmissionResult {
        let payload = CloudflarePayload::new(request);
        let url = self.client.endpoint(BackendKind::Cloudflare);
        debug!(url = %url, ip = %request.target_ip, "Cloudflare access rule request");

        let builder = self
            .client
            .http()
            .post(url.clone())
            .header("X-Auth-Email", &self.credentials.identity)
            .header("X-Auth-Key", &self.credentials.secret)
            .json(&payload);

        self.client
            .dispatch(BackendKind::Cloudflare, &request.target_ip, builder)
            .await
    }
}

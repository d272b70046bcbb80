//! Backend submitters.

mod cloudflare;
mod dome9;

pub use cloudflare::{AccessRuleConfiguration, CloudflareApi, CloudflarePayload};
pub use dome9::{Dome9Api, Dome9Payload};

use async_trait::async_trait;
use blacklister_core::{BackendKind, BlockRequest, SubmissionResult};

/// Something that can ask one backend to block an address.
///
/// Submission is infallible by signature: every outcome, including
/// transport faults, is reported through the returned result.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Backend this submitter talks to
    fn backend(&self) -> BackendKind;

    /// Send exactly one block request
    async fn submit(&self, request: &BlockRequest) -> SubmissionResult;
}

//! Shared HTTP client for the blocking backends.

use crate::api::{CloudflareApi, Dome9Api, Submitter};
use crate::config::Endpoints;
use blacklister_core::{
    BackendConfig, BackendCredentials, BackendKind, BackendOptions, BlacklistError, Outcome,
    Result, SubmissionResult,
};
use reqwest::{Client as HttpClient, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client that submits block requests to Dome9 and Cloudflare
#[derive(Clone)]
pub struct BlacklistClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    dome9_url: Url,
    cloudflare_url: Url,
    capture_body: bool,
}

impl BlacklistClient {
    /// Create a client pointed at the real services with default settings
    pub fn new() -> Result<Self> {
        BlacklistClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> BlacklistClientBuilder {
        BlacklistClientBuilder::new()
    }

    /// Dome9 blacklist submitter
    #[must_use]
    pub const fn dome9<'a>(
        &'a self,
        credentials: &'a BackendCredentials,
        default_ttl: u64,
    ) -> Dome9Api<'a> {
        Dome9Api::new(self, credentials, default_ttl)
    }

    /// Cloudflare access rule submitter
    #[must_use]
    pub const fn cloudflare<'a>(&'a self, credentials: &'a BackendCredentials) -> CloudflareApi<'a> {
        CloudflareApi::new(self, credentials)
    }

    /// Submitter for a single backend configuration, enabled or not
    #[must_use]
    pub fn submitter<'a>(&'a self, config: &'a BackendConfig) -> Box<dyn Submitter + 'a> {
        match config.options {
            BackendOptions::Dome9 { default_ttl } => {
                Box::new(self.dome9(&config.credentials, default_ttl))
            }
            BackendOptions::Cloudflare => Box::new(self.cloudflare(&config.credentials)),
        }
    }

    /// Submitters for every enabled backend, Dome9 first
    #[must_use]
    pub fn submitters<'a>(&'a self, configs: &'a [BackendConfig]) -> Vec<Box<dyn Submitter + 'a>> {
        let mut enabled: Vec<&BackendConfig> = configs.iter().filter(|c| c.enabled).collect();
        enabled.sort_by_key(|c| c.kind());
        enabled.into_iter().map(|c| self.submitter(c)).collect()
    }

    /// Whether response bodies are kept on results
    #[must_use]
    pub fn captures_body(&self) -> bool {
        self.inner.capture_body
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    pub(crate) fn endpoint(&self, backend: BackendKind) -> &Url {
        match backend {
            BackendKind::Dome9 => &self.inner.dome9_url,
            BackendKind::Cloudflare => &self.inner.cloudflare_url,
        }
    }

    /// Send a prepared request and classify whatever comes back.
    ///
    /// Never fails: transport errors become an `OtherFailure` result.
    pub(crate) async fn dispatch(
        &self,
        backend: BackendKind,
        target_ip: &str,
        request: RequestBuilder,
    ) -> SubmissionResult {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = describe_transport_error(&e);
                warn!(backend = %backend, ip = %target_ip, error = %reason, "request failed");
                return SubmissionResult::transport_failure(backend, target_ip, reason);
            }
        };

        let status = response.status().as_u16();
        let mut result = SubmissionResult::from_status(backend, target_ip, status);

        match result.outcome {
            Outcome::Success => debug!(backend = %backend, ip = %target_ip, status, "block accepted"),
            Outcome::AuthFailure => {
                warn!(backend = %backend, status, "credentials rejected");
            }
            Outcome::OtherFailure => warn!(backend = %backend, status, "block rejected"),
        }

        if self.inner.capture_body {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(backend = %backend, error = %e, "could not read response body");
                    String::new()
                }
            };
            result = result.with_body(body);
        }

        result
    }
}

/// One-line description of a request that never got a response
fn describe_transport_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request error"
    };

    let mut root: &dyn std::error::Error = err;
    while let Some(source) = root.source() {
        root = source;
    }

    format!("{kind}: {root}")
}

/// Builder for configuring a [`BlacklistClient`]
pub struct BlacklistClientBuilder {
    endpoints: Endpoints,
    timeout: Duration,
    user_agent: String,
    capture_body: bool,
}

impl Default for BlacklistClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlacklistClientBuilder {
    /// Create a builder targeting the real services
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("blacklister/{}", env!("CARGO_PKG_VERSION")),
            capture_body: false,
        }
    }

    /// Replace all endpoints
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the Dome9 URL (useful for testing)
    #[must_use]
    pub fn dome9_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoints.dome9 = url.into();
        self
    }

    /// Set the Cloudflare URL (useful for testing)
    #[must_use]
    pub fn cloudflare_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoints.cloudflare = url.into();
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Keep raw response bodies on results (diagnostic mode)
    #[must_use]
    pub const fn capture_body(mut self, capture: bool) -> Self {
        self.capture_body = capture;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<BlacklistClient> {
        let dome9_url = self.endpoints.parse(BackendKind::Dome9)?;
        let cloudflare_url = self.endpoints.parse(BackendKind::Cloudflare)?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| BlacklistError::Http(e.to_string()))?;

        Ok(BlacklistClient {
            inner: Arc::new(ClientInner {
                http,
                dome9_url,
                cloudflare_url,
                capture_body: self.capture_body,
            }),
        })
    }
}

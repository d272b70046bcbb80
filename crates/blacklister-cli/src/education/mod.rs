//! Explanations of what a run is about to send.

use blacklister_client::api::Dome9Payload;
use blacklister_client::Endpoints;
use blacklister_core::{BackendConfig, BackendOptions, BlockRequest, Expiry};
use colored::Colorize;
use url::Url;

/// Explanation builder.
pub struct Explain {
    description: String,
    what_happens: Vec<String>,
    api_calls: Vec<String>,
}

impl Explain {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            what_happens: Vec::new(),
            api_calls: Vec::new(),
        }
    }

    fn step(mut self, step: impl Into<String>) -> Self {
        self.what_happens.push(step.into());
        self
    }

    fn api(mut self, call: impl Into<String>) -> Self {
        self.api_calls.push(call.into());
        self
    }

    /// Print the explanation to stdout.
    pub fn print(&self) {
        println!();
        println!("{}", "=== What This Does ===".bold().cyan());
        println!("{}", self.description);
        println!();

        if !self.what_happens.is_empty() {
            println!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!();
        }

        for call in &self.api_calls {
            println!("{} {}", "API Call:".bold(), call.dimmed());
        }
        if !self.api_calls.is_empty() {
            println!();
        }
    }

    /// Explain a blacklist run over the enabled backends.
    pub fn blacklist(request: &BlockRequest, backends: &[BackendConfig], endpoints: &Endpoints) -> Self {
        let mut explain = Self::new(&format!(
            "Asks each enabled service to deny further access from {}.",
            request.target_ip
        ));

        for backend in backends.iter().filter(|b| b.enabled) {
            let kind = backend.kind();
            let url = endpoints.get(kind);
            explain = match backend.options {
                BackendOptions::Dome9 { default_ttl } => {
                    let payload = Dome9Payload::new(request, default_ttl);
                    let expiry = match payload.expiry() {
                        Expiry::Permanent => String::from("never expires"),
                        Expiry::Seconds(secs) => format!("expires after {secs}s"),
                    };
                    explain
                        .step(format!("{kind}: add a blacklist item that {expiry}"))
                        .api(format!("POST {} (basic auth)", dome9_call(url, &payload)))
                }
                BackendOptions::Cloudflare => explain
                    .step(format!("{kind}: create a permanent user-level access rule in block mode"))
                    .api(format!("POST {url} (X-Auth-Email / X-Auth-Key, JSON body)")),
            };
        }

        explain.step("Each service is tried once; a failure on one does not stop the next")
    }
}

/// Dome9 URL with the item fields encoded the way they go on the wire
fn dome9_call(url: &str, payload: &Dome9Payload<'_>) -> String {
    let Ok(mut call) = Url::parse(url) else {
        return url.to_string();
    };
    {
        let mut query = call.query_pairs_mut();
        query
            .append_pair("IP", payload.ip)
            .append_pair("Comment", payload.comment);
        if let Some(ttl) = payload.ttl {
            query.append_pair("TTL", &ttl.to_string());
        }
    }
    call.to_string()
}

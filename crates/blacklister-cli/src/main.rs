//! blacklister - deny an IP address in Dome9 and/or Cloudflare.

use anyhow::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    blacklister_cli::run().await
}

//! `blacklister -i <IP>` - submit the address to every enabled backend.

use anyhow::Result;
use blacklister_core::{validate, BlockRequest, ConfigError};
use colored::Colorize;
use std::process::ExitCode;
use tracing::{debug, info, warn};

use super::Context;
use crate::cli::EXIT_USAGE;
use crate::education::Explain;
use crate::output::Reporter;

pub async fn execute(ctx: &Context, request: &BlockRequest) -> Result<ExitCode> {
    let backends = ctx.backends();

    // Every enabled backend is checked before anything is sent.
    if let Err(err) = validate(&backends) {
        report_config_error(&err);
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    if ctx.explain {
        Explain::blacklist(request, &backends, &ctx.config.endpoints()).print();
    }

    let client = ctx.client()?;
    let mut reporter = Reporter::new(ctx.output_format, std::io::stdout().lock());

    for submitter in client.submitters(&backends) {
        info!(backend = %submitter.backend(), ip = %request.target_ip, "submitting block");
        let result = submitter.submit(request).await;
        debug!(backend = %result.backend, outcome = %result.outcome, status = result.http_status, "submission finished");
        // A closed or full stdout must not keep the next backend from being tried.
        if let Err(err) = reporter.record(result) {
            warn!(backend = %submitter.backend(), error = %err, "could not write result");
        }
    }

    if let Err(err) = reporter.finish() {
        warn!(error = %err, "could not write results");
    }

    // Per-backend failures are reported, not turned into a failing exit status.
    Ok(ExitCode::SUCCESS)
}

fn report_config_error(err: &ConfigError) {
    eprintln!("{} {}", "[!]".red().bold(), err);
    eprintln!("    {}", err.hint().dimmed());
}

//! `blacklister --check` - report what the configuration enables.

use blacklister_core::{validate, BackendConfig, BackendOptions};
use colored::Colorize;
use std::process::ExitCode;

use super::Context;
use crate::cli::EXIT_USAGE;

/// Print the per-backend configuration status and run the gate.
///
/// Exit status is success only when the gate passes.
pub fn check(ctx: &Context) -> ExitCode {
    let backends = ctx.backends();

    println!("{}", "Configuration:".bold());
    let source = if ctx.config_path.exists() {
        ctx.config_path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", ctx.config_path.display())
    };
    println!("  {} {}", "file:".bold(), source);
    println!();

    for backend in &backends {
        print_backend(backend);
    }

    match validate(&backends) {
        Ok(()) => {
            println!("{} Ready to blacklist.", "[+]".green().bold());
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{} {}", "[*]".yellow().bold(), err);
            println!("    {}", err.hint());
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn print_backend(backend: &BackendConfig) {
    let kind = backend.kind();
    let status = if !backend.enabled {
        "disabled".dimmed().to_string()
    } else if backend.credentials.is_complete() {
        "ready".green().to_string()
    } else {
        "missing credentials".red().to_string()
    };

    println!("  {} {}", format!("{kind}:").bold(), status);

    let identity = if backend.credentials.identity.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        backend.credentials.identity.clone()
    };
    println!("    {:<9}{}", format!("{}:", kind.identity_label()), identity);
    println!("    {:<9}{}", "api_key:", backend.credentials.masked_secret());

    if let BackendOptions::Dome9 { default_ttl } = backend.options {
        let ttl = if default_ttl == 0 {
            String::from("permanent")
        } else {
            format!("{default_ttl}s")
        };
        println!("    {:<9}{}", "ttl:", ttl);
    }
    println!();
}

//! CLI argument parsing and dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::Cli;
use blacklister_core::BlockRequest;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::{self, OutputFormat};

/// Exit status for bad arguments and invalid configuration
pub const EXIT_USAGE: u8 = 2;

/// Run the CLI application.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.print_config {
        print!("{}", Config::example());
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration, then let the environment override credentials
    let config_path = Config::path(cli.config.as_deref())?;
    let config = Config::load(&config_path, cli.config.is_some())?.with_env_overrides();

    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    if output_format == OutputFormat::Pretty && !cli.no_banner {
        output::print_banner();
    }

    let ctx = commands::Context {
        config,
        config_path,
        output_format,
        debug: cli.debug,
        explain: cli.explain,
    };

    if cli.check {
        return Ok(commands::config::check(&ctx));
    }

    let Some(ip) = cli.ip else {
        Cli::command().print_help()?;
        println!();
        commands::config::check(&ctx);
        return Ok(ExitCode::from(EXIT_USAGE));
    };

    let mut request = BlockRequest::new(ip).with_note(cli.note);
    if let Some(ttl) = cli.ttl {
        request = request.with_ttl(ttl);
    }

    commands::blacklist::execute(&ctx, &request).await
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,blacklister_core=debug,blacklister_client=debug,blacklister_cli=debug")
        } else {
            EnvFilter::new("error")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

//! Output formatting for submission results.

use anyhow::Result;
use blacklister_core::{Outcome, SubmissionResult};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;

const BANNER: &str = r"__________.__                 __   .__  .__          __
\______   \  | _____    ____ |  | _|  | |__| _______/  |_  ___________
 |    |  _/  | \__  \ _/ ___\|  |/ /  | |  |/  ___/\   __\/ __ \_  __ \
 |    |   \  |__/ __ \  \___ |   < |  |_|  |\___ \  |  | \  ___/|  | \/
 |______  /____(____  /\___  >__|_ \____/__/____  > |__|  \___  >__|
        \/          \/     \/     \/            \/            \/
";

const CSV_HEADER: [&str; 4] = ["backend", "ip", "outcome", "status"];

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per backend
    #[default]
    Pretty,
    /// JSON array of results
    Json,
    /// YAML list of results
    Yaml,
    /// CSV rows
    Csv,
}

/// Print the banner to stderr.
pub fn print_banner() {
    eprintln!("{}", BANNER.cyan());
}

/// Operator-facing sentence describing a result, without the status marker.
pub fn outcome_message(result: &SubmissionResult) -> String {
    let ip = &result.target_ip;
    let backend = result.backend;

    match result.outcome {
        Outcome::Success => match result.expiry {
            Some(expiry) => format!("Blacklisted {ip} with {backend} (TTL: {expiry})"),
            None => format!("Blacklisted {ip} with {backend}."),
        },
        _ if result.is_transport_failure() => format!(
            "Failed to blacklist {ip} with {backend}. Request failed: {}.",
            result.error.as_deref().unwrap_or("no response")
        ),
        Outcome::AuthFailure => format!(
            "Failed to blacklist {ip} with {backend}. HTTP response code {}, check the {backend} {} and API key in the config.",
            result.http_status,
            backend.identity_label()
        ),
        Outcome::OtherFailure => format!(
            "Failed to blacklist {ip} with {backend}. HTTP response code {}.",
            result.http_status
        ),
    }
}

fn marker(outcome: Outcome) -> String {
    if outcome.is_success() {
        "[+]".green().bold().to_string()
    } else {
        "[!]".red().bold().to_string()
    }
}

/// Renders results as they arrive.
///
/// Line-oriented formats are written per result; JSON and YAML are
/// written as a single document by [`Reporter::finish`].
pub struct Reporter<W: Write> {
    format: OutputFormat,
    out: W,
    results: Vec<SubmissionResult>,
}

impl<W: Write> Reporter<W> {
    pub const fn new(format: OutputFormat, out: W) -> Self {
        Self {
            format,
            out,
            results: Vec::new(),
        }
    }

    /// Render one result.
    pub fn record(&mut self, result: SubmissionResult) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                if let Some(body) = &result.raw_body {
                    writeln!(self.out, "{body}")?;
                }
                writeln!(self.out, "{} {}", marker(result.outcome), outcome_message(&result))?;
            }
            OutputFormat::Csv => {
                // Bodies would break the row layout, so they go to stderr.
                if let Some(body) = &result.raw_body {
                    eprintln!("{body}");
                }
                let first = self.results.is_empty();
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(&mut self.out);
                if first {
                    writer.write_record(CSV_HEADER)?;
                }
                let outcome = result.outcome.to_string();
                let status = result.http_status.to_string();
                writer.write_record([
                    result.backend.display_name(),
                    result.target_ip.as_str(),
                    outcome.as_str(),
                    status.as_str(),
                ])?;
                writer.flush()?;
            }
            OutputFormat::Json | OutputFormat::Yaml => {}
        }

        self.results.push(result);
        Ok(())
    }

    /// Write any buffered document and flush.
    pub fn finish(mut self) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, &self.results)?;
                writeln!(self.out)?;
            }
            OutputFormat::Yaml => serde_yaml::to_writer(&mut self.out, &self.results)?,
            OutputFormat::Pretty | OutputFormat::Csv => {}
        }
        self.out.flush()?;
        Ok(())
    }
}

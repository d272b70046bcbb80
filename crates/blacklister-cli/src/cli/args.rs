//! Command-line argument definitions using clap.

use clap::Parser;
use crate::output::OutputFormat;

/// Blacklist an IP address in Dome9 and/or Cloudflare
///
/// Submits the address to every backend enabled in the config file and
/// prints one result line per backend.
#[derive(Parser, Debug)]
#[command(name = "blacklister")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// IP address to blacklist
    #[arg(short, long, value_name = "IP")]
    pub ip: Option<String>,

    /// Note or comment to go with the block
    #[arg(short, long, value_name = "NOTE", default_value = "")]
    pub note: String,

    /// Print raw backend responses (use to troubleshoot)
    #[arg(short, long)]
    pub debug: bool,

    /// Dome9 expiry in seconds, overriding the config (0 = permanent)
    #[arg(short, long, value_name = "SECS")]
    pub ttl: Option<u64>,

    /// Path to the config file
    #[arg(short, long, env = "BLACKLISTER_CONFIG", value_name = "PATH")]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain which requests will be sent before sending them
    #[arg(long)]
    pub explain: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Don't print the banner
    #[arg(long)]
    pub no_banner: bool,

    /// Check the configuration and exit
    #[arg(long, conflicts_with = "ip")]
    pub check: bool,

    /// Print an example config file and exit
    #[arg(long, conflicts_with_all = ["ip", "check"])]
    pub print_config: bool,
}

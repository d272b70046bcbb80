//! # blacklister-cli
//!
//! Blacklists the supplied IP address in Dome9 and/or Cloudflare.
//!
//! ## Features
//!
//! - **Pre-flight gate**: nothing is sent unless every enabled backend has credentials
//! - **Independent backends**: one backend failing never stops the other
//! - **Diagnostics**: `-d` echoes raw API responses
//! - **Multiple output formats**: pretty lines, JSON, YAML, CSV

pub mod cli;
pub mod config;
pub mod education;
pub mod output;

pub use cli::run;

//! HTTP submitters for blacklister.
//!
//! This crate provides [`BlacklistClient`] and one [`Submitter`] per backend:
//! Dome9 (TTL-based blacklist) and Cloudflare (permanent access rule).

mod client;
mod config;
pub mod api;

pub use api::Submitter;
pub use client::{BlacklistClient, BlacklistClientBuilder, DEFAULT_TIMEOUT};
pub use config::*;
pub use blacklister_core::{BlacklistError, Result};

//! Core types for blacklister.
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Types**: block requests, backend configuration and submission results
//! - **Errors**: [`ConfigError`] for the pre-flight gate, [`BlacklistError`] for client setup
//! - **Gate**: [`validate`], run before any backend is contacted
//!
//! # Example
//!
//! ```rust
//! use blacklister_core::{validate, BackendConfig, BackendCredentials, ConfigError};
//!
//! let configs = [
//!     BackendConfig::dome9(false, BackendCredentials::default(), 86_400),
//!     BackendConfig::cloudflare(false, BackendCredentials::default()),
//! ];
//! assert_eq!(validate(&configs), Err(ConfigError::NoBackendSelected));
//! ```

mod error;
mod gate;
pub mod types;

pub use error::{BlacklistError, ConfigError, Result};
pub use gate::validate;
pub use types::*;

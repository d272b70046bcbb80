//! Pre-flight configuration gate.
//!
//! Runs over every backend before any request is issued, so a typo in the
//! second backend's credentials is caught before the first one is contacted.

use crate::error::ConfigError;
use crate::types::BackendConfig;

/// Check that at least one backend is enabled and every enabled backend
/// has a full credential pair.
///
/// Configs are checked in backend order; the first incomplete one is reported.
pub fn validate(configs: &[BackendConfig]) -> Result<(), ConfigError> {
    let mut ordered: Vec<&BackendConfig> = configs.iter().collect();
    ordered.sort_by_key(|config| config.kind());

    let mut any_enabled = false;
    for config in ordered.into_iter().filter(|config| config.enabled) {
        any_enabled = true;
        if !config.credentials.is_complete() {
            return Err(ConfigError::MissingCredentials {
                backend: config.kind(),
            });
        }
    }

    if any_enabled {
        Ok(())
    } else {
        Err(ConfigError::NoBackendSelected)
    }
}

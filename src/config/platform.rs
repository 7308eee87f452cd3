// src/config/platform.rs

//! Startup gate: `pwatch` is a stand-in for hosts without a `watch` command.

use crate::errors::{PwatchError, Result};

/// Operating systems (as in `std::env::consts::OS`) that lack a native
/// `watch` and therefore get to run `pwatch`.
const SUPPORTED_PLATFORMS: &[&str] = &["windows"];

/// Refuse to start on platforms that already ship an equivalent tool.
pub fn ensure_supported_platform(os: &str) -> Result<()> {
    if SUPPORTED_PLATFORMS.contains(&os) {
        Ok(())
    } else {
        Err(PwatchError::UnsupportedPlatform(os.to_string()))
    }
}

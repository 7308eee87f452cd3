// src/config/mod.rs

//! Startup configuration.
//!
//! - [`model`] holds the raw and validated config types.
//! - [`validate`] turns a [`RawWatchConfig`] into a [`WatchConfig`].
//! - [`loader`] is the entry point that combines validation with command
//!   resolution.
//! - [`platform`] refuses hosts that already ship a native `watch`.

pub mod loader;
pub mod model;
pub mod platform;
pub mod validate;

pub use loader::{load_and_validate, resolve_command};
pub use model::{RawWatchConfig, WatchConfig};
pub use platform::ensure_supported_platform;

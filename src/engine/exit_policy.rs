// src/engine/exit_policy.rs

//! Decides, after each completed run, whether the process should exit.

use std::sync::OnceLock;

use tracing::{debug, info};

use crate::config::WatchConfig;
use crate::types::{RunOutcome, exit_codes};

/// Why the loop stopped on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The command failed and `--errexit` is set.
    CommandFailed,
    /// The output differs from the first run and `--chgexit` is set.
    OutputChanged,
}

impl ExitReason {
    pub fn code(self) -> i32 {
        match self {
            ExitReason::CommandFailed => exit_codes::COMMAND_FAILED,
            ExitReason::OutputChanged => exit_codes::OUTPUT_CHANGED,
        }
    }
}

/// Output of the very first observed run. Written at most once.
#[derive(Debug, Default)]
pub struct Baseline {
    value: OnceLock<Vec<u8>>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `output` if nothing is stored yet. Returns whether this call
    /// stored it; later calls leave the first value in place.
    pub fn set_once(&self, output: &[u8]) -> bool {
        self.value.set(output.to_vec()).is_ok()
    }

    pub fn get(&self) -> Option<&[u8]> {
        self.value.get().map(Vec::as_slice)
    }

    /// Byte-for-byte comparison against the stored value. An unset baseline
    /// matches nothing.
    pub fn matches(&self, output: &[u8]) -> bool {
        self.get() == Some(output)
    }
}

/// Exit-on-error and exit-on-change rules, checked in that order.
#[derive(Debug, Default)]
pub struct ExitPolicy {
    exit_on_error: bool,
    exit_on_change: bool,
    baseline: Baseline,
}

impl ExitPolicy {
    pub fn new(exit_on_error: bool, exit_on_change: bool) -> Self {
        Self {
            exit_on_error,
            exit_on_change,
            baseline: Baseline::new(),
        }
    }

    pub fn from_config(config: &WatchConfig) -> Self {
        Self::new(config.exit_on_error(), config.exit_on_change())
    }

    /// Inspect one completed run. Must be called in completion order.
    pub fn observe(&self, outcome: &RunOutcome) -> Option<ExitReason> {
        if outcome.failed && self.exit_on_error {
            info!(error = ?outcome.error, "command failed; exiting");
            return Some(ExitReason::CommandFailed);
        }

        if self.exit_on_change {
            if self.baseline.set_once(&outcome.output) {
                debug!(bytes = outcome.output.len(), "baseline output recorded");
                return None;
            }
            if !self.baseline.matches(&outcome.output) {
                info!("output changed since first run; exiting");
                return Some(ExitReason::OutputChanged);
            }
        }

        None
    }
}

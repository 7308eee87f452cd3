// src/types.rs

use std::time::Duration;

/// Process exit codes. Stable for scripting consumers; values never overlap.
pub mod exit_codes {
    /// The watched command failed and `--errexit` was set.
    pub const COMMAND_FAILED: i32 = 1;
    /// The command output differed from the first run and `--chgexit` was set.
    pub const OUTPUT_CHANGED: i32 = 2;
    /// No command was given on the command line.
    pub const NO_COMMAND: i32 = 3;
    /// `--exec` was given but the command processor could not be found.
    pub const COMMAND_PROCESSOR: i32 = 4;
    /// The host already ships a native `watch`.
    pub const UNSUPPORTED_PLATFORM: i32 = 5;
    /// Arguments could not be parsed or failed validation.
    pub const INVALID_ARGUMENTS: i32 = 6;
    /// Anything else (e.g. the terminal stopped accepting writes).
    pub const INTERNAL: i32 = 7;
    /// Ctrl-C.
    pub const INTERRUPTED: i32 = 130;
}

/// The command to run on every tick. Built once before the loop starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub executable: String,
    pub arguments: Vec<String>,
}

impl CommandSpec {
    pub fn new(executable: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            arguments,
        }
    }

    /// `executable arg1 arg2 ...`, as shown in the title line.
    pub fn display_line(&self) -> String {
        format!("{} {}", self.executable, self.arguments.join(" "))
    }
}

/// Cadence settings for the scheduler.
///
/// - `precise = true`: next deadline is measured from the *start* of the
///   previous run.
/// - `precise = false`: next deadline is measured from its *completion*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub interval: Duration,
    pub precise: bool,
}

/// Result of one completed run, handed to the exit policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub timestamp: chrono::DateTime<chrono::Local>,
    /// Combined output; empty when the run failed.
    pub output: Vec<u8>,
    pub failed: bool,
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn succeeded(timestamp: chrono::DateTime<chrono::Local>, output: Vec<u8>) -> Self {
        Self {
            timestamp,
            output,
            failed: false,
            error: None,
        }
    }

    pub fn failed(timestamp: chrono::DateTime<chrono::Local>, error: impl Into<String>) -> Self {
        Self {
            timestamp,
            output: Vec::new(),
            failed: true,
            error: Some(error.into()),
        }
    }
}

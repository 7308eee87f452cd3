// src/engine/mod.rs

//! Scheduling engine for pwatch.
//!
//! This module ties together:
//! - the pure deadline bookkeeping ([`schedule`])
//! - the re-entrancy guard ([`guard`])
//! - the exit rules ([`exit_policy`])
//! - one admitted run: guard, frame, policy ([`runner`])
//! - the async shell that polls the schedule and waits for termination
//!   ([`runtime`])

use crate::types::exit_codes;

pub mod exit_policy;
pub mod guard;
pub mod runner;
pub mod runtime;
pub mod schedule;

pub use exit_policy::{Baseline, ExitPolicy, ExitReason};
pub use guard::{RunGuard, RunPermit};
pub use runner::{GuardedRunner, RunAttempt};
pub use runtime::Runtime;
pub use schedule::{POLL_QUANTUM, Schedule};

/// Events flowing into the runtime from the timing loop and signal handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// The exit policy asked for termination.
    ExitRequested(ExitReason),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
    /// A run could not paint its frame; the loop has stopped.
    RunAborted(String),
}

/// How the runtime ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exit(ExitReason),
    Interrupted,
}

impl Termination {
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::Exit(reason) => reason.code(),
            Termination::Interrupted => exit_codes::INTERRUPTED,
        }
    }
}

// src/engine/runner.rs

//! Guard → renderer → exit policy, as one admitted run.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::Executor;
use crate::render::{Display, FrameRenderer};
use crate::types::{CommandSpec, RunOutcome};

use super::exit_policy::{ExitPolicy, ExitReason};
use super::guard::RunGuard;

/// What happened to a single trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunAttempt {
    /// Another run was in flight; nothing was drawn.
    Dropped,
    /// The command ran and a frame was painted.
    Completed {
        run_id: u64,
        outcome: RunOutcome,
        exit: Option<ExitReason>,
    },
}

impl RunAttempt {
    pub fn exit(&self) -> Option<ExitReason> {
        match self {
            RunAttempt::Completed { exit, .. } => *exit,
            RunAttempt::Dropped => None,
        }
    }
}

/// Shared entry point for every trigger.
///
/// The `RunGuard` decides admission; the mutex around the renderer is never
/// contended while the guard is held and only exists to hand out `&mut`.
pub struct GuardedRunner<E, D> {
    guard: RunGuard,
    renderer: Mutex<FrameRenderer<E, D>>,
    policy: ExitPolicy,
    command: CommandSpec,
    next_run_id: AtomicU64,
}

impl<E, D> fmt::Debug for GuardedRunner<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedRunner")
            .field("guard", &self.guard)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

impl<E: Executor, D: Display> GuardedRunner<E, D> {
    pub fn new(command: CommandSpec, renderer: FrameRenderer<E, D>, policy: ExitPolicy) -> Self {
        Self {
            guard: RunGuard::new(),
            renderer: Mutex::new(renderer),
            policy,
            command,
            next_run_id: AtomicU64::new(1),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Handle one trigger stamped `timestamp`.
    ///
    /// If a run is already in flight the trigger is dropped without side
    /// effects. Otherwise the command is run, the frame painted, and the
    /// outcome passed to the exit policy before the guard is released, so
    /// outcomes are observed strictly in completion order.
    pub async fn run_once(&self, timestamp: DateTime<Local>) -> Result<RunAttempt> {
        let Some(_permit) = self.guard.acquire() else {
            debug!("run already in progress; dropping trigger");
            return Ok(RunAttempt::Dropped);
        };

        let run_id = self.next_run_id.fetch_add(1, Ordering::Relaxed);
        debug!(run_id, "run admitted");

        let outcome = {
            let mut renderer = self.renderer.lock().await;
            renderer.render(timestamp, &self.command).await?
        };

        let exit = self.policy.observe(&outcome);

        info!(
            run_id,
            failed = outcome.failed,
            bytes = outcome.output.len(),
            exit = ?exit,
            "run completed"
        );

        Ok(RunAttempt::Completed {
            run_id,
            outcome,
            exit,
        })
    }
}

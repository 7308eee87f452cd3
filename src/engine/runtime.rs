// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, trace};

use crate::config::WatchConfig;
use crate::errors::{PwatchError, Result};
use crate::exec::Executor;
use crate::render::{Display, FrameRenderer};
use crate::types::{CommandSpec, ScheduleConfig};

use super::exit_policy::ExitPolicy;
use super::runner::{GuardedRunner, RunAttempt};
use super::schedule::{POLL_QUANTUM, Schedule};
use super::{RuntimeEvent, Termination};

/// Drives the timing loop and waits for a reason to stop.
///
/// The timing loop runs on its own Tokio task. This struct only blocks on
/// the event channel, which the loop, the Ctrl-C handler and tests feed via
/// [`Runtime::event_sender`].
pub struct Runtime<E, D> {
    schedule: ScheduleConfig,
    runner: Arc<GuardedRunner<E, D>>,
    event_tx: mpsc::Sender<RuntimeEvent>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl<E, D> fmt::Debug for Runtime<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("schedule", &self.schedule)
            .field("runner", &self.runner)
            .finish_non_exhaustive()
    }
}

impl<E, D> Runtime<E, D>
where
    E: Executor + 'static,
    D: Display + 'static,
{
    pub fn new(config: WatchConfig, command: CommandSpec, executor: E, display: D) -> Self {
        let renderer = FrameRenderer::new(config, executor, display);
        Self::with_renderer(config, command, renderer)
    }

    /// Like [`Runtime::new`] but with a pre-built renderer (e.g. one with a
    /// pinned hostname lookup).
    pub fn with_renderer(
        config: WatchConfig,
        command: CommandSpec,
        renderer: FrameRenderer<E, D>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(16);
        let runner = GuardedRunner::new(command, renderer, ExitPolicy::from_config(&config));
        Self {
            schedule: config.schedule(),
            runner: Arc::new(runner),
            event_tx,
            event_rx,
        }
    }

    /// Sender for delivering [`RuntimeEvent`]s from outside (Ctrl-C, tests).
    pub fn event_sender(&self) -> mpsc::Sender<RuntimeEvent> {
        self.event_tx.clone()
    }

    /// Main loop.
    ///
    /// - Spawns the timing loop (first run immediately, then on schedule).
    /// - Waits for an exit request, a shutdown request or a fatal error.
    /// - Aborts the timing loop on the way out; an in-flight command is
    ///   killed and its output discarded.
    pub async fn run(mut self) -> Result<Termination> {
        info!(
            interval_ms = self.schedule.interval.as_millis() as u64,
            precise = self.schedule.precise,
            command = %self.runner.command().display_line(),
            "pwatch runtime started"
        );

        let _ticker = AbortOnDrop(tokio::spawn(timing_loop(
            Arc::clone(&self.runner),
            self.schedule,
            self.event_tx.clone(),
        )));

        let result = self.wait_for_termination().await;

        info!(?result, "runtime exiting");
        result
    }

    async fn wait_for_termination(&mut self) -> Result<Termination> {
        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    return Ok(Termination::Interrupted);
                }
            };

            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::ExitRequested(reason) => return Ok(Termination::Exit(reason)),
                RuntimeEvent::ShutdownRequested => return Ok(Termination::Interrupted),
                RuntimeEvent::RunAborted(msg) => {
                    return Err(PwatchError::Other(anyhow::anyhow!(msg)));
                }
            }
        }
    }
}

/// Aborts the timing loop when `run` returns or its future is dropped.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Background timing loop: one unconditional run, then poll the deadline
/// every [`POLL_QUANTUM`].
async fn timing_loop<E, D>(
    runner: Arc<GuardedRunner<E, D>>,
    config: ScheduleConfig,
    events: mpsc::Sender<RuntimeEvent>,
) where
    E: Executor,
    D: Display,
{
    let first = runner.run_once(Local::now()).await;
    if !forward(&events, first).await {
        return;
    }

    let mut schedule = Schedule::new(config, Instant::now());
    let mut ticker = tokio::time::interval(POLL_QUANTUM);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let started = Instant::now();
        if !schedule.is_due(started) {
            continue;
        }

        let attempt = runner.run_once(Local::now()).await;
        if !forward(&events, attempt).await {
            return;
        }

        let next = schedule.complete_run(started, Instant::now());
        trace!(
            in_ms = next.saturating_duration_since(Instant::now()).as_millis() as u64,
            "next run scheduled"
        );
    }
}

/// Report a run to the runtime. Returns `false` when the loop must stop.
async fn forward(events: &mpsc::Sender<RuntimeEvent>, attempt: Result<RunAttempt>) -> bool {
    match attempt {
        Ok(RunAttempt::Completed {
            exit: Some(reason), ..
        }) => {
            let _ = events.send(RuntimeEvent::ExitRequested(reason)).await;
            false
        }
        Ok(RunAttempt::Completed { .. }) => true,
        Ok(RunAttempt::Dropped) => {
            debug!("trigger coalesced into the run in flight");
            true
        }
        Err(e) => {
            error!(error = %e, "run aborted");
            let _ = events.send(RuntimeEvent::RunAborted(e.to_string())).await;
            false
        }
    }
}

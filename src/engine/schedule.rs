// src/engine/schedule.rs

//! Pure deadline bookkeeping for the timing loop.
//!
//! No Tokio timers and no sleeping here; the async loop in
//! [`runtime`](super::runtime) polls [`Schedule::is_due`] every
//! [`POLL_QUANTUM`] and reports each run back via
//! [`Schedule::complete_run`]. Keeping the arithmetic pure makes cadence
//! properties testable with synthetic clocks.

use std::time::Duration;

use tokio::time::Instant;

use crate::types::ScheduleConfig;

/// How often the timing loop checks the deadline.
pub const POLL_QUANTUM: Duration = Duration::from_millis(10);

/// Owner of the next-run deadline. Only the timing loop reads or writes it.
#[derive(Debug, Clone)]
pub struct Schedule {
    config: ScheduleConfig,
    next_deadline: Instant,
}

impl Schedule {
    /// Start scheduling after the unconditional first run finished at `now`.
    pub fn new(config: ScheduleConfig, now: Instant) -> Self {
        Self {
            config,
            next_deadline: now + config.interval,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline
    }

    /// Record a run that started at `started` and finished at `completed`,
    /// and return the new deadline.
    ///
    /// Triggers missed while the run was in flight are not replayed: at most
    /// one catch-up run follows a long run.
    pub fn complete_run(&mut self, started: Instant, completed: Instant) -> Instant {
        let base = if self.config.precise {
            started
        } else {
            completed
        };
        self.next_deadline = base + self.config.interval;
        self.next_deadline
    }
}

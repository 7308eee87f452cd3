// src/config/model.rs

use std::time::Duration;

use crate::types::ScheduleConfig;

/// Flag values straight from the command line, before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawWatchConfig {
    pub interval_secs: f64,
    pub precise: bool,
    pub hide_title: bool,
    pub exit_on_error: bool,
    pub exit_on_change: bool,
}

impl Default for RawWatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5.0,
            precise: false,
            hide_title: false,
            exit_on_error: false,
            exit_on_change: false,
        }
    }
}

/// Validated, immutable configuration shared by the scheduler, renderer and
/// exit policy. Only obtainable through `TryFrom<RawWatchConfig>`, so the
/// interval is always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchConfig {
    interval: Duration,
    precise: bool,
    hide_title: bool,
    exit_on_error: bool,
    exit_on_change: bool,
}

impl WatchConfig {
    pub(crate) fn new_unchecked(raw: RawWatchConfig, interval: Duration) -> Self {
        Self {
            interval,
            precise: raw.precise,
            hide_title: raw.hide_title,
            exit_on_error: raw.exit_on_error,
            exit_on_change: raw.exit_on_change,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn precise(&self) -> bool {
        self.precise
    }

    pub fn hide_title(&self) -> bool {
        self.hide_title
    }

    pub fn exit_on_error(&self) -> bool {
        self.exit_on_error
    }

    pub fn exit_on_change(&self) -> bool {
        self.exit_on_change
    }

    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig {
            interval: self.interval,
            precise: self.precise,
        }
    }

    /// Interval in seconds as printed in the title line: `5`, `0.5`, `2.25`.
    pub fn interval_label(&self) -> String {
        format!("{}", self.interval.as_secs_f64())
    }
}

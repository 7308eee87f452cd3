// src/render/frame.rs

//! Composition of a single screen frame.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, trace};

use crate::config::WatchConfig;
use crate::errors::Result;
use crate::exec::Executor;
use crate::types::{CommandSpec, RunOutcome};

use super::Display;
use super::host;

/// `Mon Jan  2 15:04:05 2006`
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Row where command output starts when the title is shown.
const BODY_ROW: u16 = 2;

/// Runs the command and paints one full frame per call.
///
/// A frame is: clear, optional title line with a right-aligned
/// `hostname: timestamp` banner, then either the raw command output or
/// `Error: ...`. Everything is flushed at the end in one go.
pub struct FrameRenderer<E, D> {
    config: WatchConfig,
    executor: E,
    display: D,
    hostname: fn() -> Option<String>,
}

impl<E, D> fmt::Debug for FrameRenderer<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<E: Executor, D: Display> FrameRenderer<E, D> {
    pub fn new(config: WatchConfig, executor: E, display: D) -> Self {
        Self {
            config,
            executor,
            display,
            hostname: host::hostname,
        }
    }

    /// Replace the hostname lookup (used by tests to pin the banner).
    pub fn with_hostname_lookup(mut self, lookup: fn() -> Option<String>) -> Self {
        self.hostname = lookup;
        self
    }

    /// Run `spec` once and paint the resulting frame.
    ///
    /// Command failures are part of the returned [`RunOutcome`]; only
    /// display IO errors are returned as `Err`.
    pub async fn render(
        &mut self,
        timestamp: DateTime<Local>,
        spec: &CommandSpec,
    ) -> Result<RunOutcome> {
        self.display.clear()?;
        self.display.move_to(0, 0)?;

        if !self.config.hide_title() {
            self.draw_title(&timestamp, spec)?;
        }

        let exec = self.executor.execute(spec).await;

        let outcome = match exec.error {
            None => {
                self.display.write_bytes(&exec.output)?;
                RunOutcome::succeeded(timestamp, exec.output)
            }
            Some(error) => {
                debug!(error = %error, "command failed; rendering error instead of output");
                self.display.print(&format!("Error: {error}"))?;
                RunOutcome::failed(timestamp, error)
            }
        };

        self.display.flush()?;
        trace!(bytes = outcome.output.len(), failed = outcome.failed, "frame flushed");

        Ok(outcome)
    }

    fn draw_title(&mut self, timestamp: &DateTime<Local>, spec: &CommandSpec) -> Result<()> {
        let title = format!(
            "Every {}s: {}",
            self.config.interval_label(),
            spec.display_line()
        );
        self.display.print(&title)?;

        let width = self.display.width();
        let stamp = format_timestamp(timestamp);
        let banner = match (self.hostname)() {
            Some(host) => format!("{host}: {stamp}"),
            None => stamp,
        };

        self.display.move_to(right_aligned_column(width, &banner), 0)?;
        self.display.print(&banner)?;
        self.display.move_to(0, BODY_ROW)?;
        Ok(())
    }
}

/// Format a timestamp for the banner.
pub fn format_timestamp<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Column at which `text` must start so that it ends at the right edge.
fn right_aligned_column(width: u16, text: &str) -> u16 {
    let len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    width.saturating_sub(len)
}

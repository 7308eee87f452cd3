#![allow(dead_code)]

use std::time::Duration;

use pwatch::config::{RawWatchConfig, WatchConfig};
use pwatch::types::CommandSpec;

/// Builder for `WatchConfig` to simplify test setup.
pub struct WatchConfigBuilder {
    raw: RawWatchConfig,
}

impl WatchConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawWatchConfig::default(),
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.raw.interval_secs = interval.as_secs_f64();
        self
    }

    pub fn interval_ms(self, ms: u64) -> Self {
        self.interval(Duration::from_millis(ms))
    }

    pub fn precise(mut self, val: bool) -> Self {
        self.raw.precise = val;
        self
    }

    pub fn hide_title(mut self, val: bool) -> Self {
        self.raw.hide_title = val;
        self
    }

    pub fn exit_on_error(mut self, val: bool) -> Self {
        self.raw.exit_on_error = val;
        self
    }

    pub fn exit_on_change(mut self, val: bool) -> Self {
        self.raw.exit_on_change = val;
        self
    }

    pub fn build(self) -> WatchConfig {
        WatchConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for WatchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `CommandSpec` from a whitespace-separated command line.
pub fn command(line: &str) -> CommandSpec {
    let mut words = line.split_whitespace().map(str::to_string);
    let executable = words.next().unwrap_or_default();
    CommandSpec::new(executable, words.collect())
}

// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{RawWatchConfig, WatchConfig};
use crate::errors::{PwatchError, Result};

impl TryFrom<RawWatchConfig> for WatchConfig {
    type Error = crate::errors::PwatchError;

    fn try_from(raw: RawWatchConfig) -> std::result::Result<Self, Self::Error> {
        let interval = validate_interval(raw.interval_secs)?;
        Ok(WatchConfig::new_unchecked(raw, interval))
    }
}

fn validate_interval(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(PwatchError::ConfigError(format!(
            "interval must be a positive number of seconds (got {secs})"
        )));
    }

    let interval = Duration::try_from_secs_f64(secs).map_err(|e| {
        PwatchError::ConfigError(format!("interval {secs} is out of range: {e}"))
    })?;

    if interval.is_zero() {
        return Err(PwatchError::ConfigError(format!(
            "interval {secs} rounds down to zero"
        )));
    }

    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(interval_secs: f64) -> RawWatchConfig {
        RawWatchConfig {
            interval_secs,
            ..RawWatchConfig::default()
        }
    }

    #[test]
    fn accepts_sub_second_interval() {
        let cfg = WatchConfig::try_from(raw(0.25)).expect("valid interval");
        assert_eq!(cfg.interval(), Duration::from_millis(250));
        assert_eq!(cfg.interval_label(), "0.25");
    }

    #[test]
    fn whole_seconds_print_without_fraction() {
        let cfg = WatchConfig::try_from(raw(5.0)).expect("valid interval");
        assert_eq!(cfg.interval_label(), "5");
    }

    #[test]
    fn rejects_non_positive_and_non_finite_intervals() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-12] {
            match WatchConfig::try_from(raw(bad)) {
                Err(PwatchError::ConfigError(_)) => {}
                other => panic!("expected ConfigError for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn flags_are_carried_through() {
        let cfg = WatchConfig::try_from(RawWatchConfig {
            interval_secs: 1.0,
            precise: true,
            hide_title: true,
            exit_on_error: true,
            exit_on_change: false,
        })
        .expect("valid config");

        assert!(cfg.precise());
        assert!(cfg.hide_title());
        assert!(cfg.exit_on_error());
        assert!(!cfg.exit_on_change());
        assert!(cfg.schedule().precise);
    }
}

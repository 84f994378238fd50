//! Session-relative time tracking.
//!
//! Frames must be processed in capture order; the clock enforces that by
//! rejecting timestamp regressions instead of silently reordering.

use crate::domain::{dt_sec, RecorderError};

/// Tracks the session start and the last observed frame timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionClock {
    start_us: Option<i64>,
    last_us: Option<i64>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new session at `ts_us`, discarding prior state.
    pub fn start(&mut self, ts_us: i64) {
        self.start_us = Some(ts_us);
        self.last_us = Some(ts_us);
    }

    pub fn is_started(&self) -> bool {
        self.start_us.is_some()
    }

    /// Observe a frame timestamp, returning seconds since session start.
    ///
    /// Equal timestamps are tolerated (some capture pipelines deliver
    /// duplicate presentation times); a strictly earlier timestamp is a
    /// regression and rejects the frame.
    pub fn observe(&mut self, ts_us: i64) -> Result<f64, RecorderError> {
        if let Some(last) = self.last_us {
            if ts_us < last {
                return Err(RecorderError::TimestampRegression {
                    now_us: ts_us,
                    last_us: last,
                });
            }
        }
        self.last_us = Some(ts_us);
        Ok(dt_sec(ts_us, self.start_us.unwrap_or(ts_us)))
    }

    /// Seconds between session start and `now_us`.
    pub fn session_duration(&self, now_us: i64) -> f64 {
        self.start_us.map_or(0.0, |start| dt_sec(now_us, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn relative_seconds_from_start() {
        let mut clock = SessionClock::new();
        clock.start(1_000_000);
        assert_relative_eq!(clock.observe(1_000_000).unwrap(), 0.0);
        assert_relative_eq!(clock.observe(1_500_000).unwrap(), 0.5);
        assert_relative_eq!(clock.session_duration(3_000_000), 2.0);
    }

    #[test]
    fn regression_is_rejected() {
        let mut clock = SessionClock::new();
        clock.start(1_000_000);
        clock.observe(2_000_000).unwrap();
        let err = clock.observe(1_999_999).unwrap_err();
        assert!(matches!(err, RecorderError::TimestampRegression { .. }));
        // The rejected frame does not advance the clock.
        assert_relative_eq!(clock.observe(2_000_000).unwrap(), 1.0);
    }

    #[test]
    fn restart_discards_history() {
        let mut clock = SessionClock::new();
        clock.start(1_000_000);
        clock.observe(5_000_000).unwrap();
        clock.start(10_000_000);
        assert_relative_eq!(clock.observe(10_000_000).unwrap(), 0.0);
    }
}

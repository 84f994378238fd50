//! Domain types for a camera PPG recording session.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Compute a time delta in microseconds with saturating subtraction.
/// If clocks go backwards (`now < last`), returns 0 instead of wrapping.
#[inline]
pub fn dt_us(now_us: i64, last_us: i64) -> u64 {
    if now_us >= last_us {
        (now_us - last_us) as u64
    } else {
        0
    }
}

/// Compute a time delta in seconds. Convenience wrapper around [`dt_us`].
#[inline]
pub fn dt_sec(now_us: i64, last_us: i64) -> f64 {
    (dt_us(now_us, last_us) as f64) / 1_000_000.0
}

/// Opaque identifier for one recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId([u8; 16]);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().into_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One averaged-color reading from one camera frame.
///
/// Channel averages are normalized to `[0, 1]`; the reduction from raw
/// pixels is the camera pipeline's job. Timestamps come from the capture
/// clock in microseconds and must be monotonically non-decreasing within a
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSample {
    pub ts_us: i64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// The externally persisted record: one per processed frame.
///
/// The HSV triple is absent on frames where the lens was not covered.
/// `bpm` is populated only on frames where a periodic recomputation
/// occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub ts_us: i64,
    /// Seconds since the session started.
    pub rel_sec: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    pub brightness: Option<f64>,
    pub is_covered: bool,
    pub bpm: Option<u32>,
}

/// Delivery class for recorder events.
///
/// Critical events are never dropped; high-frequency events may be shed
/// under backpressure with the drop counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPriority {
    Critical,
    HighFreq,
}

/// Events published by the recorder on its processing thread and consumed
/// by an observer (typically a display layer) on its own thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecorderEvent {
    SessionStarted {
        session_id: SessionId,
        ts_us: i64,
    },
    LensCoverageChanged {
        covered: bool,
    },
    BpmUpdated {
        bpm: u32,
        ts_us: i64,
    },
    SamplesFlushed {
        samples: Vec<HeartRateSample>,
    },
    SessionEnded {
        session_id: SessionId,
        ts_us: i64,
    },
    SessionFailed {
        reason: String,
    },
}

impl RecorderEvent {
    pub fn priority(&self) -> EventPriority {
        match self {
            RecorderEvent::SessionStarted { .. }
            | RecorderEvent::SessionEnded { .. }
            | RecorderEvent::SessionFailed { .. }
            | RecorderEvent::LensCoverageChanged { .. } => EventPriority::Critical,
            RecorderEvent::BpmUpdated { .. } | RecorderEvent::SamplesFlushed { .. } => {
                EventPriority::HighFreq
            }
        }
    }
}

/// Errors surfaced by the recorder.
///
/// Per-frame numeric edge cases (degenerate color, no estimate this cycle)
/// are normal outcomes, not errors, and never appear here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecorderError {
    #[error("camera sensor unavailable: {0}")]
    SensorUnavailable(String),
    #[error("frame timestamp regression: now={now_us} < last={last_us}")]
    TimestampRegression { now_us: i64, last_us: i64 },
}

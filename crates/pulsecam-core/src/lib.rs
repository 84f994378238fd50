//! # pulsecam-core
//!
//! Session layer for camera-based heart-rate recording: domain types,
//! the recording session controller, configuration, and the observation
//! surface (latest-value monitor plus event channel).
//!
//! The numeric pipeline itself lives in `pulsecam-signals`; this crate
//! feeds it frames in strict arrival order and publishes its results.
//!
//! ## Example
//!
//! ```
//! use pulsecam_core::{HeartRateRecorder, PixelSample, RecorderConfig};
//!
//! let (mut recorder, events) = HeartRateRecorder::new(RecorderConfig::default()).unwrap();
//! recorder.start(0);
//! recorder
//!     .process_frame(PixelSample { ts_us: 0, red: 0.8, green: 0.3, blue: 0.1 })
//!     .unwrap();
//! recorder.stop(33_333);
//!
//! // One flushed sample and the lifecycle events are now waiting.
//! assert!(events.try_iter().count() >= 3);
//! ```

pub mod buffer;
pub mod clock;
pub mod config;
pub mod domain;
pub mod monitor;
pub mod recorder;

pub use buffer::SignalBuffer;
pub use clock::SessionClock;
pub use config::{ConfigError, RecorderConfig};
pub use domain::{
    dt_sec, dt_us, EventPriority, HeartRateSample, PixelSample, RecorderError, RecorderEvent,
    SessionId,
};
pub use monitor::LiveMonitor;
pub use recorder::{HeartRateRecorder, RecorderMetrics, RecorderState};

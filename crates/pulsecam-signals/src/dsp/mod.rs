//! DSP primitives for the PPG heart-rate pipeline.
//!
//! The pipeline stages, in order:
//! - `BandpassFilter` isolates the heartbeat frequency band
//! - `median_smooth` suppresses single-sample motion spikes
//! - `scan_peaks` yields beat peaks with their inter-beat sample runs

mod bandpass;
mod peaks;
mod smoothing;

pub use bandpass::BandpassFilter;
pub use peaks::{scan_peaks, Peak};
pub use smoothing::median_smooth;

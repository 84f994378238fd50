//! # pulsecam-signals
//!
//! Signal processing for camera-based photoplethysmography (PPG).
//!
//! This crate provides:
//! - **Color conversion**: averaged RGB frame values to HSV, with
//!   lens-coverage classification (the hue channel carries the
//!   blood-volume pulse)
//! - **BPM estimation**: band-pass filtering, median smoothing, and peak
//!   counting over a trailing window of hue samples
//!
//! ## Example
//!
//! ```
//! use pulsecam_signals::{BpmEstimator, Hsv};
//!
//! let estimator = BpmEstimator::new();
//! let mut hues: Vec<f64> = Vec::new();
//!
//! // Add hue samples as camera frames arrive
//! if let Some(hsv) = Hsv::from_rgb(0.83, 0.24, 0.11) {
//!     hues.push(hsv.hue);
//! }
//!
//! // Estimates are available once the warm-up window has accumulated
//! assert_eq!(estimator.estimate(&hues), None);
//! ```

pub mod color;
pub mod dsp;
pub mod estimator;

pub use color::Hsv;
pub use dsp::{median_smooth, scan_peaks, BandpassFilter, Peak};
pub use estimator::{BpmEstimator, EstimatorConfig};

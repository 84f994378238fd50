//! Windowed BPM estimation over the buffered hue series.
//!
//! The estimator is pure over its input slice: it takes the trailing
//! window, runs band-pass filtering, median smoothing, and the peak scan,
//! then converts the 2/3-rank inter-beat run into an integer BPM. Callers
//! are expected to invoke it at most once per second of session time.

use ndarray::Array1;

use crate::dsp::{median_smooth, scan_peaks, BandpassFilter};

/// Configuration for windowed BPM estimation.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Camera frame rate in frames per second.
    pub frame_rate: u32,
    /// Seconds of samples discarded for filter settling before the first
    /// estimate.
    pub settle_seconds: u32,
    /// Seconds of samples in the estimation window.
    pub window_seconds: u32,
    /// Estimates below this are physiologically implausible and reported
    /// as no estimate.
    pub min_bpm: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            settle_seconds: 3,
            window_seconds: 10,
            min_bpm: 40,
        }
    }
}

/// Heart-rate estimator over a trailing hue-sample window.
pub struct BpmEstimator {
    config: EstimatorConfig,
}

impl BpmEstimator {
    /// Create an estimator with the default 30 fps configuration.
    pub fn new() -> Self {
        Self::with_config(EstimatorConfig::default())
    }

    pub fn with_config(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Number of samples that must accumulate before the first estimate,
    /// covering filter settling plus one full window.
    pub fn min_samples(&self) -> usize {
        ((self.config.settle_seconds + self.config.window_seconds) * self.config.frame_rate)
            as usize
    }

    /// Length of the trailing estimation window in samples.
    pub fn window_len(&self) -> usize {
        (self.config.window_seconds * self.config.frame_rate) as usize
    }

    /// Estimate BPM over the trailing window of `samples`.
    ///
    /// Returns `None` until the warm-up sample count has accumulated, when
    /// no peaks are found in the window, or when the result is below the
    /// plausibility floor.
    pub fn estimate(&self, samples: &[f64]) -> Option<u32> {
        if samples.len() < self.min_samples() || self.window_len() == 0 {
            return None;
        }

        let window = &samples[samples.len() - self.window_len()..];
        let filtered = BandpassFilter::filter(window);
        let smoothed = median_smooth(&filtered);
        let peaks = scan_peaks(&smoothed);
        if peaks.is_empty() {
            return None;
        }

        let mut runs: Vec<usize> = peaks.iter().map(|p| p.run).collect();
        runs.sort_unstable();
        // Rank biased past the true median, toward the later and more
        // stable inter-beat runs.
        let selected = runs[runs.len() * 2 / 3];
        if selected == 0 {
            return None;
        }

        let bpm = 60 * self.config.frame_rate / selected as u32;
        (bpm >= self.config.min_bpm).then_some(bpm)
    }

    /// [`estimate`](Self::estimate) over an `ndarray` signal.
    pub fn estimate_array(&self, samples: &Array1<f64>) -> Option<u32> {
        match samples.as_slice() {
            Some(slice) => self.estimate(slice),
            None => self.estimate(&samples.to_vec()),
        }
    }
}

impl Default for BpmEstimator {
    fn default() -> Self {
        Self::new()
    }
}

//! The per-session hue time series.

/// Append-only hue buffer for one recording session.
///
/// One value per processed frame, in strict arrival order; uncovered
/// frames contribute a sentinel instead of a hue. The buffer grows for the
/// whole session and is only cleared at a session boundary; estimation
/// reads a trailing window, it never evicts.
#[derive(Debug, Default)]
pub struct SignalBuffer {
    samples: Vec<f64>,
}

impl SignalBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hue: f64) {
        self.samples.push(hue);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Clear the buffer for a new session.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

//! 4th-order Butterworth band-pass filter.
//!
//! Direct-form recursive (IIR) filter with fixed coefficients designed for
//! a 30 fps camera stream and a 0.667-4.167 Hz passband (40-250 BPM).
//! Everything downstream (smoothing thresholds, peak spacing, the rank
//! selection) is tuned against this exact coefficient set; do not swap in
//! a re-derived design.

/// Gain normalization applied to each input sample.
const GAIN: f64 = 1.232232910e+02;

/// Feedback coefficients applied to the output delay line, oldest first.
const FEEDBACK: [f64; 8] = [
    -0.1397436053,
    1.2948188815,
    -5.4070037946,
    13.2683981280,
    -20.4389575985,
    20.2386205585,
    -12.8597596208,
    4.8058411841,
];

/// Stateful band-pass filter over a sample stream.
///
/// Maintains two 9-element delay lines (input history `xv`, output history
/// `yv`) with shift-and-append updates. State is zeroed at construction, so
/// filtering a given sequence from a fresh filter is fully deterministic.
#[derive(Debug, Clone)]
pub struct BandpassFilter {
    xv: [f64; 9],
    yv: [f64; 9],
}

impl BandpassFilter {
    pub fn new() -> Self {
        BandpassFilter {
            xv: [0.0; 9],
            yv: [0.0; 9],
        }
    }

    /// Feed one input sample, returning the filtered output sample.
    pub fn push(&mut self, input: f64) -> f64 {
        self.xv.copy_within(1.., 0);
        self.xv[8] = input / GAIN;
        self.yv.copy_within(1.., 0);

        let xv = &self.xv;
        let mut out = (xv[0] + xv[8]) - 4.0 * (xv[2] + xv[6]) + 6.0 * xv[4];
        for (coeff, y) in FEEDBACK.iter().zip(self.yv.iter()) {
            out += coeff * y;
        }
        self.yv[8] = out;
        out
    }

    /// Filter a whole series from zeroed state.
    pub fn filter(input: &[f64]) -> Vec<f64> {
        let mut filter = BandpassFilter::new();
        input.iter().map(|&x| filter.push(x)).collect()
    }
}

impl Default for BandpassFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, fs: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * freq_hz * i as f64 / fs).sin()).collect()
    }

    fn peak_amplitude(tail: &[f64]) -> f64 {
        tail.iter().fold(0.0f64, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn zero_input_zero_output() {
        let out = BandpassFilter::filter(&[0.0; 120]);
        assert!(out.iter().all(|&y| y == 0.0));
    }

    #[test]
    fn rejects_dc() {
        let out = BandpassFilter::filter(&[1.0; 600]);
        // Band-pass nulls DC once the transient has settled.
        assert!(peak_amplitude(&out[500..]) < 0.05, "residual DC: {:?}", peak_amplitude(&out[500..]));
    }

    #[test]
    fn passes_heartbeat_band_attenuates_outside() {
        let fs = 30.0;
        let n = 600;
        let in_band = BandpassFilter::filter(&sine(1.5, fs, n));
        let above_band = BandpassFilter::filter(&sine(10.0, fs, n));

        let in_amp = peak_amplitude(&in_band[300..]);
        let out_amp = peak_amplitude(&above_band[300..]);
        assert!(in_amp > 0.5, "passband amplitude too low: {}", in_amp);
        assert!(out_amp < 0.2, "stopband amplitude too high: {}", out_amp);
        assert!(in_amp > 4.0 * out_amp);
    }

    #[test]
    fn streaming_matches_whole_slice() {
        let input = sine(1.2, 30.0, 200);
        let whole = BandpassFilter::filter(&input);
        let mut filter = BandpassFilter::new();
        let streamed: Vec<f64> = input.iter().map(|&x| filter.push(x)).collect();
        assert_eq!(whole.len(), streamed.len());
        for (a, b) in whole.iter().zip(streamed.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    proptest! {
        #[test]
        fn filter_is_deterministic(input in proptest::collection::vec(-1.0f64..1.0, 1..400)) {
            let first = BandpassFilter::filter(&input);
            let second = BandpassFilter::filter(&input);
            for (a, b) in first.iter().zip(second.iter()) {
                prop_assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }
}

//! Median smoothing for the filtered PPG series.

/// Replace each interior sample with the median of the 5-sample window
/// centered on it. The first 3 and last 3 samples pass through unchanged.
///
/// Suppresses single-sample spikes from motion artifacts without smearing
/// beat peaks the way a moving average would. Series shorter than 7 samples
/// are returned unchanged.
pub fn median_smooth(input: &[f64]) -> Vec<f64> {
    if input.len() < 7 {
        return input.to_vec();
    }

    let mut output = Vec::with_capacity(input.len());
    output.extend_from_slice(&input[..3]);
    for i in 3..input.len() - 3 {
        let mut window = [
            input[i - 2],
            input[i - 1],
            input[i],
            input[i + 1],
            input[i + 2],
        ];
        window.sort_by(|a, b| a.total_cmp(b));
        output.push(window[2]);
    }
    output.extend_from_slice(&input[input.len() - 3..]);
    output
}

//! RGB to HSV conversion for PPG extraction.
//!
//! The averaged color of a flash-illuminated fingertip frame carries the
//! blood-volume pulse in its hue channel. Coverage classification falls out
//! of the same conversion: a covered lens produces a strongly red-saturated
//! average, while an uncovered lens washes out to near-gray and has no
//! discernible hue.

use serde::{Deserialize, Serialize};

/// One averaged camera frame converted to HSV color space.
///
/// Hue is in degrees `[0, 360)`, saturation and brightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Hsv {
    /// Convert normalized RGB channel averages to HSV.
    ///
    /// Returns `None` when the color is degenerate: a channel delta that
    /// rounds to zero at 3-decimal precision has no discernible hue, which
    /// classifies the frame as "lens not covered".
    pub fn from_rgb(red: f64, green: f64, blue: f64) -> Option<Hsv> {
        let min = red.min(green).min(blue);
        let max = red.max(green).max(blue);
        let delta = max - min;

        if (delta * 1000.0).round() == 0.0 {
            return None;
        }

        let mut hue = if red == max {
            (green - blue) / delta
        } else if green == max {
            2.0 + (blue - red) / delta
        } else {
            4.0 + (red - green) / delta
        };
        hue *= 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }

        Some(Hsv {
            hue,
            saturation: delta / max,
            brightness: max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn primary_hues() {
        let red = Hsv::from_rgb(1.0, 0.0, 0.0).unwrap();
        assert_relative_eq!(red.hue, 0.0);
        assert_relative_eq!(red.saturation, 1.0);
        assert_relative_eq!(red.brightness, 1.0);

        let green = Hsv::from_rgb(0.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(green.hue, 120.0);

        let blue = Hsv::from_rgb(0.0, 0.0, 1.0).unwrap();
        assert_relative_eq!(blue.hue, 240.0);

        let yellow = Hsv::from_rgb(1.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(yellow.hue, 60.0);
    }

    #[test]
    fn negative_hue_wraps() {
        // Red max with blue above green lands negative before the wrap.
        let magenta_ish = Hsv::from_rgb(1.0, 0.0, 0.5).unwrap();
        assert_relative_eq!(magenta_ish.hue, 330.0);
    }

    #[test]
    fn fingertip_tone() {
        // Typical flash-through-finger average: red-dominant, dim.
        let hsv = Hsv::from_rgb(0.83, 0.24, 0.11).unwrap();
        assert_relative_eq!(hsv.hue, 60.0 * (0.24 - 0.11) / 0.72, epsilon = 1e-2);
        assert_relative_eq!(hsv.saturation, 0.72 / 0.83, epsilon = 1e-9);
        assert_relative_eq!(hsv.brightness, 0.83, epsilon = 1e-9);
    }

    #[test]
    fn exact_gray_is_degenerate() {
        assert!(Hsv::from_rgb(0.5, 0.5, 0.5).is_none());
        assert!(Hsv::from_rgb(0.0, 0.0, 0.0).is_none());
        assert!(Hsv::from_rgb(1.0, 1.0, 1.0).is_none());
    }

    #[test]
    fn near_gray_rounds_to_degenerate() {
        // delta = 0.0004 rounds to zero at 3-decimal precision
        assert!(Hsv::from_rgb(0.5004, 0.5, 0.5).is_none());
        // delta = 0.001 does not
        assert!(Hsv::from_rgb(0.501, 0.5, 0.5).is_some());
    }

    #[test]
    fn conversion_is_deterministic() {
        let a = Hsv::from_rgb(0.71, 0.33, 0.19).unwrap();
        let b = Hsv::from_rgb(0.71, 0.33, 0.19).unwrap();
        assert_eq!(a.hue.to_bits(), b.hue.to_bits());
        assert_eq!(a.saturation.to_bits(), b.saturation.to_bits());
        assert_eq!(a.brightness.to_bits(), b.brightness.to_bits());
    }
}

//! Displacement colour mapping
//!
//! Pure functions mapping a normalized scalar through a cold-to-hot "jet"
//! spectrum: deep blue at 0, through cyan, green and yellow, to deep red at 1.

use serde::{Deserialize, Serialize};

/// An RGB colour with 0-255 channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Evaluate the jet palette at `t`, clamped to [0, 1]
pub fn jet(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    Rgb {
        r: channel(1.5 - (4.0 * t - 3.0).abs()),
        g: channel(1.5 - (4.0 * t - 2.0).abs()),
        b: channel(1.5 - (4.0 * t - 1.0).abs()),
    }
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Colour for a displacement magnitude, normalized against the result set's
/// maximum
///
/// A zero maximum normalizes to 0 rather than dividing by zero.
pub fn displacement_color(value: f64, max: f64) -> Rgb {
    let normalized = if max == 0.0 { 0.0 } else { value / max };
    jet(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_endpoints() {
        assert_eq!(jet(0.0), Rgb::new(0, 0, 128));
        assert_eq!(jet(1.0), Rgb::new(128, 0, 0));
    }

    #[test]
    fn test_palette_midpoint_is_green_dominated() {
        let mid = jet(0.5);
        assert_eq!(mid.g, 255);
        assert_eq!(mid.r, mid.b);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(jet(-1.0), jet(0.0));
        assert_eq!(jet(2.0), jet(1.0));
    }

    #[test]
    fn test_zero_maximum_normalizes_to_zero() {
        assert_eq!(displacement_color(0.0, 0.0), jet(0.0));
    }

    #[test]
    fn test_value_at_maximum_maps_to_hot_end() {
        assert_eq!(displacement_color(0.004, 0.004), jet(1.0));
    }
}

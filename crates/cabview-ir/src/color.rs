//! RGB + intensity color blocks.

use cabview_math::Rgba;
use serde::{Deserialize, Serialize};

fn full_channel() -> i32 {
    255
}

/// An RGB color with an optional HDR intensity, as written in description
/// documents (`color: { r: 255, g: 0, b: 0, intensity: 2 }`).
///
/// Channels are integers in `0..=255` and default to 255, so an empty block
/// is white. Out-of-range channels are clamped when converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorData {
    /// Red channel.
    #[serde(default = "full_channel")]
    pub r: i32,
    /// Green channel.
    #[serde(default = "full_channel")]
    pub g: i32,
    /// Blue channel.
    #[serde(default = "full_channel")]
    pub b: i32,
    /// Intensity exponent; the emission value is scaled by `2^intensity`.
    /// May be negative to darken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<i32>,
}

impl Default for ColorData {
    fn default() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            intensity: None,
        }
    }
}

impl ColorData {
    /// Create a color without intensity.
    pub fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self {
            r,
            g,
            b,
            intensity: None,
        }
    }

    /// Set the intensity exponent.
    pub fn with_intensity(mut self, intensity: i32) -> Self {
        self.intensity = Some(intensity);
        self
    }

    /// The normalized color, alpha 1.
    pub fn color(&self) -> Rgba {
        Rgba::from_rgb8(clamp(self.r), clamp(self.g), clamp(self.b))
    }

    /// The HDR emission color: `color() * 2^intensity`, or `color()` when
    /// no intensity is set.
    pub fn emission_value(&self) -> Rgba {
        match self.intensity {
            None => self.color(),
            Some(i) => self.color().scaled(2f32.powi(i)),
        }
    }
}

fn clamp(channel: i32) -> u8 {
    channel.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabview_math::Tolerance;

    #[test]
    fn default_is_white() {
        let c = ColorData::default();
        assert_eq!(c.color(), Rgba::WHITE);
    }

    #[test]
    fn emission_without_intensity_is_plain_color() {
        let c = ColorData::rgb(10, 128, 200);
        assert_eq!(c.emission_value(), c.color());
    }

    #[test]
    fn emission_scales_by_power_of_two() {
        let tol = Tolerance::DEFAULT;
        for i in [-3, -1, 0, 1, 2, 5] {
            let c = ColorData::rgb(255, 51, 0).with_intensity(i);
            let expected = c.color().scaled(2f32.powi(i));
            assert!(tol.colors_equal(&c.emission_value(), &expected), "intensity {i}");
        }
        let c = ColorData::rgb(255, 255, 255).with_intensity(2);
        assert!((c.emission_value().r - 4.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_channels_clamp() {
        let c = ColorData::rgb(300, -20, 255);
        assert_eq!(c.color(), Rgba::new(1.0, 0.0, 1.0, 1.0));
    }
}

//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).
//! The anomaly color scale is the diverging red/blue mapping the whole
//! animation is built around.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if `domain` min and max are equal.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "Domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Diverging red/blue color scale over normalized anomalies in `[-1, 1]`.
///
/// Negative values map to blue, non-negative to red. Both the color channel
/// and the alpha grow linearly with magnitude, so a magnitude of zero sits at
/// the near-transparent neutral boundary between the two hues and composites
/// to the background color.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyScale {
    /// Fraction of the channel driven by magnitude (rest is the floor).
    color_blend: f32,
    /// Fraction of the alpha driven by magnitude (rest is the floor).
    alpha_blend: f32,
}

impl Default for AnomalyScale {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyScale {
    /// Create the scale with the default blend constants.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color_blend: 0.85,
            alpha_blend: 0.9,
        }
    }

    /// Create a scale with custom blend constants in `[0, 1]`.
    #[must_use]
    pub fn with_blend(color_blend: f32, alpha_blend: f32) -> Self {
        Self {
            color_blend: color_blend.clamp(0.0, 1.0),
            alpha_blend: alpha_blend.clamp(0.0, 1.0),
        }
    }
}

impl Scale<f32, Rgba> for AnomalyScale {
    fn scale(&self, value: f32) -> Rgba {
        let value = value.clamp(-1.0, 1.0);
        let magnitude = value.abs();

        let channel = magnitude * self.color_blend + (1.0 - self.color_blend);
        let alpha = magnitude * self.alpha_blend + (1.0 - self.alpha_blend);

        let c = (channel * 255.0).round() as u8;
        let a = (alpha * 255.0).round() as u8;

        if value < 0.0 {
            Rgba::new(0, 0, c, a)
        } else {
            Rgba::new(c, 0, 0, a)
        }
    }

    fn domain(&self) -> (f32, f32) {
        (-1.0, 1.0)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (self.scale(-1.0), self.scale(1.0))
    }
}

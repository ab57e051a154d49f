//! Daily interpolation over the monthly anomaly sequence.
//!
//! The dataset samples one value per month; the animation needs values at a
//! much finer resolution. [`InterpolatedSeries`] treats the monthly values as
//! samples spaced [`DAYS_PER_MONTH`] apart on a continuous day axis and
//! interpolates between adjacent samples. Positions outside the sampled span
//! clamp to the first/last value.
//!
//! At exact monthly boundaries the interpolated value equals the original
//! sample, for any easing.

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Days assigned to each monthly sample on the continuous day axis.
pub const DAYS_PER_MONTH: u32 = 30;

/// Blend curve applied to the fractional position between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Straight linear interpolation.
    #[default]
    Linear,
    /// Cubic smoothstep: eases in and out of each sample, holding visibly
    /// longer near the sampled values.
    Smooth,
}

impl Easing {
    /// Map a fractional position in `[0, 1]` through the curve.
    ///
    /// Both curves fix the endpoints: `apply(0) == 0` and `apply(1) == 1`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Continuous day-position to anomaly mapping, built once and read-only.
#[derive(Debug, Clone)]
pub struct InterpolatedSeries {
    /// Monthly samples, year-major.
    samples: Vec<f32>,
    easing: Easing,
}

impl InterpolatedSeries {
    /// Build a series from raw monthly samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if `samples` is empty.
    pub fn new(samples: Vec<f32>, easing: Easing) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(Self { samples, easing })
    }

    /// Build a series from a dataset's normalized monthly values.
    ///
    /// Normalized values are in `[-1, 1]`, year-major; a dataset always has
    /// at least one complete year.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset, easing: Easing) -> Self {
        Self {
            samples: dataset.normalized_monthly(),
            easing,
        }
    }

    /// Number of monthly samples backing the series.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of day positions the series spans (inclusive of both ends).
    #[must_use]
    pub fn day_count(&self) -> u32 {
        (self.samples.len() as u32 - 1) * DAYS_PER_MONTH + 1
    }

    /// Value at a continuous month position (sample index + fraction).
    #[must_use]
    pub fn value_at_month(&self, month_pos: f32) -> f32 {
        let last = self.samples.len() - 1;
        let pos = month_pos.clamp(0.0, last as f32);
        let index = pos.floor() as usize;

        if index >= last {
            return self.samples[last];
        }

        let t = self.easing.apply(pos - index as f32);
        let a = self.samples[index];
        let b = self.samples[index + 1];
        a + (b - a) * t
    }

    /// Value at a continuous day position.
    ///
    /// Day `k * DAYS_PER_MONTH` is exactly the `k`-th monthly sample;
    /// positions outside the span clamp to the edge samples.
    #[must_use]
    pub fn value_at(&self, day: f32) -> f32 {
        self.value_at_month(day / DAYS_PER_MONTH as f32)
    }

    /// Lazy, restartable iterator over `(day-position, value)` at daily
    /// resolution.
    #[must_use]
    pub fn days(&self) -> DaySamples<'_> {
        DaySamples {
            series: self,
            next_day: 0,
        }
    }
}

/// Iterator over `(day-position, value)` pairs of an [`InterpolatedSeries`].
///
/// Returned by [`InterpolatedSeries::days`]; calling that again restarts
/// from day zero.
#[derive(Debug, Clone)]
pub struct DaySamples<'a> {
    series: &'a InterpolatedSeries,
    next_day: u32,
}

impl Iterator for DaySamples<'_> {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_day >= self.series.day_count() {
            return None;
        }
        let day = self.next_day as f32;
        self.next_day += 1;
        Some((day, self.series.value_at(day)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.series.day_count() - self.next_day) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DaySamples<'_> {}

//! Input boundary - raw slider values to validated input signals

use crate::error::{GateError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Range of the input slider.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputRange {
    /// Lower bound (inclusive).
    pub min: f32,

    /// Upper bound (inclusive).
    pub max: f32,

    /// Value the slider starts at.
    pub initial: f32,
}

impl InputRange {
    pub fn new(min: f32, max: f32, initial: f32) -> Self {
        Self { min, max, initial }
    }

    /// Clamp a finite value into the range.
    ///
    /// Never panics; on an unvalidated range `max` wins over `min`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Validate bounds and initial value.
    pub fn validate(&self) -> Result<()> {
        let bounded = self.min.is_finite() && self.max.is_finite() && self.min < self.max;
        if !bounded || !self.initial.is_finite() || !self.contains(self.initial) {
            return Err(GateError::InvalidInputRange {
                min: self.min,
                max: self.max,
                initial: self.initial,
            });
        }
        Ok(())
    }
}

impl Default for InputRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            initial: 0.0,
        }
    }
}

/// A finite input value that has passed the boundary.
///
/// Only constructible through [`InputSignal::new`], which rejects
/// `NaN`/`Infinity` and clamps into the slider range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InputSignal(f32);

impl InputSignal {
    pub fn new(raw: f32, range: &InputRange) -> Result<Self> {
        if !raw.is_finite() {
            tracing::warn!(value = raw, "rejected non-finite input");
            return Err(GateError::NonFiniteInput { value: raw });
        }
        range.validate()?;
        // `+ 0.0` folds -0.0 into 0.0
        Ok(Self(range.clamp(raw) + 0.0))
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }
}

/// Slider readout text, two decimals.
///
/// Exact ties round away from zero and negative zero prints as `0.00`,
/// the way a browser's `toFixed(2)` renders the slider value.
pub fn format_readout(value: f32) -> String {
    let rounded = (f64::from(value) * 100.0).round() / 100.0;
    format!("{:.2}", rounded + 0.0)
}

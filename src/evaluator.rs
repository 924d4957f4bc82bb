//! Perceptron evaluator - weighted sum and Heaviside step
//!
//! One input, one weight, one bias. With the NOT gate constants the decision
//! boundary sits at `x = 0.5`:
//!
//! | x   | weighted sum | output |
//! |-----|--------------|--------|
//! | 0.0 | 5.0          | 1      |
//! | 0.5 | 0.0          | 1      |
//! | 1.0 | -5.0         | 0      |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weight on the single input of the NOT gate.
pub const NOT_GATE_WEIGHT: f32 = -10.0;

/// Bias of the NOT gate.
pub const NOT_GATE_BIAS: f32 = 5.0;

/// Fixed weight and bias of a single-input perceptron.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GateParameters {
    pub weight: f32,
    pub bias: f32,
}

impl GateParameters {
    /// The NOT gate: `w1 = -10`, `b = 5`.
    pub const NOT_GATE: Self = Self {
        weight: NOT_GATE_WEIGHT,
        bias: NOT_GATE_BIAS,
    };

    /// Linear pre-activation `x * weight + bias`.
    #[inline]
    pub fn weighted_sum(&self, x: f32) -> f32 {
        x * self.weight + self.bias
    }

    /// Input at which the weighted sum is exactly zero.
    pub fn crossover(&self) -> f32 {
        -self.bias / self.weight
    }

    /// Outputs for the Boolean inputs 0 and 1, in that order.
    pub fn truth_table(&self) -> [(u8, GateOutput); 2] {
        [
            (0, evaluate(0.0, self).output),
            (1, evaluate(1.0, self).output),
        ]
    }
}

impl Default for GateParameters {
    fn default() -> Self {
        Self::NOT_GATE
    }
}

/// Binary perceptron output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GateOutput {
    Zero,
    One,
}

impl GateOutput {
    /// Output as the bit 0 or 1.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            GateOutput::Zero => 0,
            GateOutput::One => 1,
        }
    }

    /// Output as a render intensity, exactly 0.0 or 1.0.
    #[inline]
    pub fn intensity(self) -> f32 {
        match self {
            GateOutput::Zero => 0.0,
            GateOutput::One => 1.0,
        }
    }

    #[inline]
    pub fn is_on(self) -> bool {
        self == GateOutput::One
    }
}

/// Weighted sum and thresholded output for one input value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationResult {
    pub weighted_sum: f32,
    pub output: GateOutput,
}

/// Heaviside step, closed at zero: `step(0.0)` is `One`.
///
/// `NaN` maps to `Zero` since it compares false against zero. Non-finite
/// inputs are rejected before they reach the evaluator (see
/// [`InputSignal`](crate::InputSignal)), so this only matters for callers
/// using `step` directly.
#[inline]
pub fn step(sum: f32) -> GateOutput {
    if sum >= 0.0 {
        GateOutput::One
    } else {
        GateOutput::Zero
    }
}

/// Evaluate the perceptron for input `x`.
///
/// Pure and total for finite input; no bounds are assumed on `x`.
pub fn evaluate(x: f32, params: &GateParameters) -> EvaluationResult {
    let weighted_sum = params.weighted_sum(x);
    EvaluationResult {
        weighted_sum,
        output: step(weighted_sum),
    }
}

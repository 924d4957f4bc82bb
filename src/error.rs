//! Error types for the gate boundary and configuration

use thiserror::Error;

/// Errors raised where raw values enter the crate.
///
/// Evaluation and snapshot derivation never fail; everything here is a
/// boundary rejection.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("input must be finite, got {value}")]
    NonFiniteInput { value: f32 },

    #[error("invalid input range: min={min}, max={max}, initial={initial}")]
    InvalidInputRange { min: f32, max: f32, initial: f32 },

    #[error("subsection {index}: {reason}")]
    InvalidSubsection { index: usize, reason: &'static str },

    #[cfg(feature = "toml")]
    #[error("failed to parse controller config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result alias for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;

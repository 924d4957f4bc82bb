//! Controller configuration

use crate::error::{GateError, Result};
use crate::input::InputRange;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of subsection nodes hanging off the output node.
pub const SUBSECTION_COUNT: usize = 3;

/// A navigable subsection node: its label and where a click leads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubsectionTarget {
    /// Text of the label sprite under the node.
    pub label: String,

    /// URI handed to the navigator on an honored click.
    pub destination: String,
}

impl SubsectionTarget {
    pub fn new(label: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            destination: destination.into(),
        }
    }
}

/// Configuration for an activation controller.
///
/// Gate weight and bias are deliberately absent; they are fixed by
/// [`GateParameters::NOT_GATE`](crate::GateParameters::NOT_GATE).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Slider bounds and starting value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub input_range: InputRange,

    /// One target per subsection node, top to bottom.
    pub subsections: [SubsectionTarget; SUBSECTION_COUNT],
}

impl ControllerConfig {
    /// Create a configuration with the default slider range.
    pub fn new(subsections: [SubsectionTarget; SUBSECTION_COUNT]) -> Self {
        Self {
            input_range: InputRange::default(),
            subsections,
        }
    }

    pub fn with_input_range(mut self, input_range: InputRange) -> Self {
        self.input_range = input_range;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        self.input_range.validate()?;
        for (index, target) in self.subsections.iter().enumerate() {
            if target.label.trim().is_empty() {
                return Err(GateError::InvalidSubsection {
                    index,
                    reason: "label must not be empty",
                });
            }
            if target.destination.trim().is_empty() {
                return Err(GateError::InvalidSubsection {
                    index,
                    reason: "destination must not be empty",
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// ```toml
    /// [input_range]
    /// min = 0.0
    /// max = 1.0
    /// initial = 0.0
    ///
    /// [[subsections]]
    /// label = "Section 1"
    /// destination = "section1.html"
    /// # ...exactly three entries
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new([
            SubsectionTarget::new("Section 1", "section1.html"),
            SubsectionTarget::new("Section 2", "section2.html"),
            SubsectionTarget::new("Section 3", "section3.html"),
        ])
    }
}

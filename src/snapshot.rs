//! State snapshot - the full visual/interaction state for one evaluation
//!
//! A snapshot is derived from scratch for every input value; nothing is
//! carried over from the previous one.

use crate::config::{SubsectionTarget, SUBSECTION_COUNT};
use crate::evaluator::EvaluationResult;
use crate::input::format_readout;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Primary edge opacity factor: `min(input, output) * 0.5`.
pub const PRIMARY_EDGE_FACTOR: f32 = 0.5;

/// Output-to-subsection edge opacity factor: `output * 0.3`.
pub const DEPENDENT_EDGE_FACTOR: f32 = 0.3;

/// Emissive factor of the input and output nodes.
pub const NODE_EMISSIVE_FACTOR: f32 = 0.5;

/// Emissive factor of the subsection nodes.
pub const SUBSECTION_EMISSIVE_FACTOR: f32 = 0.4;

/// Identity of a node in the fixed topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeRole {
    Input,
    Output,
    /// Subsection node by index, top to bottom.
    Subsection(usize),
}

/// Two-state machine of the output-dependent cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActivationState {
    /// Dim, not navigable, label hidden.
    Dormant,
    /// Full opacity, navigable, label visible.
    Active,
}

impl ActivationState {
    pub fn from_activated(activated: bool) -> Self {
        if activated {
            ActivationState::Active
        } else {
            ActivationState::Dormant
        }
    }

    pub fn is_active(self) -> bool {
        self == ActivationState::Active
    }
}

/// Render state of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeVisual {
    pub role: NodeRole,
    /// Opacity, nominally in [0, 1].
    pub intensity: f32,
    pub emissive: f32,
    pub activated: bool,
}

/// Render state of an edge. Edges carry no state of their own.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeVisual {
    pub source: NodeRole,
    pub target: NodeRole,
    pub opacity: f32,
}

/// A subsection node with its edge, label and navigation target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubsectionVisual {
    pub target: SubsectionTarget,
    pub node: NodeVisual,
    pub edge: EdgeVisual,
    pub label_visible: bool,
}

impl SubsectionVisual {
    #[inline]
    pub fn activated(&self) -> bool {
        self.node.activated
    }

    pub fn state(&self) -> ActivationState {
        ActivationState::from_activated(self.node.activated)
    }
}

/// Complete visual/interaction state derived from one evaluation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateSnapshot {
    pub input_value: f32,
    pub evaluation: EvaluationResult,
    pub input: NodeVisual,
    pub output: NodeVisual,
    pub primary_edge: EdgeVisual,
    pub subsections: [SubsectionVisual; SUBSECTION_COUNT],
}

impl StateSnapshot {
    /// Derive the snapshot for input `x` and its evaluation.
    ///
    /// `x` is used as the input intensity unclamped; clamping happens at the
    /// input boundary.
    pub fn derive(
        x: f32,
        result: &EvaluationResult,
        targets: &[SubsectionTarget; SUBSECTION_COUNT],
    ) -> Self {
        let input_intensity = x;
        let output_intensity = result.output.intensity();
        let activated = output_intensity > 0.0;

        let input = NodeVisual {
            role: NodeRole::Input,
            intensity: input_intensity,
            emissive: input_intensity * NODE_EMISSIVE_FACTOR,
            activated: false,
        };
        let output = NodeVisual {
            role: NodeRole::Output,
            intensity: output_intensity,
            emissive: output_intensity * NODE_EMISSIVE_FACTOR,
            activated,
        };
        let primary_edge = EdgeVisual {
            source: NodeRole::Input,
            target: NodeRole::Output,
            opacity: input_intensity.min(output_intensity) * PRIMARY_EDGE_FACTOR,
        };

        let subsections = std::array::from_fn(|index| {
            let role = NodeRole::Subsection(index);
            SubsectionVisual {
                target: targets[index].clone(),
                node: NodeVisual {
                    role,
                    intensity: output_intensity,
                    emissive: output_intensity * SUBSECTION_EMISSIVE_FACTOR,
                    activated,
                },
                edge: EdgeVisual {
                    source: NodeRole::Output,
                    target: role,
                    opacity: output_intensity * DEPENDENT_EDGE_FACTOR,
                },
                label_visible: activated,
            }
        });

        Self {
            input_value: x,
            evaluation: *result,
            input,
            output,
            primary_edge,
            subsections,
        }
    }

    /// State shared by the whole subsection cluster.
    pub fn cluster_state(&self) -> ActivationState {
        ActivationState::from_activated(self.output.activated)
    }

    pub fn subsection(&self, index: usize) -> Option<&SubsectionVisual> {
        self.subsections.get(index)
    }

    /// Whether a click on subsection `index` would be honored right now.
    pub fn is_navigable(&self, index: usize) -> bool {
        self.subsection(index).map_or(false, SubsectionVisual::activated)
    }

    /// Visual state of any node in the topology.
    pub fn node(&self, role: NodeRole) -> Option<&NodeVisual> {
        match role {
            NodeRole::Input => Some(&self.input),
            NodeRole::Output => Some(&self.output),
            NodeRole::Subsection(index) => self.subsection(index).map(|s| &s.node),
        }
    }

    /// All four edges, primary first.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeVisual> {
        std::iter::once(&self.primary_edge).chain(self.subsections.iter().map(|s| &s.edge))
    }

    /// Slider readout for the input value.
    pub fn input_readout(&self) -> String {
        format_readout(self.input_value)
    }
}

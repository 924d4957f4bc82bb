//! Perceptron Gate - a single-neuron NOT gate for 3D visualization
//!
//! One slider, one neuron, one threshold. The input value drives a fixed
//! perceptron (`w1 = -10`, `b = 5`); its binary output decides whether the
//! cluster of subsection nodes hanging off the output node is lit and
//! clickable.
//!
//! # Core Types
//!
//! - **GateParameters / evaluate**: weighted sum and Heaviside step
//! - **StateSnapshot**: full visual/interaction state for one input
//! - **ActivationController**: evaluates, publishes snapshots, resolves clicks
//! - **SceneContext**: layout, viewport and the per-frame render tick
//!
//! # Architecture: Controller / Renderer / Navigator
//!
//! 1. **Controller** - the only writer. Every input change rebuilds the
//!    snapshot and swaps it in whole.
//! 2. **Renderer** - reads the latest snapshot each frame through a
//!    [`SnapshotReader`] and applies it to a real scene.
//! 3. **Navigator** - receives the destination of an honored click.
//!
//! Nothing here depends on a rendering engine. Picking, projection and
//! drawing belong to whoever implements [`SceneRenderer`] and [`Picker`].
//!
//! # States
//!
//! The subsection cluster is either **Dormant** (output 0: dim, labels hidden,
//! clicks ignored) or **Active** (output 1: lit, labels shown, clicks
//! navigate). Transitions happen in the same update as the input change.
//!
//! # Example
//!
//! ```rust
//! use perceptron_gate::{
//!     ActivationController, ActivationEvent, ControllerConfig, FnObserver, NodeRole, PickHit,
//! };
//! use std::sync::Arc;
//!
//! let mut controller = ActivationController::new(ControllerConfig::default()).unwrap();
//!
//! controller.subscribe(Arc::new(FnObserver(|event: ActivationEvent| {
//!     if let ActivationEvent::Deactivated { value, .. } = event {
//!         println!("subsections dormant at x={value:.2}");
//!     }
//! })));
//!
//! // Low input: NOT 0 = 1, subsections are navigable
//! let snapshot = controller.apply_raw(0.3).unwrap();
//! assert_eq!(snapshot.evaluation.output.bit(), 1);
//!
//! let hit = PickHit { node: NodeRole::Subsection(1), distance: 2.0 };
//! let intent = controller.handle_click(&[hit]).unwrap();
//! assert_eq!(intent.destination, "section2.html");
//!
//! // High input: NOT 1 = 0, clicks are ignored
//! controller.apply_raw(1.0).unwrap();
//! assert!(controller.handle_click(&[hit]).is_none());
//! ```

mod collaborator;
mod config;
mod controller;
mod error;
mod evaluator;
mod input;
mod observer;
mod scene;
mod snapshot;
mod vector;

pub use collaborator::{NavigationIntent, Navigator, NdcPoint, PickHit, Picker, SceneRenderer};
pub use config::{ControllerConfig, SubsectionTarget, SUBSECTION_COUNT};
pub use controller::{ActivationController, SnapshotReader};
pub use error::{GateError, Result};
pub use evaluator::{
    evaluate, step, EvaluationResult, GateOutput, GateParameters, NOT_GATE_BIAS, NOT_GATE_WEIGHT,
};
pub use input::{format_readout, InputRange, InputSignal};
pub use observer::{ActivationEvent, ActivationObserver, ChannelObserver, FnObserver};
pub use scene::{
    panel_pose, screen_to_ndc, CameraProjection, NodeLayout, PanelPose, SceneContext, SceneLayout,
    Viewport, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_POSITION, PANEL_OFFSET, PANEL_SCALE,
};
pub use snapshot::{
    ActivationState, EdgeVisual, NodeRole, NodeVisual, StateSnapshot, SubsectionVisual,
    DEPENDENT_EDGE_FACTOR, NODE_EMISSIVE_FACTOR, PRIMARY_EDGE_FACTOR, SUBSECTION_EMISSIVE_FACTOR,
};
pub use vector::Vec3;

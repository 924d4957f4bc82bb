//! Seams to the presentation layer
//!
//! The crate never touches a scene graph, a camera or a browser. Whatever
//! draws the nodes implements [`SceneRenderer`] and [`Picker`]; whatever
//! changes pages implements [`Navigator`].

use crate::snapshot::{NodeRole, StateSnapshot};

/// A point in normalized device coordinates, both axes in [-1, 1], y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NdcPoint {
    pub x: f32,
    pub y: f32,
}

/// One node intersected by a pick ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub node: NodeRole,
    /// Distance from the ray origin; smaller is nearer.
    pub distance: f32,
}

/// Request to leave the visualization for a subsection page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationIntent {
    pub index: usize,
    pub label: String,
    pub destination: String,
}

/// Applies snapshots to an actual scene.
pub trait SceneRenderer {
    /// Set node opacity/emissive, edge opacity and label visibility.
    fn apply(&mut self, snapshot: &StateSnapshot);
}

/// Hit-testing against the rendered nodes.
pub trait Picker {
    /// All nodes under `point`, in any order.
    fn pick(&self, point: NdcPoint) -> Vec<PickHit>;
}

/// Performs the page transition (or an equivalent route change).
pub trait Navigator {
    fn navigate(&self, destination: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, destination: &str) {
        self(destination)
    }
}

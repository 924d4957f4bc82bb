//! Scene context - layout, viewport and the per-frame render tick
//!
//! Holds what a browser script would keep in module-level globals: where the
//! nodes sit, how big the viewport is, which renderer draws them and a read
//! handle on the controller's published snapshot.

use std::sync::Arc;

use crate::collaborator::{NdcPoint, SceneRenderer};
use crate::config::{ControllerConfig, SUBSECTION_COUNT};
use crate::controller::SnapshotReader;
use crate::snapshot::{EdgeVisual, NodeRole, StateSnapshot};
use crate::vector::Vec3;

/// Camera start position.
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Floating control panel offset from the input node.
pub const PANEL_OFFSET: Vec3 = Vec3::new(0.0, 1.2, 0.0);

/// Scale applied to the panel's pixel units in scene space.
pub const PANEL_SCALE: f32 = 0.01;

/// Perspective camera settings for the current viewport.
///
/// What a renderer feeds into its projection matrix. The aspect ratio is
/// kept in step with the viewport by [`SceneContext::resize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraProjection {
    pub position: Vec3,
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraProjection {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            position: CAMERA_POSITION,
            fov_deg: CAMERA_FOV_DEG,
            aspect: viewport.aspect(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    /// Visible height of the plane at `distance` from the camera.
    pub fn frustum_height_at(&self, distance: f32) -> f32 {
        2.0 * distance * (self.fov_deg.to_radians() * 0.5).tan()
    }

    /// Whether a point at `distance` along the view axis is drawn.
    pub fn in_depth_range(&self, distance: f32) -> bool {
        (self.near..=self.far).contains(&distance)
    }
}

/// Placement of one node and its label sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeLayout {
    pub role: NodeRole,
    pub position: Vec3,
    /// Sphere radius of the node mesh.
    pub radius: f32,
    pub label: String,
    pub label_offset: Vec3,
}

impl NodeLayout {
    pub fn label_position(&self) -> Vec3 {
        self.position + self.label_offset
    }
}

/// Fixed placement of the whole topology.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    pub input: NodeLayout,
    pub output: NodeLayout,
    pub subsections: [NodeLayout; SUBSECTION_COUNT],
}

impl SceneLayout {
    /// Standard layout: input left, output right, subsections stacked
    /// to the right of the output. Subsection labels come from `config`.
    pub fn for_config(config: &ControllerConfig) -> Self {
        const SUBSECTION_Y: [f32; SUBSECTION_COUNT] = [1.5, 0.0, -1.5];

        let subsections = std::array::from_fn(|index| NodeLayout {
            role: NodeRole::Subsection(index),
            position: Vec3::new(3.5, SUBSECTION_Y[index], 0.0),
            radius: 0.4,
            label: config.subsections[index].label.clone(),
            label_offset: Vec3::new(0.0, -0.7, 0.0),
        });

        Self {
            input: NodeLayout {
                role: NodeRole::Input,
                position: Vec3::new(-2.0, 0.0, 0.0),
                radius: 0.5,
                label: "Input (x₁)".to_string(),
                label_offset: Vec3::new(0.0, -0.8, 0.0),
            },
            output: NodeLayout {
                role: NodeRole::Output,
                position: Vec3::new(2.0, 0.0, 0.0),
                radius: 0.6,
                label: "Output".to_string(),
                label_offset: Vec3::new(0.0, -0.9, 0.0),
            },
            subsections,
        }
    }

    pub fn node(&self, role: NodeRole) -> Option<&NodeLayout> {
        match role {
            NodeRole::Input => Some(&self.input),
            NodeRole::Output => Some(&self.output),
            NodeRole::Subsection(index) => self.subsections.get(index),
        }
    }

    /// Line segment for an edge, source to target.
    pub fn edge_endpoints(&self, edge: &EdgeVisual) -> Option<(Vec3, Vec3)> {
        let source = self.node(edge.source)?;
        let target = self.node(edge.target)?;
        Some((source.position, target.position))
    }

    /// Where the floating control panel is anchored.
    pub fn panel_anchor(&self) -> Vec3 {
        self.input.position + PANEL_OFFSET
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::for_config(&ControllerConfig::default())
    }
}

/// Drawable area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for a degenerate viewport.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Client coordinates (origin top-left, y down) to NDC.
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> NdcPoint {
        screen_to_ndc(client_x, client_y, self.width, self.height)
    }
}

/// Client coordinates (origin top-left, y down) to NDC (y up).
pub fn screen_to_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> NdcPoint {
    NdcPoint {
        x: (client_x / width) * 2.0 - 1.0,
        y: -(client_y / height) * 2.0 + 1.0,
    }
}

/// Pose of the floating control panel for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPose {
    pub position: Vec3,
    /// Unit vector from the panel toward the camera (the panel's +Z).
    pub forward: Vec3,
    pub scale: f32,
}

impl PanelPose {
    /// Rotation about the vertical axis, radians.
    pub fn yaw(&self) -> f32 {
        self.forward.x.atan2(self.forward.z)
    }

    /// Elevation of the camera as seen from the panel, radians.
    pub fn pitch(&self) -> f32 {
        self.forward.y.clamp(-1.0, 1.0).asin()
    }
}

/// Billboard pose: the panel sits at `anchor` and faces `camera`.
///
/// A camera exactly at the anchor leaves the panel facing +Z.
pub fn panel_pose(camera: Vec3, anchor: Vec3) -> PanelPose {
    let forward = (camera - anchor)
        .normalized()
        .unwrap_or(Vec3::new(0.0, 0.0, 1.0));
    PanelPose {
        position: anchor,
        forward,
        scale: PANEL_SCALE,
    }
}

/// Explicit scene state driven once per display refresh.
pub struct SceneContext<R: SceneRenderer> {
    layout: SceneLayout,
    viewport: Viewport,
    renderer: R,
    reader: SnapshotReader,
    camera: CameraProjection,
    /// Last snapshot handed to the renderer.
    applied: Option<Arc<StateSnapshot>>,
}

impl<R: SceneRenderer> SceneContext<R> {
    pub fn new(layout: SceneLayout, viewport: Viewport, renderer: R, reader: SnapshotReader) -> Self {
        Self {
            layout,
            viewport,
            renderer,
            reader,
            camera: CameraProjection::for_viewport(viewport),
            applied: None,
        }
    }

    /// One render tick.
    ///
    /// Hands the latest snapshot to the renderer if it changed since the last
    /// tick and returns the panel pose for the current camera.
    pub fn frame(&mut self, camera: Vec3) -> PanelPose {
        let latest = self.reader.load();
        let changed = self
            .applied
            .as_ref()
            .map_or(true, |applied| !Arc::ptr_eq(applied, &latest));
        if changed {
            self.renderer.apply(&latest);
            self.applied = Some(latest);
        }
        panel_pose(camera, self.layout.panel_anchor())
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
        tracing::debug!(width, height, aspect = self.viewport.aspect(), "viewport resized");
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> CameraProjection {
        self.camera
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ActivationController;

    #[derive(Default)]
    struct CountingRenderer {
        applied: Vec<f32>,
    }

    impl SceneRenderer for CountingRenderer {
        fn apply(&mut self, snapshot: &StateSnapshot) {
            self.applied.push(snapshot.input_value);
        }
    }

    #[test]
    fn test_layout_positions() {
        let layout = SceneLayout::default();
        assert_eq!(layout.input.position, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(layout.subsections[0].position.y, 1.5);
        assert_eq!(layout.subsections[2].label, "Section 3");
        assert_eq!(layout.output.label_position(), Vec3::new(2.0, -0.9, 0.0));
        assert_eq!(layout.panel_anchor(), Vec3::new(-2.0, 1.2, 0.0));
    }

    #[test]
    fn test_node_radii() {
        let layout = SceneLayout::default();
        assert_eq!(layout.input.radius, 0.5);
        assert_eq!(layout.output.radius, 0.6);
        assert!(layout.subsections.iter().all(|n| n.radius == 0.4));
        // subsection spheres must not overlap
        let gap = layout.subsections[0].position.distance(layout.subsections[1].position);
        assert!(gap > 2.0 * layout.subsections[0].radius);
    }

    #[test]
    fn test_camera_projection() {
        let camera = CameraProjection::for_viewport(Viewport::new(1000.0, 500.0));
        assert_eq!(camera.position, CAMERA_POSITION);
        assert_eq!(camera.fov_deg, 75.0);
        assert_eq!(camera.aspect, 2.0);
        assert!(camera.in_depth_range(CAMERA_POSITION.z));
        assert!(!camera.in_depth_range(0.05));
        assert!(!camera.in_depth_range(2000.0));

        // whole topology fits vertically at the node plane
        let layout = SceneLayout::default();
        let top = layout.subsections[0].position.y + layout.subsections[0].radius;
        assert!(camera.frustum_height_at(CAMERA_POSITION.z) > 2.0 * top);
    }

    #[test]
    fn test_edge_endpoints() {
        let layout = SceneLayout::default();
        let edge = EdgeVisual {
            source: NodeRole::Output,
            target: NodeRole::Subsection(1),
            opacity: 0.3,
        };
        assert_eq!(
            layout.edge_endpoints(&edge),
            Some((Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.5, 0.0, 0.0)))
        );
    }

    #[test]
    fn test_screen_to_ndc() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(400.0, 300.0), NdcPoint { x: 0.0, y: 0.0 });
        assert_eq!(vp.to_ndc(0.0, 0.0), NdcPoint { x: -1.0, y: 1.0 });
        assert_eq!(vp.to_ndc(800.0, 600.0), NdcPoint { x: 1.0, y: -1.0 });
    }

    #[test]
    fn test_aspect() {
        assert_eq!(Viewport::new(1600.0, 800.0).aspect(), 2.0);
        assert_eq!(Viewport::new(100.0, 0.0).aspect(), 1.0);
    }

    #[test]
    fn test_panel_faces_camera() {
        let pose = panel_pose(Vec3::new(-2.0, 1.2, 5.0), Vec3::new(-2.0, 1.2, 0.0));
        assert_eq!(pose.forward, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(pose.yaw(), 0.0);
        assert_eq!(pose.pitch(), 0.0);

        let side = panel_pose(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO);
        assert!((side.yaw() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        assert_eq!(pose.scale, PANEL_SCALE);

        let degenerate = panel_pose(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(degenerate.forward, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_frame_applies_only_new_snapshots() {
        let mut ctrl = ActivationController::new(ControllerConfig::default()).unwrap();
        let mut scene = SceneContext::new(
            SceneLayout::default(),
            Viewport::new(800.0, 600.0),
            CountingRenderer::default(),
            ctrl.reader(),
        );

        scene.frame(CAMERA_POSITION);
        scene.frame(CAMERA_POSITION);
        assert_eq!(scene.renderer().applied, vec![0.0]);

        ctrl.apply_raw(0.7).unwrap();
        let pose = scene.frame(CAMERA_POSITION);
        assert_eq!(scene.renderer().applied, vec![0.0, 0.7]);
        assert_eq!(pose.position, Vec3::new(-2.0, 1.2, 0.0));
    }

    #[test]
    fn test_resize() {
        let ctrl = ActivationController::new(ControllerConfig::default()).unwrap();
        let mut scene = SceneContext::new(
            SceneLayout::default(),
            Viewport::new(800.0, 600.0),
            CountingRenderer::default(),
            ctrl.reader(),
        );
        assert!((scene.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        scene.resize(1200.0, 600.0);
        assert_eq!(scene.viewport().aspect(), 2.0);
        assert_eq!(scene.camera().aspect, 2.0);
    }
}

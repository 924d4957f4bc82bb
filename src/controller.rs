//! Activation state controller - evaluates input and publishes snapshots

use std::sync::{Arc, PoisonError, RwLock};

use crate::collaborator::{NavigationIntent, Navigator, NdcPoint, PickHit, Picker};
use crate::config::{ControllerConfig, SUBSECTION_COUNT};
use crate::error::Result;
use crate::evaluator::{evaluate, EvaluationResult, GateParameters};
use crate::input::{InputRange, InputSignal};
use crate::observer::{ActivationEvent, ActivationObserver};
use crate::snapshot::{ActivationState, NodeRole, StateSnapshot};

type SnapshotCell = Arc<RwLock<Arc<StateSnapshot>>>;

/// Read handle on the published snapshot, for the render loop.
///
/// Cloning is cheap. `load` always returns a complete snapshot: the
/// controller swaps whole snapshots, it never edits one in place.
#[derive(Clone, Debug)]
pub struct SnapshotReader {
    cell: SnapshotCell,
}

impl SnapshotReader {
    /// The most recently published snapshot.
    pub fn load(&self) -> Arc<StateSnapshot> {
        let guard = self.cell.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }
}

/// Drives the node topology from a single input.
///
/// Owns the fixed gate parameters, the configuration, the published snapshot
/// and the observers. Every input change rebuilds the snapshot, publishes it
/// in one swap, then notifies observers.
pub struct ActivationController {
    /// Fixed for the controller's lifetime.
    params: GateParameters,

    config: ControllerConfig,

    /// Current snapshot, shared with readers.
    published: SnapshotCell,

    observers: Vec<Arc<dyn ActivationObserver>>,
}

impl ActivationController {
    /// Create a controller and publish the snapshot for the initial input.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;

        let params = GateParameters::NOT_GATE;
        let initial = config.input_range.initial;
        let result = evaluate(initial, &params);
        let snapshot = StateSnapshot::derive(initial, &result, &config.subsections);

        tracing::debug!(
            input = initial,
            output = result.output.bit(),
            "activation controller ready"
        );

        Ok(Self {
            params,
            config,
            published: Arc::new(RwLock::new(Arc::new(snapshot))),
            observers: Vec::new(),
        })
    }

    // =========================================================================
    // EVALUATION
    // =========================================================================

    /// Derive the snapshot for `x` without publishing it.
    pub fn update_state(&self, x: f32, result: &EvaluationResult) -> StateSnapshot {
        StateSnapshot::derive(x, result, &self.config.subsections)
    }

    /// Evaluate a validated input, publish its snapshot and notify observers.
    pub fn set_input(&mut self, signal: InputSignal) -> Arc<StateSnapshot> {
        let x = signal.value();
        let result = evaluate(x, &self.params);
        let next = Arc::new(self.update_state(x, &result));
        let previous = self.publish(Arc::clone(&next));

        tracing::debug!(
            input = x,
            weighted_sum = result.weighted_sum,
            output = result.output.bit(),
            "published snapshot"
        );

        self.notify(ActivationEvent::InputChanged {
            value: x,
            weighted_sum: result.weighted_sum,
            output: result.output,
        });

        match (previous.cluster_state(), next.cluster_state()) {
            (ActivationState::Dormant, ActivationState::Active) => {
                tracing::info!(input = x, "subsections activated");
                self.notify(ActivationEvent::Activated {
                    value: x,
                    weighted_sum: result.weighted_sum,
                });
            }
            (ActivationState::Active, ActivationState::Dormant) => {
                tracing::info!(input = x, "subsections dormant");
                self.notify(ActivationEvent::Deactivated {
                    value: x,
                    weighted_sum: result.weighted_sum,
                });
            }
            _ => {}
        }

        next
    }

    /// Validate a raw slider value, then [`set_input`](Self::set_input).
    ///
    /// Non-finite values are rejected and leave the published snapshot as is.
    pub fn apply_raw(&mut self, raw: f32) -> Result<Arc<StateSnapshot>> {
        let signal = InputSignal::new(raw, &self.config.input_range)?;
        Ok(self.set_input(signal))
    }

    fn publish(&self, next: Arc<StateSnapshot>) -> Arc<StateSnapshot> {
        let mut guard = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    fn notify(&self, event: ActivationEvent) {
        for observer in &self.observers {
            observer.on_event(event.clone());
        }
    }

    // =========================================================================
    // CLICKS
    // =========================================================================

    /// Resolve a pointer event's hits to at most one navigation intent.
    ///
    /// Only subsection hits inside the topology with a finite distance count;
    /// the nearest one wins. Returns `None` when nothing was hit or the
    /// nearest subsection is dormant.
    pub fn handle_click(&self, hits: &[PickHit]) -> Option<NavigationIntent> {
        let (index, _) = hits
            .iter()
            .filter_map(|hit| match hit.node {
                NodeRole::Subsection(index)
                    if index < SUBSECTION_COUNT && hit.distance.is_finite() =>
                {
                    Some((index, hit.distance))
                }
                _ => None,
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let snapshot = self.snapshot();
        let section = snapshot.subsection(index)?;
        if !section.activated() {
            tracing::debug!(index, "ignored click on dormant subsection");
            return None;
        }

        tracing::info!(
            index,
            destination = %section.target.destination,
            "navigating to subsection"
        );
        Some(NavigationIntent {
            index,
            label: section.target.label.clone(),
            destination: section.target.destination.clone(),
        })
    }

    /// Pick at `point`, resolve the click and hand any intent to `navigator`.
    pub fn dispatch_click<P, N>(
        &self,
        point: NdcPoint,
        picker: &P,
        navigator: &N,
    ) -> Option<NavigationIntent>
    where
        P: Picker + ?Sized,
        N: Navigator + ?Sized,
    {
        let hits = picker.pick(point);
        let intent = self.handle_click(&hits)?;
        navigator.navigate(&intent.destination);
        Some(intent)
    }

    // =========================================================================
    // ACCESS
    // =========================================================================

    /// Register an observer for activation events.
    pub fn subscribe(&mut self, observer: Arc<dyn ActivationObserver>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// The current published snapshot.
    pub fn snapshot(&self) -> Arc<StateSnapshot> {
        self.reader().load()
    }

    /// A read handle for the render loop.
    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            cell: Arc::clone(&self.published),
        }
    }

    pub fn params(&self) -> &GateParameters {
        &self.params
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn input_range(&self) -> &InputRange {
        &self.config.input_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;
    use crate::observer::FnObserver;
    use std::sync::Mutex;

    fn controller() -> ActivationController {
        ActivationController::new(ControllerConfig::default()).unwrap()
    }

    fn hit(node: NodeRole, distance: f32) -> PickHit {
        PickHit { node, distance }
    }

    #[test]
    fn test_initial_snapshot() {
        let ctrl = controller();
        let snap = ctrl.snapshot();
        assert_eq!(snap.input_value, 0.0);
        assert_eq!(snap.cluster_state(), ActivationState::Active);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ControllerConfig::default();
        config.subsections[1].destination.clear();
        assert!(ActivationController::new(config).is_err());
    }

    #[test]
    fn test_set_input_publishes() {
        let mut ctrl = controller();
        let reader = ctrl.reader();
        let returned = ctrl.apply_raw(0.8).unwrap();
        let loaded = reader.load();
        assert!(Arc::ptr_eq(&returned, &loaded));
        assert_eq!(loaded.input_value, 0.8);
        assert_eq!(loaded.cluster_state(), ActivationState::Dormant);
    }

    #[test]
    fn test_non_finite_leaves_snapshot() {
        let mut ctrl = controller();
        ctrl.apply_raw(0.2).unwrap();
        let before = ctrl.snapshot();
        assert!(matches!(
            ctrl.apply_raw(f32::NAN),
            Err(GateError::NonFiniteInput { .. })
        ));
        assert!(Arc::ptr_eq(&before, &ctrl.snapshot()));
    }

    #[test]
    fn test_raw_input_is_clamped() {
        let mut ctrl = controller();
        let snap = ctrl.apply_raw(3.0).unwrap();
        assert_eq!(snap.input_value, 1.0);
        assert_eq!(snap.input.intensity, 1.0);
    }

    #[test]
    fn test_transition_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let mut ctrl = controller();
        ctrl.subscribe(Arc::new(FnObserver(move |event: ActivationEvent| {
            if event.is_transition() {
                sink.lock().unwrap().push(event);
            }
        })));

        for x in [0.1, 0.4, 0.6, 0.9, 0.5, 0.0] {
            ctrl.apply_raw(x).unwrap();
        }

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ActivationEvent::Deactivated { value, .. } if value == 0.6));
        assert!(matches!(events[1], ActivationEvent::Activated { value, .. } if value == 0.5));
    }

    #[test]
    fn test_input_changed_every_time() {
        let count = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&count);
        let mut ctrl = controller();
        ctrl.subscribe(Arc::new(FnObserver(move |event: ActivationEvent| {
            if !event.is_transition() {
                *sink.lock().unwrap() += 1;
            }
        })));
        ctrl.apply_raw(0.2).unwrap();
        ctrl.apply_raw(0.2).unwrap();
        assert_eq!(*count.lock().unwrap(), 2);
        assert_eq!(ctrl.observer_count(), 1);
    }

    #[test]
    fn test_nearest_subsection_wins() {
        let ctrl = controller();
        let hits = [
            hit(NodeRole::Subsection(2), 4.0),
            hit(NodeRole::Subsection(0), 1.5),
            hit(NodeRole::Subsection(1), 2.5),
        ];
        let intent = ctrl.handle_click(&hits).unwrap();
        assert_eq!(intent.index, 0);
        assert_eq!(intent.destination, "section1.html");
        assert_eq!(intent.label, "Section 1");
    }

    #[test]
    fn test_non_subsection_hits_ignored() {
        let ctrl = controller();
        assert!(ctrl.handle_click(&[hit(NodeRole::Output, 0.5)]).is_none());
        let intent = ctrl
            .handle_click(&[hit(NodeRole::Output, 0.5), hit(NodeRole::Subsection(1), 3.0)])
            .unwrap();
        assert_eq!(intent.index, 1);
    }

    #[test]
    fn test_dormant_click_is_noop() {
        let mut ctrl = controller();
        ctrl.apply_raw(1.0).unwrap();
        assert!(ctrl.handle_click(&[hit(NodeRole::Subsection(1), 1.0)]).is_none());
        assert!(ctrl.handle_click(&[]).is_none());
    }

    #[test]
    fn test_out_of_topology_hit() {
        let ctrl = controller();
        assert!(ctrl.handle_click(&[hit(NodeRole::Subsection(9), 1.0)]).is_none());
    }

    #[test]
    fn test_out_of_topology_hit_does_not_shadow_valid() {
        let ctrl = controller();
        let intent = ctrl
            .handle_click(&[
                hit(NodeRole::Subsection(9), 0.5),
                hit(NodeRole::Subsection(2), 3.0),
            ])
            .unwrap();
        assert_eq!(intent.index, 2);
    }

    #[test]
    fn test_non_finite_distances_ignored() {
        let ctrl = controller();
        let intent = ctrl
            .handle_click(&[
                hit(NodeRole::Subsection(0), -f32::NAN),
                hit(NodeRole::Subsection(1), f32::NEG_INFINITY),
                hit(NodeRole::Subsection(2), 4.0),
            ])
            .unwrap();
        assert_eq!(intent.index, 2);
        assert!(ctrl
            .handle_click(&[hit(NodeRole::Subsection(0), f32::NAN)])
            .is_none());
    }

    #[test]
    fn test_negative_zero_readout() {
        let mut ctrl = controller();
        let snap = ctrl.apply_raw(-0.0).unwrap();
        assert_eq!(snap.input_readout(), "0.00");
    }
}

//! Activation events - pub/sub on input changes and cluster transitions
//!
//! The controller notifies observers synchronously, after the new snapshot
//! has been published. Observers see events in this order for one input:
//!
//! 1. `InputChanged` (always)
//! 2. `Activated` or `Deactivated` (only when the output bit flipped)

use crate::evaluator::GateOutput;

/// Event emitted by the activation controller
#[derive(Clone, Debug, PartialEq)]
pub enum ActivationEvent {
    /// A new snapshot was published for this input
    InputChanged {
        value: f32,
        weighted_sum: f32,
        output: GateOutput,
    },
    /// Output went 0 -> 1; subsections are now navigable
    Activated { value: f32, weighted_sum: f32 },
    /// Output went 1 -> 0; subsections are dormant
    Deactivated { value: f32, weighted_sum: f32 },
}

impl ActivationEvent {
    /// Whether this event marks a Dormant/Active transition.
    pub fn is_transition(&self) -> bool {
        !matches!(self, ActivationEvent::InputChanged { .. })
    }
}

/// Observer that receives activation events
pub trait ActivationObserver: Send + Sync {
    /// Called when an activation event occurs
    fn on_event(&self, event: ActivationEvent);
}

/// Function-based observer for simple cases
pub struct FnObserver<F: Fn(ActivationEvent) + Send + Sync>(pub F);

impl<F: Fn(ActivationEvent) + Send + Sync> ActivationObserver for FnObserver<F> {
    fn on_event(&self, event: ActivationEvent) {
        (self.0)(event);
    }
}

/// Channel-based observer - sends events to a channel
pub struct ChannelObserver {
    sender: std::sync::Mutex<std::sync::mpsc::Sender<ActivationEvent>>,
}

impl ChannelObserver {
    pub fn new(sender: std::sync::mpsc::Sender<ActivationEvent>) -> Self {
        Self {
            sender: std::sync::Mutex::new(sender),
        }
    }
}

impl ActivationObserver for ChannelObserver {
    fn on_event(&self, event: ActivationEvent) {
        if let Ok(sender) = self.sender.lock() {
            let _ = sender.send(event);
        }
    }
}

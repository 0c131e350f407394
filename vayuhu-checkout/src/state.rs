use chrono::Utc;
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;
use vayuhu_shared::{CheckoutEvent, CheckoutState};

/// Tracks one checkout attempt through its lifecycle and publishes every transition.
#[derive(Debug)]
pub struct CheckoutAttempt {
    id: Uuid,
    state: CheckoutState,
    history: Vec<CheckoutState>,
    events: Option<broadcast::Sender<CheckoutEvent>>,
}

impl CheckoutAttempt {
    pub fn new(events: Option<broadcast::Sender<CheckoutEvent>>) -> Self {
        let attempt = Self {
            id: Uuid::new_v4(),
            state: CheckoutState::Idle,
            history: vec![CheckoutState::Idle],
            events,
        };
        attempt.publish(None);
        attempt
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Every state visited so far, starting with `Idle`.
    pub fn history(&self) -> &[CheckoutState] {
        &self.history
    }

    /// Move to `next` if the lifecycle allows it.
    pub fn advance(
        &mut self,
        next: CheckoutState,
        message: Option<String>,
    ) -> Result<(), TransitionError> {
        if !can_transition(self.state, next) {
            return Err(TransitionError {
                from: self.state,
                to: next,
            });
        }

        info!("Checkout {} {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
        self.history.push(next);
        self.publish(message);
        Ok(())
    }

    fn publish(&self, message: Option<String>) {
        if let Some(tx) = &self.events {
            // No subscribers is fine
            let _ = tx.send(CheckoutEvent {
                attempt_id: self.id,
                state: self.state,
                message,
                timestamp: Utc::now(),
            });
        }
    }
}

/// `Idle → OrderCreated → AwaitingWidget → Verifying → Persisting → [Notifying →] Done`,
/// with `Cancelled` only out of `AwaitingWidget` and `Failed` out of any non-terminal state.
pub fn can_transition(from: CheckoutState, to: CheckoutState) -> bool {
    use CheckoutState::*;

    if from.is_terminal() {
        return false;
    }

    match (from, to) {
        (_, Failed(_)) => true,
        (Idle, OrderCreated) => true,
        (OrderCreated, AwaitingWidget) => true,
        (AwaitingWidget, Verifying) | (AwaitingWidget, Cancelled) => true,
        (Verifying, Persisting) => true,
        (Persisting, Notifying) | (Persisting, Done) => true,
        (Notifying, Done) => true,
        _ => false,
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid checkout transition from {from:?} to {to:?}")]
pub struct TransitionError {
    pub from: CheckoutState,
    pub to: CheckoutState,
}

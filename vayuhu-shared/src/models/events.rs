use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The stage a checkout attempt failed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailedStage {
    Precheck,
    OrderCreation,
    Widget,
    Verification,
    Persistence,
}

impl FailedStage {
    /// True once money has moved through the widget.
    pub fn is_post_payment(&self) -> bool {
        matches!(self, FailedStage::Verification | FailedStage::Persistence)
    }
}

/// Lifecycle of a single checkout attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "stage", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutState {
    Idle,
    OrderCreated,
    AwaitingWidget,
    Verifying,
    Persisting,
    Notifying,
    Done,
    Cancelled,
    Failed(FailedStage),
}

impl CheckoutState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutState::Done | CheckoutState::Cancelled | CheckoutState::Failed(_)
        )
    }
}

/// Published on every state transition of a checkout attempt.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckoutEvent {
    pub attempt_id: Uuid,
    pub state: CheckoutState,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

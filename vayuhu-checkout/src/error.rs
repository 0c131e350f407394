use vayuhu_core::{GatewayError, WidgetError};
use vayuhu_shared::FailedStage;

use crate::state::TransitionError;

/// Appended to every failure that happens after money has moved.
pub const SUPPORT_NOTICE: &str = "Payment successful, but booking failed. Contact support.";

/// Whether a failed checkout left the customer charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Nothing was charged; retrying from scratch is safe.
    PrePayment,
    /// The widget took the payment; needs manual reconciliation.
    PostPayment,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Your cart is empty!")]
    EmptyCart,

    #[error("Checkout amount must be greater than zero")]
    InvalidFee,

    #[error("{message}")]
    FeeRejected {
        message: String,
        #[source]
        source: GatewayError,
    },

    #[error("Payment SDK failed to load.")]
    WidgetUnavailable(#[source] WidgetError),

    #[error("{message}")]
    OrderCreation {
        message: String,
        #[source]
        source: GatewayError,
    },

    #[error("Payment verification failed. {} (payment reference {payment_id})", SUPPORT_NOTICE)]
    VerificationFailed {
        payment_id: String,
        #[source]
        source: GatewayError,
    },

    #[error("{reason}. {} (payment reference {payment_id})", SUPPORT_NOTICE)]
    PersistenceFailed {
        payment_id: String,
        reason: String,
        #[source]
        source: GatewayError,
    },

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
}

impl CheckoutError {
    /// Order creation failed. Uses the backend's message when it sent one.
    pub fn order_creation(source: GatewayError) -> Self {
        let fallback = match source {
            GatewayError::Rejected { .. } => "Failed to create order.",
            _ => "Failed to initialize checkout.",
        };
        CheckoutError::OrderCreation {
            message: source.user_message(fallback),
            source,
        }
    }

    pub fn persistence(payment_id: &str, source: GatewayError) -> Self {
        let reason = source
            .user_message("Booking could not be saved")
            .trim_end_matches(['.', '!', ' '])
            .to_string();
        CheckoutError::PersistenceFailed {
            payment_id: payment_id.to_string(),
            reason,
            source,
        }
    }

    pub fn class(&self) -> FailureClass {
        if self.stage().is_post_payment() {
            FailureClass::PostPayment
        } else {
            FailureClass::PrePayment
        }
    }

    /// Lifecycle stage this failure belongs to.
    pub fn stage(&self) -> FailedStage {
        match self {
            CheckoutError::EmptyCart
            | CheckoutError::InvalidFee
            | CheckoutError::FeeRejected { .. } => FailedStage::Precheck,
            CheckoutError::WidgetUnavailable(_) => FailedStage::Widget,
            CheckoutError::OrderCreation { .. } => FailedStage::OrderCreation,
            CheckoutError::VerificationFailed { .. } => FailedStage::Verification,
            CheckoutError::PersistenceFailed { .. } => FailedStage::Persistence,
            CheckoutError::InvalidTransition(e) => match e.from {
                vayuhu_shared::CheckoutState::Verifying => FailedStage::Verification,
                vayuhu_shared::CheckoutState::Persisting
                | vayuhu_shared::CheckoutState::Notifying => FailedStage::Persistence,
                _ => FailedStage::Precheck,
            },
        }
    }

    /// Payment reference when the customer has already been charged.
    pub fn payment_id(&self) -> Option<&str> {
        match self {
            CheckoutError::VerificationFailed { payment_id, .. }
            | CheckoutError::PersistenceFailed { payment_id, .. } => Some(payment_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_creation_messages() {
        let err = CheckoutError::order_creation(GatewayError::rejected("limit exceeded"));
        assert_eq!(err.to_string(), "limit exceeded");
        assert_eq!(err.class(), FailureClass::PrePayment);

        let err = CheckoutError::order_creation(GatewayError::Rejected { message: None });
        assert_eq!(err.to_string(), "Failed to create order.");

        let err = CheckoutError::order_creation(GatewayError::Transport("timed out".to_string()));
        assert_eq!(err.to_string(), "Failed to initialize checkout.");
    }

    #[test]
    fn test_post_payment_messages_ask_for_support() {
        let err = CheckoutError::VerificationFailed {
            payment_id: "pay_1".to_string(),
            source: GatewayError::Rejected { message: None },
        };
        assert_eq!(err.class(), FailureClass::PostPayment);
        assert!(err.to_string().contains("Contact support"));
        assert!(err.to_string().contains("pay_1"));

        let err = CheckoutError::persistence("pay_2", GatewayError::rejected("Seat A1 already taken."));
        assert_eq!(
            err.to_string(),
            "Seat A1 already taken. Payment successful, but booking failed. Contact support. (payment reference pay_2)"
        );
        assert_eq!(err.payment_id(), Some("pay_2"));
        assert_eq!(err.stage(), FailedStage::Persistence);
    }

    #[test]
    fn test_pre_payment_messages_do_not_mention_support() {
        let errors = [
            CheckoutError::EmptyCart,
            CheckoutError::InvalidFee,
            CheckoutError::order_creation(GatewayError::rejected("limit exceeded")),
            CheckoutError::WidgetUnavailable(WidgetError::Unavailable("blocked".to_string())),
        ];
        for err in errors {
            assert_eq!(err.class(), FailureClass::PrePayment);
            assert!(!err.to_string().contains("Contact support"));
        }
    }
}

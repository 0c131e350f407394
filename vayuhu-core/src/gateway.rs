use async_trait::async_trait;
use rust_decimal::Decimal;
use vayuhu_shared::models::cart::BookingEmail;
use vayuhu_shared::models::visitor::{NewVisitor, VisitorDateApproval, VisitorDateCheck};
use vayuhu_shared::{BookingRecord, PaymentOrder, PaymentResult};

/// The one failure shape every backend call resolves to.
///
/// A `success=false` body and a transport/HTTP failure are both errors here,
/// so callers check a single discriminant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Backend rejected the request")]
    Rejected { message: Option<String> },

    #[error("Malformed backend response: {0}")]
    Decode(String),

    #[error("No active session")]
    Unauthenticated,
}

impl GatewayError {
    pub fn rejected(message: impl Into<String>) -> Self {
        GatewayError::Rejected {
            message: Some(message.into()),
        }
    }

    /// Human-readable message supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            GatewayError::Status { message, .. } | GatewayError::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Backend message, or `fallback` when the backend sent none.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Backend calls the checkout flows depend on. Every call carries the current session's bearer token.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Create a payment order for `amount` (major currency units).
    async fn create_payment_order(&self, amount: Decimal) -> GatewayResult<PaymentOrder>;

    /// Verify the signature on a widget-issued payment result.
    async fn verify_payment(&self, result: &PaymentResult) -> GatewayResult<()>;

    /// Persist every booking of a paid cart in one request.
    async fn add_bulk_bookings(&self, bookings: &[BookingRecord]) -> GatewayResult<()>;

    /// Persist a paid visitor pass.
    async fn add_visitor(&self, visitor: &NewVisitor) -> GatewayResult<()>;

    /// Ask the backend to email a booking confirmation.
    async fn send_booking_email(&self, email: &BookingEmail) -> GatewayResult<()>;

    /// Check that a visitor may come on a date covered by a booking.
    async fn validate_visitor_date(
        &self,
        check: &VisitorDateCheck,
    ) -> GatewayResult<VisitorDateApproval>;
}

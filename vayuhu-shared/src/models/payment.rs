use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-issued payment order. Lives only for one checkout attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentOrder {
    pub order_id: String,
    /// Public key the widget is opened with.
    pub key: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// Opaque result handed back by the payment widget on completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentResult {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
}

/// Request body for `/create_razorpay_order.php`. The amount is in major units.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

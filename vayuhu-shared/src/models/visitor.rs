use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Guest details collected by the visitor pass form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisitorPass {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub company_name: String,
    pub visiting_date: String,
    pub visiting_time: String,
    pub reason: String,
}

/// Request body for `/add_visitor.php`, sent once the pass is paid for.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewVisitor {
    #[serde(flatten)]
    pub pass: VisitorPass,
    pub user_id: Option<i64>,
    pub payment_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,
}

/// Request body for `/admin_add_visitor.php`. Admin-added visitors are not tied to a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AdminVisitor {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub company_name: String,
    pub visiting_date: String,
    pub visiting_time: String,
    pub reason: String,
}

/// Request body for `/validate_visitor_date.php`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisitorDateCheck {
    pub booking_id: i64,
    pub visiting_date: String,
}

/// Result of a visitor date check; `fee` overrides the default pass fee when present.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct VisitorDateApproval {
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}

//! Read-only rows returned by the listing and reporting endpoints.
//!
//! The backend serves these straight from its database, so numbers often arrive as strings
//! and most columns are optional.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Admin-side reservation row (`/get_reservations.php`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Reservation {
    #[serde(deserialize_with = "crate::models::de::id")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub space: Option<String>,
    #[serde(default)]
    pub space_code: Option<String>,
    #[serde(default)]
    pub pack: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub timings: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub final_total: Option<Decimal>,
    #[serde(default)]
    pub booked_on: Option<String>,
    #[serde(default)]
    pub seat_codes: Option<String>,
}

/// User-side booking row (`/get_workspace_bookings.php`, `/get_booking_summary.php`, `/get_active_bookings.php`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WorkspaceBooking {
    #[serde(deserialize_with = "crate::models::de::id")]
    pub booking_id: i64,
    #[serde(default)]
    pub workspace_title: Option<String>,
    #[serde(default)]
    pub space_code: Option<String>,
    #[serde(default)]
    pub plan_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub base_amount: Option<Decimal>,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
    #[serde(default)]
    pub final_amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub seat_codes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BookingCounts {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub upcoming: u32,
    #[serde(default)]
    pub ongoing: u32,
    #[serde(default)]
    pub completed: u32,
}

/// Dashboard payload of `/get_booking_summary.php`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BookingSummary {
    #[serde(default)]
    pub summary: BookingCounts,
    #[serde(default)]
    pub bookings: Vec<WorkspaceBooking>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenuePoint {
    pub month: String,
    pub total_revenue: Decimal,
}

/// Visitor row from `/get_visitors.php` (owner view) or `/get_all_visitors.php` (admin view).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VisitorRecord {
    #[serde(deserialize_with = "crate::models::de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "crate::models::de::opt_id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub visiting_date: Option<String>,
    #[serde(default)]
    pub visiting_time: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub amount_paid: Option<Decimal>,
    #[serde(default)]
    pub added_on: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BlogPost {
    #[serde(deserialize_with = "crate::models::de::id")]
    pub id: i64,
    #[serde(default)]
    pub blog_heading: Option<String>,
    #[serde(default)]
    pub blog_description: Option<String>,
    #[serde(default)]
    pub blog_image: Option<String>,
    #[serde(default)]
    pub added_by: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

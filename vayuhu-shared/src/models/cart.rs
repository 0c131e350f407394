use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A workspace booking the user has selected but not yet paid for.
///
/// Items are immutable once added to a cart; removal is by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: i64,
    pub title: String,
    pub plan_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub total_days: Option<u32>,
    pub total_hours: Option<u32>,
    pub num_attendees: Option<u32>,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    pub coupon_code: Option<String>,
    pub referral: Option<String>,
    pub seat_codes: Option<String>,
}

impl CartItem {
    /// Minimal item for a plan; optional attributes start empty.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        plan_type: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        final_amount: Decimal,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            plan_type: plan_type.into(),
            start_date,
            end_date,
            start_time: None,
            end_time: None,
            total_days: None,
            total_hours: None,
            num_attendees: None,
            final_amount,
            coupon_code: None,
            referral: None,
            seat_codes: None,
        }
    }
}

/// One row of the bulk booking submission, built from a paid `CartItem`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub user_id: Option<i64>,
    pub space_id: i64,
    pub workspace_title: String,
    pub plan_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub total_days: Option<u32>,
    pub total_hours: Option<u32>,
    pub num_attendees: Option<u32>,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    pub coupon_code: Option<String>,
    pub referral_source: Option<String>,
    pub terms_accepted: u8,
    pub payment_id: String,
    pub seat_codes: String,
}

impl BookingRecord {
    pub fn from_cart_item(item: &CartItem, user_id: Option<i64>, payment_id: &str) -> Self {
        Self {
            user_id,
            space_id: item.id,
            workspace_title: item.title.clone(),
            plan_type: item.plan_type.clone(),
            start_date: item.start_date,
            end_date: item.end_date,
            start_time: item.start_time.clone(),
            end_time: item.end_time.clone(),
            total_days: item.total_days,
            total_hours: item.total_hours,
            num_attendees: item.num_attendees,
            final_amount: item.final_amount,
            coupon_code: item.coupon_code.clone(),
            referral_source: item.referral.clone(),
            terms_accepted: 1,
            payment_id: payment_id.to_string(),
            seat_codes: item.seat_codes.clone().unwrap_or_default(),
        }
    }
}

/// Request body for `/send_booking_email.php`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingEmail {
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub bookings: Vec<CartItem>,
}

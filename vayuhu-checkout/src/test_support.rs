use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Mutex;
use vayuhu_core::{BookingGateway, GatewayError, GatewayResult};
use vayuhu_shared::models::cart::BookingEmail;
use vayuhu_shared::models::visitor::{NewVisitor, VisitorDateApproval, VisitorDateCheck};
use vayuhu_shared::{BookingRecord, CartItem, Identity, PaymentOrder, PaymentResult, Session, User};

pub fn cart_item(id: i64, amount: Decimal) -> CartItem {
    CartItem::new(
        id,
        format!("Desk {}", id),
        "daily",
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        amount,
    )
}

pub fn user_session() -> Session {
    Session::new(
        Identity::User(User {
            id: 42,
            name: Some("Priya".to_string()),
            email: Some("priya@example.com".to_string()),
            extra: Default::default(),
        }),
        "user-token",
    )
}

/// Call recorded by the fake gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateOrder(Decimal),
    Verify(PaymentResult),
    BulkBookings(Vec<BookingRecord>),
    AddVisitor(NewVisitor),
    Email(BookingEmail),
    ValidateDate(VisitorDateCheck),
}

/// Scripted `BookingGateway` that records every call in order.
pub struct RecordingGateway {
    pub order: GatewayResult<PaymentOrder>,
    pub verify: GatewayResult<()>,
    pub persist: GatewayResult<()>,
    pub email: GatewayResult<()>,
    pub approval: GatewayResult<VisitorDateApproval>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self {
            order: Ok(PaymentOrder {
                order_id: "order_test_1".to_string(),
                key: "rzp_test_key".to_string(),
                amount: None,
            }),
            verify: Ok(()),
            persist: Ok(()),
            email: Ok(()),
            approval: Ok(VisitorDateApproval::default()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingGateway {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn called(&self, pred: impl Fn(&Call) -> bool) -> bool {
        self.calls().iter().any(pred)
    }
}

#[async_trait]
impl BookingGateway for RecordingGateway {
    async fn create_payment_order(&self, amount: Decimal) -> GatewayResult<PaymentOrder> {
        self.record(Call::CreateOrder(amount));
        self.order.clone()
    }

    async fn verify_payment(&self, result: &PaymentResult) -> GatewayResult<()> {
        self.record(Call::Verify(result.clone()));
        self.verify.clone()
    }

    async fn add_bulk_bookings(&self, bookings: &[BookingRecord]) -> GatewayResult<()> {
        self.record(Call::BulkBookings(bookings.to_vec()));
        self.persist.clone()
    }

    async fn add_visitor(&self, visitor: &NewVisitor) -> GatewayResult<()> {
        self.record(Call::AddVisitor(visitor.clone()));
        self.persist.clone()
    }

    async fn send_booking_email(&self, email: &BookingEmail) -> GatewayResult<()> {
        self.record(Call::Email(email.clone()));
        self.email.clone()
    }

    async fn validate_visitor_date(
        &self,
        check: &VisitorDateCheck,
    ) -> GatewayResult<VisitorDateApproval> {
        self.record(Call::ValidateDate(check.clone()));
        self.approval.clone()
    }
}

pub fn rejected(message: &str) -> GatewayError {
    GatewayError::rejected(message)
}

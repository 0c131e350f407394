use async_trait::async_trait;
use rust_decimal::Decimal;
use vayuhu_core::{BookingGateway, GatewayResult, Prefill};
use vayuhu_shared::models::cart::BookingEmail;
use vayuhu_shared::models::visitor::{NewVisitor, VisitorDateCheck, VisitorPass};
use vayuhu_shared::{BookingRecord, CartItem, Identity, PaymentResult};

use crate::cart::Cart;
use crate::error::CheckoutError;

/// What is being bought, how much it costs and where the paid booking is persisted.
///
/// The orchestrator runs the same payment handshake for every plan.
#[async_trait]
pub trait CheckoutPlan: Send + Sync {
    /// Line shown inside the payment widget.
    fn description(&self) -> String;

    /// Local checks that must pass before any network call.
    fn precheck(&self) -> Result<(), CheckoutError> {
        Ok(())
    }

    /// Amount owed, in major currency units.
    async fn resolve_fee(&self, gateway: &dyn BookingGateway) -> Result<Decimal, CheckoutError>;

    /// Details pre-filled in the widget form.
    fn prefill(&self, identity: Option<&Identity>) -> Prefill {
        Prefill {
            name: identity.and_then(|i| i.name()).map(str::to_string),
            email: identity.and_then(|i| i.email()).map(str::to_string),
            contact: None,
        }
    }

    /// Save the paid booking(s).
    async fn persist(
        &self,
        gateway: &dyn BookingGateway,
        identity: Option<&Identity>,
        payment: &PaymentResult,
        amount: Decimal,
    ) -> GatewayResult<()>;

    /// Confirmation email to send after persistence, if this flow sends one.
    fn confirmation(&self, _identity: Option<&Identity>, _amount: Decimal) -> Option<BookingEmail> {
        None
    }

    /// Shown to the user once everything is saved.
    fn success_message(&self) -> String;
}

// ============================================================================
// Cart
// ============================================================================

/// Pays for every item in the cart and persists them in one bulk request.
#[derive(Debug, Clone)]
pub struct CartPlan {
    items: Vec<CartItem>,
}

impl CartPlan {
    /// Snapshot of the cart as it is now.
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

#[async_trait]
impl CheckoutPlan for CartPlan {
    fn description(&self) -> String {
        "Cart Checkout".to_string()
    }

    fn precheck(&self) -> Result<(), CheckoutError> {
        if self.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(())
    }

    async fn resolve_fee(&self, _gateway: &dyn BookingGateway) -> Result<Decimal, CheckoutError> {
        Ok(self.items.iter().map(|item| item.final_amount).sum())
    }

    async fn persist(
        &self,
        gateway: &dyn BookingGateway,
        identity: Option<&Identity>,
        payment: &PaymentResult,
        _amount: Decimal,
    ) -> GatewayResult<()> {
        let user_id = identity.and_then(Identity::user_id);
        let records: Vec<BookingRecord> = self
            .items
            .iter()
            .map(|item| BookingRecord::from_cart_item(item, user_id, &payment.razorpay_payment_id))
            .collect();

        gateway.add_bulk_bookings(&records).await
    }

    fn confirmation(&self, identity: Option<&Identity>, amount: Decimal) -> Option<BookingEmail> {
        Some(BookingEmail {
            user_id: identity.and_then(Identity::user_id),
            user_email: identity.and_then(|i| i.email()).map(str::to_string),
            total_amount: amount,
            bookings: self.items.clone(),
        })
    }

    fn success_message(&self) -> String {
        "All bookings confirmed!".to_string()
    }
}

// ============================================================================
// Visitor passes
// ============================================================================

/// Paid guest pass at a fixed fee.
#[derive(Debug, Clone)]
pub struct VisitorPassPlan {
    pass: VisitorPass,
    fee: Decimal,
}

impl VisitorPassPlan {
    pub fn new(pass: VisitorPass, fee: Decimal) -> Self {
        Self { pass, fee }
    }
}

#[async_trait]
impl CheckoutPlan for VisitorPassPlan {
    fn description(&self) -> String {
        format!("Visitor Pass for {}", self.pass.name)
    }

    fn precheck(&self) -> Result<(), CheckoutError> {
        if self.fee <= Decimal::ZERO {
            return Err(CheckoutError::InvalidFee);
        }
        Ok(())
    }

    async fn resolve_fee(&self, _gateway: &dyn BookingGateway) -> Result<Decimal, CheckoutError> {
        Ok(self.fee)
    }

    fn prefill(&self, identity: Option<&Identity>) -> Prefill {
        Prefill {
            name: identity.and_then(|i| i.name()).map(str::to_string),
            email: identity.and_then(|i| i.email()).map(str::to_string),
            contact: Some(self.pass.contact.clone()),
        }
    }

    async fn persist(
        &self,
        gateway: &dyn BookingGateway,
        identity: Option<&Identity>,
        payment: &PaymentResult,
        amount: Decimal,
    ) -> GatewayResult<()> {
        let visitor = NewVisitor {
            pass: self.pass.clone(),
            user_id: identity.and_then(Identity::user_id),
            payment_id: payment.razorpay_payment_id.clone(),
            amount_paid: amount,
            booking_id: None,
        };
        gateway.add_visitor(&visitor).await
    }

    fn success_message(&self) -> String {
        "Visitor Registered Successfully!".to_string()
    }
}

/// Guest pass tied to an existing booking. The backend validates the visiting
/// date against the booking and may quote its own fee.
#[derive(Debug, Clone)]
pub struct BookingVisitorPassPlan {
    booking_id: i64,
    pass: VisitorPass,
    default_fee: Decimal,
}

impl BookingVisitorPassPlan {
    pub fn new(booking_id: i64, pass: VisitorPass, default_fee: Decimal) -> Self {
        Self {
            booking_id,
            pass,
            default_fee,
        }
    }
}

#[async_trait]
impl CheckoutPlan for BookingVisitorPassPlan {
    fn description(&self) -> String {
        format!("Visitor Pass for {} (booking #{})", self.pass.name, self.booking_id)
    }

    async fn resolve_fee(&self, gateway: &dyn BookingGateway) -> Result<Decimal, CheckoutError> {
        let check = VisitorDateCheck {
            booking_id: self.booking_id,
            visiting_date: self.pass.visiting_date.clone(),
        };

        let approval = gateway
            .validate_visitor_date(&check)
            .await
            .map_err(|source| CheckoutError::FeeRejected {
                message: source.user_message("Visiting date is not covered by this booking."),
                source,
            })?;

        Ok(approval.fee.unwrap_or(self.default_fee))
    }

    fn prefill(&self, identity: Option<&Identity>) -> Prefill {
        Prefill {
            name: identity.and_then(|i| i.name()).map(str::to_string),
            email: identity.and_then(|i| i.email()).map(str::to_string),
            contact: Some(self.pass.contact.clone()),
        }
    }

    async fn persist(
        &self,
        gateway: &dyn BookingGateway,
        identity: Option<&Identity>,
        payment: &PaymentResult,
        amount: Decimal,
    ) -> GatewayResult<()> {
        let visitor = NewVisitor {
            pass: self.pass.clone(),
            user_id: identity.and_then(Identity::user_id),
            payment_id: payment.razorpay_payment_id.clone(),
            amount_paid: amount,
            booking_id: Some(self.booking_id),
        };
        gateway.add_visitor(&visitor).await
    }

    fn success_message(&self) -> String {
        "Visitor Registered Successfully!".to_string()
    }
}

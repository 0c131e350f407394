//! The three checkout entry points. Each builds a plan and hands it to the shared orchestrator.

use rust_decimal::Decimal;
use tracing::info;
use vayuhu_shared::models::visitor::VisitorPass;

use crate::cart::Cart;
use crate::error::CheckoutError;
use crate::orchestrator::{CheckoutOrchestrator, CheckoutOutcome};
use crate::plan::{BookingVisitorPassPlan, CartPlan, VisitorPassPlan};

/// Pay for everything in the cart. The cart is cleared only when the checkout completes.
pub async fn checkout_cart(
    orchestrator: &CheckoutOrchestrator,
    cart: &mut Cart,
) -> Result<CheckoutOutcome, CheckoutError> {
    let plan = CartPlan::from_cart(cart);
    let outcome = orchestrator.run(&plan).await?;

    if outcome.is_completed() {
        info!("Clearing {} paid item(s) from cart", cart.len());
        cart.clear();
    }
    Ok(outcome)
}

/// Buy a stand-alone visitor pass at `fee`.
pub async fn buy_visitor_pass(
    orchestrator: &CheckoutOrchestrator,
    pass: VisitorPass,
    fee: Decimal,
) -> Result<CheckoutOutcome, CheckoutError> {
    orchestrator.run(&VisitorPassPlan::new(pass, fee)).await
}

/// Buy a visitor pass under an existing booking. The backend may quote a fee other than `default_fee`.
pub async fn buy_booking_visitor_pass(
    orchestrator: &CheckoutOrchestrator,
    booking_id: i64,
    pass: VisitorPass,
    default_fee: Decimal,
) -> Result<CheckoutOutcome, CheckoutError> {
    orchestrator
        .run(&BookingVisitorPassPlan::new(booking_id, pass, default_fee))
        .await
}

pub mod cart;
pub mod error;
pub mod flows;
pub mod orchestrator;
pub mod plan;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use cart::{Cart, CartError};
pub use error::{CheckoutError, FailureClass};
pub use flows::{buy_booking_visitor_pass, buy_visitor_pass, checkout_cart};
pub use orchestrator::{CheckoutOrchestrator, CheckoutOutcome, CheckoutReceipt, CheckoutSettings};
pub use plan::{BookingVisitorPassPlan, CartPlan, CheckoutPlan, VisitorPassPlan};
pub use state::{CheckoutAttempt, TransitionError};

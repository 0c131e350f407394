pub mod gateway;
pub mod identity;
pub mod payment;

pub use gateway::{BookingGateway, GatewayError, GatewayResult};
pub use identity::{MemorySessionStore, SessionError, SessionProvider};
pub use payment::{
    MockPaymentWidget, MockWidgetBehavior, PaymentWidget, PendingWidget, Prefill, WidgetCallbacks,
    WidgetError, WidgetOptions, WidgetOutcome,
};

pub mod models;
pub mod pii;

pub use models::cart::{BookingRecord, CartItem};
pub use models::events::{CheckoutEvent, CheckoutState, FailedStage};
pub use models::identity::{Admin, Identity, Session, User};
pub use models::payment::{PaymentOrder, PaymentResult};
pub use pii::Masked;

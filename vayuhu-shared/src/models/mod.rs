pub mod admin;
pub mod cart;
pub mod de;
pub mod events;
pub mod identity;
pub mod listings;
pub mod payment;
pub mod visitor;

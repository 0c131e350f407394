pub mod admin;
pub mod auth;
pub mod client;
pub mod envelope;
pub mod listings;
pub mod payments;
pub mod reports;
pub mod widget;

pub use auth::AuthError;
pub use client::ApiClient;
pub use widget::TerminalWidget;

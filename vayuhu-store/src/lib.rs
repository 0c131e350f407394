pub mod app_config;
pub mod session_store;

pub use app_config::AppConfig;
pub use session_store::FileSessionStore;

use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost/vayuhu_backend";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub payment: PaymentConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    pub currency: String,
    pub merchant_name: String,
    pub theme_color: String,
    pub visitor_pass_fee: Decimal,
    pub script_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub path: PathBuf,
}

impl AppConfig {
    /// Load from `./config` and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with_env(dir, None)
    }

    /// `env` replaces the process environment when given.
    fn load_with_env(
        dir: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .set_default("api.base_url", DEFAULT_API_URL)?
            .set_default("api.timeout_seconds", 30)?
            .set_default("payment.currency", "INR")?
            .set_default("payment.merchant_name", "Vayuhu Workspaces")?
            .set_default("payment.theme_color", "#F97316")?
            .set_default("payment.visitor_pass_fee", 500)?
            .set_default("payment.script_url", "https://checkout.razorpay.com/v1/checkout.js")?
            .set_default("session.path", ".vayuhu/session.json")?
            .add_source(file("default"))
            .add_source(file(&run_mode))
            // Not checked in
            .add_source(file("local"))
            // e.g. `VAYUHU_API__BASE_URL=https://api.example.com`
            .add_source(
                config::Environment::with_prefix("VAYUHU")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let mut cfg: AppConfig = s.try_deserialize()?;
        cfg.api.base_url = cfg.api.base_url.trim_end_matches('/').to_string();
        Ok(cfg)
    }
}

use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use vayuhu_core::{PaymentWidget, WidgetCallbacks, WidgetError, WidgetOptions};
use vayuhu_shared::PaymentResult;

/// Payment widget for the command line.
///
/// Prints the checkout options, then reads the payment id and signature the
/// operator copied from the hosted checkout page. An empty payment id dismisses.
pub struct TerminalWidget {
    http: reqwest::Client,
    script_url: Option<String>,
}

impl TerminalWidget {
    /// `load` fetches `script_url` to confirm the checkout script is reachable.
    pub fn new(script_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            script_url: Some(script_url.into()),
        }
    }

    /// Skips the script reachability check.
    pub fn offline() -> Self {
        Self {
            http: reqwest::Client::new(),
            script_url: None,
        }
    }
}

/// Build a payment result from the operator's replies. `None` means dismissal.
pub fn parse_reply(order_id: &str, payment_id: &str, signature: &str) -> Option<PaymentResult> {
    let payment_id = payment_id.trim();
    if payment_id.is_empty() {
        return None;
    }
    Some(PaymentResult {
        razorpay_payment_id: payment_id.to_string(),
        razorpay_order_id: order_id.to_string(),
        razorpay_signature: signature.trim().to_string(),
    })
}

fn prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[async_trait]
impl PaymentWidget for TerminalWidget {
    async fn load(&self) -> Result<(), WidgetError> {
        let Some(url) = &self.script_url else {
            return Ok(());
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| WidgetError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(WidgetError::Unavailable(format!(
                "{url} returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    fn open(&self, options: WidgetOptions, callbacks: WidgetCallbacks) -> Result<(), WidgetError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| WidgetError::OpenFailed(e.to_string()))?;
        let rendered = serde_json::to_string_pretty(&options)
            .map_err(|e| WidgetError::OpenFailed(e.to_string()))?;

        println!("Complete the payment with these checkout options:\n{rendered}");
        info!(order_id = %options.order_id, "Waiting for payment details on stdin");

        handle.spawn_blocking(move || {
            let payment_id = match prompt("Payment id (leave empty to cancel)") {
                Ok(line) => line,
                Err(e) => {
                    // Dropping the callbacks reports the widget as abandoned.
                    warn!(error = %e, "Could not read payment id");
                    return;
                }
            };
            if payment_id.trim().is_empty() {
                callbacks.dismiss();
                return;
            }
            let signature = match prompt("Signature") {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Could not read signature");
                    return;
                }
            };
            match parse_reply(&options.order_id, &payment_id, &signature) {
                Some(result) => callbacks.complete(result),
                None => callbacks.dismiss(),
            }
        });
        Ok(())
    }
}

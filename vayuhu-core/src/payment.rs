use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;
use vayuhu_shared::PaymentResult;

/// Customer details pre-filled in the widget form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Prefill {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// Options the payment widget is opened with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WidgetOptions {
    pub key: String,
    /// Amount in minor units (paise).
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme_color: String,
}

/// How the widget handed control back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
    /// Completion callback fired with a signed result.
    Completed(PaymentResult),
    /// Dismissal callback fired.
    Dismissed,
    /// The widget went away without invoking either callback.
    Abandoned,
}

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Payment widget script is unavailable: {0}")]
    Unavailable(String),

    #[error("Payment widget failed to open: {0}")]
    OpenFailed(String),
}

/// Single-use completion/dismissal callbacks handed to the widget.
///
/// Both methods consume the handle, so at most one callback ever fires.
#[derive(Debug)]
pub struct WidgetCallbacks {
    tx: oneshot::Sender<WidgetOutcome>,
}

/// The flow's side of the callback pair; resolves when the widget calls back.
#[derive(Debug)]
pub struct PendingWidget {
    rx: oneshot::Receiver<WidgetOutcome>,
}

impl WidgetCallbacks {
    pub fn pair() -> (WidgetCallbacks, PendingWidget) {
        let (tx, rx) = oneshot::channel();
        (WidgetCallbacks { tx }, PendingWidget { rx })
    }

    /// Completion callback.
    pub fn complete(self, result: PaymentResult) {
        if self.tx.send(WidgetOutcome::Completed(result)).is_err() {
            tracing::warn!("Payment completed after the checkout flow stopped listening");
        }
    }

    /// Dismissal callback (`modal.ondismiss`).
    pub fn dismiss(self) {
        let _ = self.tx.send(WidgetOutcome::Dismissed);
    }
}

impl PendingWidget {
    /// Wait for the widget. There is no timeout: this suspends until the user acts.
    pub async fn outcome(self) -> WidgetOutcome {
        self.rx.await.unwrap_or(WidgetOutcome::Abandoned)
    }
}

/// Third-party checkout widget embedded by the host.
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    /// Ensure the checkout script is loaded. Fails when it cannot be.
    async fn load(&self) -> Result<(), WidgetError>;

    /// Open the widget and return immediately. The outcome arrives through `callbacks`.
    fn open(&self, options: WidgetOptions, callbacks: WidgetCallbacks) -> Result<(), WidgetError>;
}

/// What the mock widget does when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockWidgetBehavior {
    /// Complete with a deterministic payment result.
    Pay,
    /// Fire the dismissal callback.
    Dismiss,
    /// Drop the callbacks without firing either.
    Abandon,
    /// Fail to load the script.
    Unavailable,
}

/// Scriptable widget for tests and demos. Records every set of options it was opened with.
pub struct MockPaymentWidget {
    behavior: MockWidgetBehavior,
    opened: Mutex<Vec<WidgetOptions>>,
    payments: AtomicUsize,
}

impl MockPaymentWidget {
    pub fn new(behavior: MockWidgetBehavior) -> Self {
        Self {
            behavior,
            opened: Mutex::new(Vec::new()),
            payments: AtomicUsize::new(0),
        }
    }

    pub fn opened(&self) -> Vec<WidgetOptions> {
        self.opened
            .lock()
            .map(|opened| opened.clone())
            .unwrap_or_default()
    }

    pub fn open_count(&self) -> usize {
        self.opened().len()
    }
}

#[async_trait]
impl PaymentWidget for MockPaymentWidget {
    async fn load(&self) -> Result<(), WidgetError> {
        if self.behavior == MockWidgetBehavior::Unavailable {
            return Err(WidgetError::Unavailable("mock script blocked".to_string()));
        }
        Ok(())
    }

    fn open(&self, options: WidgetOptions, callbacks: WidgetCallbacks) -> Result<(), WidgetError> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(options.clone());
        }

        match self.behavior {
            MockWidgetBehavior::Pay => {
                let n = self.payments.fetch_add(1, Ordering::SeqCst) + 1;
                callbacks.complete(PaymentResult {
                    razorpay_payment_id: format!("pay_mock_{}", n),
                    razorpay_order_id: options.order_id,
                    razorpay_signature: "mock_signature".to_string(),
                });
            }
            MockWidgetBehavior::Dismiss => callbacks.dismiss(),
            MockWidgetBehavior::Abandon => drop(callbacks),
            MockWidgetBehavior::Unavailable => {
                return Err(WidgetError::OpenFailed("mock script blocked".to_string()));
            }
        }
        Ok(())
    }
}

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;
use vayuhu_core::{BookingGateway, PaymentWidget, SessionProvider, WidgetCallbacks, WidgetOptions, WidgetOutcome};
use vayuhu_shared::{CheckoutEvent, CheckoutState};

use crate::error::{CheckoutError, FailureClass};
use crate::plan::CheckoutPlan;
use crate::state::CheckoutAttempt;

/// Merchant-side settings passed to the payment widget.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub currency: String,
    pub merchant_name: String,
    pub theme_color: String,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            merchant_name: "Vayuhu Workspaces".to_string(),
            theme_color: "#F97316".to_string(),
        }
    }
}

/// A finished checkout.
#[derive(Debug)]
pub struct CheckoutReceipt {
    pub attempt_id: Uuid,
    pub order_id: String,
    pub payment_id: String,
    pub amount: Decimal,
    pub message: String,
    /// Best-effort confirmation email still in flight. Dropping it detaches the task.
    pub notification: Option<JoinHandle<()>>,
}

#[derive(Debug)]
pub enum CheckoutOutcome {
    Completed(CheckoutReceipt),
    /// The user closed the widget. Nothing was charged.
    Cancelled { attempt_id: Uuid },
}

impl CheckoutOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CheckoutOutcome::Completed(_))
    }
}

/// Drives one checkout attempt: order creation, payment widget, verification, persistence, notification.
pub struct CheckoutOrchestrator {
    gateway: Arc<dyn BookingGateway>,
    widget: Arc<dyn PaymentWidget>,
    session: Arc<dyn SessionProvider>,
    settings: CheckoutSettings,
    events: broadcast::Sender<CheckoutEvent>,
}

impl CheckoutOrchestrator {
    pub fn new(
        gateway: Arc<dyn BookingGateway>,
        widget: Arc<dyn PaymentWidget>,
        session: Arc<dyn SessionProvider>,
        settings: CheckoutSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            gateway,
            widget,
            session,
            settings,
            events,
        }
    }

    /// Lifecycle events of every attempt run from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CheckoutEvent> {
        self.events.subscribe()
    }

    /// Run a checkout for `plan`.
    ///
    /// Returns `Cancelled` when the user dismisses the widget. Post-payment failures
    /// come back as errors whose `class()` is `PostPayment`.
    pub async fn run(&self, plan: &dyn CheckoutPlan) -> Result<CheckoutOutcome, CheckoutError> {
        let mut attempt = CheckoutAttempt::new(Some(self.events.clone()));
        let identity = self.session.current().map(|session| session.identity);

        // 1. Local checks and amount
        if let Err(e) = plan.precheck() {
            return Err(self.fail(&mut attempt, e));
        }
        let amount = match plan.resolve_fee(self.gateway.as_ref()).await {
            Ok(amount) if amount > Decimal::ZERO => amount,
            Ok(_) => return Err(self.fail(&mut attempt, CheckoutError::InvalidFee)),
            Err(e) => return Err(self.fail(&mut attempt, e)),
        };
        let Some(minor_amount) = (amount * Decimal::ONE_HUNDRED).round().to_i64() else {
            return Err(self.fail(&mut attempt, CheckoutError::InvalidFee));
        };

        // 2. Widget script must be available before an order is created
        if let Err(e) = self.widget.load().await {
            return Err(self.fail(&mut attempt, CheckoutError::WidgetUnavailable(e)));
        }

        // 3. Payment order
        let order = match self.gateway.create_payment_order(amount).await {
            Ok(order) => order,
            Err(e) => return Err(self.fail(&mut attempt, CheckoutError::order_creation(e))),
        };
        attempt.advance(CheckoutState::OrderCreated, None)?;
        info!("Checkout {} created order {} for {}", attempt.id(), order.order_id, amount);

        // 4. Hand over to the widget and wait for exactly one callback
        let options = WidgetOptions {
            key: order.key.clone(),
            amount: minor_amount,
            currency: self.settings.currency.clone(),
            name: self.settings.merchant_name.clone(),
            description: plan.description(),
            order_id: order.order_id.clone(),
            prefill: plan.prefill(identity.as_ref()),
            theme_color: self.settings.theme_color.clone(),
        };
        let (callbacks, pending) = WidgetCallbacks::pair();
        if let Err(e) = self.widget.open(options, callbacks) {
            return Err(self.fail(&mut attempt, CheckoutError::WidgetUnavailable(e)));
        }
        attempt.advance(CheckoutState::AwaitingWidget, None)?;

        let payment = match pending.outcome().await {
            WidgetOutcome::Completed(payment) => payment,
            WidgetOutcome::Dismissed => {
                attempt.advance(
                    CheckoutState::Cancelled,
                    Some("Payment cancelled by user".to_string()),
                )?;
                return Ok(CheckoutOutcome::Cancelled {
                    attempt_id: attempt.id(),
                });
            }
            WidgetOutcome::Abandoned => {
                warn!("Checkout {} widget closed without a callback", attempt.id());
                attempt.advance(
                    CheckoutState::Cancelled,
                    Some("Payment window closed".to_string()),
                )?;
                return Ok(CheckoutOutcome::Cancelled {
                    attempt_id: attempt.id(),
                });
            }
        };
        let payment_id = payment.razorpay_payment_id.clone();

        // 5. Money has moved from here on
        attempt.advance(CheckoutState::Verifying, None)?;
        if let Err(source) = self.gateway.verify_payment(&payment).await {
            let err = CheckoutError::VerificationFailed {
                payment_id: payment_id.clone(),
                source,
            };
            return Err(self.fail(&mut attempt, err));
        }

        // 6. Persist
        attempt.advance(CheckoutState::Persisting, None)?;
        if let Err(source) = plan
            .persist(self.gateway.as_ref(), identity.as_ref(), &payment, amount)
            .await
        {
            let err = CheckoutError::persistence(&payment_id, source);
            return Err(self.fail(&mut attempt, err));
        }

        // 7. Best-effort notification, allowed to finish after we return
        let notification = match plan.confirmation(identity.as_ref(), amount) {
            Some(email) => {
                attempt.advance(CheckoutState::Notifying, None)?;
                let gateway = Arc::clone(&self.gateway);
                let attempt_id = attempt.id();
                Some(tokio::spawn(async move {
                    if let Err(e) = gateway.send_booking_email(&email).await {
                        warn!("Checkout {} confirmation email failed: {}", attempt_id, e);
                    }
                }))
            }
            None => None,
        };

        let message = plan.success_message();
        attempt.advance(CheckoutState::Done, Some(message.clone()))?;
        info!("Checkout {} done, payment {}", attempt.id(), payment_id);

        Ok(CheckoutOutcome::Completed(CheckoutReceipt {
            attempt_id: attempt.id(),
            order_id: order.order_id,
            payment_id,
            amount,
            message,
            notification,
        }))
    }

    /// Record a failure on the attempt and log it by severity.
    fn fail(&self, attempt: &mut CheckoutAttempt, err: CheckoutError) -> CheckoutError {
        match err.class() {
            FailureClass::PrePayment => {
                warn!("Checkout {} failed before payment: {}", attempt.id(), err)
            }
            FailureClass::PostPayment => error!(
                "Checkout {} failed after payment {}: {} ({:?})",
                attempt.id(),
                err.payment_id().unwrap_or("-"),
                err,
                std::error::Error::source(&err).map(|s| s.to_string())
            ),
        }

        if let Err(e) = attempt.advance(CheckoutState::Failed(err.stage()), Some(err.to_string())) {
            error!("{}", e);
        }
        err
    }
}

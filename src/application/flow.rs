use crate::domain::payment::{
    CheckoutSession, NavigationTarget, Outcome, PaymentIntent, PaymentRecord, PaymentStatus,
    ReturnContext,
};
use crate::domain::plan::PlanCatalog;
use crate::domain::ports::{NavigatorRef, PaymentBackendBox};
use crate::error::{PaymentError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Fixed wait before auto-navigating away from a success/pending screen,
/// giving the user time to read the confirmation.
pub const GRACE_DELAY: Duration = Duration::from_secs(3);

/// Severity of the single user-visible notification a reconciliation emits.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// The one toast/banner describing the resolved state of a payment attempt.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.to_string(),
        }
    }

    fn info(message: &str) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.to_string(),
        }
    }
}

/// A deferred forward navigation spawned for success/pending outcomes.
///
/// The timer must not outlive the hosting view: a stale navigation after the
/// user already left is a defect. Dropping the handle aborts the timer, so
/// teardown cancels implicitly; `wait` consumes it to let the navigation fire.
pub struct ScheduledNavigation {
    target: NavigationTarget,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledNavigation {
    fn spawn(navigator: NavigatorRef, target: NavigationTarget, delay: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(target).await;
        });
        info!(target = %target, delay_secs = delay.as_secs_f64(), "navigation scheduled");
        Self {
            target,
            handle: Some(handle),
        }
    }

    pub fn target(&self) -> NavigationTarget {
        self.target
    }

    /// Aborts the pending timer. Safe to call after it already fired.
    pub fn cancel(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
        info!(target = %self.target, "scheduled navigation cancelled");
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the navigation to fire (or to be cancelled).
    pub async fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// The resolved result of one reconciliation attempt.
pub struct Reconciliation {
    pub context: ReturnContext,
    /// The status the outcome was derived from: the backend record's status
    /// when a fetch succeeded, the URL status (or `failure`) otherwise.
    pub status: PaymentStatus,
    pub outcome: Outcome,
    pub record: Option<PaymentRecord>,
    pub notice: Notice,
    /// Locally recoverable error surfaced when the backend was unreachable.
    pub error: Option<String>,
    pub navigation: Option<ScheduledNavigation>,
}

impl Reconciliation {
    /// Explicit exits offered on terminal outcomes: retry via plan selection
    /// and a support contact path. Empty when an auto-navigation is scheduled.
    pub fn actions(&self) -> &'static [NavigationTarget] {
        match self.outcome {
            Outcome::Failed | Outcome::Unknown => {
                &[NavigationTarget::PlanSelection, NavigationTarget::Support]
            }
            Outcome::Success | Outcome::Pending => &[],
        }
    }
}

/// Orchestrates the return trip from the external payment processor.
///
/// `PaymentFlow` owns the backend and navigator ports and maps the
/// asynchronous payment lifecycle to exactly one of four user-facing
/// outcomes, scheduling the forward navigation for success/pending cases.
pub struct PaymentFlow {
    backend: PaymentBackendBox,
    navigator: NavigatorRef,
    grace_delay: Duration,
}

impl PaymentFlow {
    pub fn new(backend: PaymentBackendBox, navigator: NavigatorRef) -> Self {
        Self {
            backend,
            navigator,
            grace_delay: GRACE_DELAY,
        }
    }

    /// Overrides the grace delay before auto-navigation.
    pub fn with_grace_delay(mut self, grace_delay: Duration) -> Self {
        self.grace_delay = grace_delay;
        self
    }

    /// Determines the true status of a payment attempt and drives exactly one
    /// outcome.
    ///
    /// Performs at most one backend status fetch: only when the context
    /// carries a `payment_id`. A successful fetch is authoritative and
    /// overrides whatever status the URL claims; a failed fetch resolves to
    /// `unknown` rather than silently trusting the unauthenticated URL value.
    /// Port failures never escape: every path ends in an outcome.
    pub async fn reconcile(&self, context: ReturnContext) -> Reconciliation {
        match context.payment_id.clone() {
            Some(payment_id) => match self.backend.payment_status(&payment_id).await {
                Ok(record) => {
                    let status = record.status;
                    self.resolve(context, status, Some(record), None)
                }
                Err(e) => {
                    warn!(payment_id = %payment_id, error = %e, "payment status fetch failed");
                    self.resolve(
                        context,
                        PaymentStatus::Unknown,
                        None,
                        Some("Erro ao verificar status do pagamento".to_string()),
                    )
                }
            },
            None => {
                let status = context.status.unwrap_or(PaymentStatus::Failure);
                self.resolve(context, status, None, None)
            }
        }
    }

    fn resolve(
        &self,
        context: ReturnContext,
        status: PaymentStatus,
        record: Option<PaymentRecord>,
        error: Option<String>,
    ) -> Reconciliation {
        let outcome = Outcome::from(status);
        let notice = match &error {
            Some(message) => Notice::error(message),
            None => match outcome {
                Outcome::Success => Notice::success("Pagamento aprovado com sucesso!"),
                Outcome::Pending => Notice::info("Pagamento pendente. Aguardando confirmação."),
                Outcome::Failed => Notice::error("Pagamento não foi aprovado."),
                Outcome::Unknown => Notice::error("Status de pagamento desconhecido"),
            },
        };
        let navigation = match outcome {
            Outcome::Success => Some(self.schedule(NavigationTarget::DashboardSuccess)),
            Outcome::Pending => Some(self.schedule(NavigationTarget::DashboardPending)),
            Outcome::Failed | Outcome::Unknown => None,
        };
        Reconciliation {
            context,
            status,
            outcome,
            record,
            notice,
            error,
            navigation,
        }
    }

    fn schedule(&self, target: NavigationTarget) -> ScheduledNavigation {
        ScheduledNavigation::spawn(Arc::clone(&self.navigator), target, self.grace_delay)
    }

    /// Initiates a payment for a plan and returns the processor hand-off.
    ///
    /// The plan must exist in the previously loaded catalog and must not be
    /// the free tier. A nominally-successful backend response missing
    /// `init_point` or `payment_id` fails the operation: no redirect happens
    /// on partial success.
    pub async fn checkout(
        &self,
        plan_id: &str,
        user_id: &str,
        catalog: &PlanCatalog,
    ) -> Result<CheckoutSession> {
        let intent = PaymentIntent::new(plan_id, user_id)?;
        let plan = catalog
            .find(&intent.plan_id)
            .ok_or_else(|| PaymentError::Validation(format!("unknown plan `{plan_id}`")))?;
        if plan.is_free() {
            return Err(PaymentError::Validation(format!(
                "plan `{plan_id}` is free and needs no payment"
            )));
        }

        let response = self.backend.create_payment(&intent).await?;
        let init_point = response
            .init_point
            .filter(|p| !p.is_empty())
            .ok_or(PaymentError::MissingField("init_point"))?;
        let payment_id = response
            .payment_id
            .filter(|p| !p.is_empty())
            .ok_or(PaymentError::MissingField("payment_id"))?;

        info!(payment_id = %payment_id, plan_id = %intent.plan_id, "checkout session created");
        Ok(CheckoutSession {
            init_point,
            payment_id,
        })
    }

    /// Loads the plan catalog through the backend port.
    pub async fn load_plans(&self) -> Result<PlanCatalog> {
        Ok(PlanCatalog::new(self.backend.plans().await?))
    }
}

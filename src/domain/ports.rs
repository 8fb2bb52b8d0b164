use super::payment::{CreatePaymentResponse, NavigationTarget, PaymentIntent, PaymentRecord};
use super::plan::Plan;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The Payment Backend Service: the external system of record for payment
/// lifecycle state. The client never writes payment state through it.
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    /// Starts a payment and returns the raw backend response. Field presence
    /// is checked by the caller, not here.
    async fn create_payment(&self, intent: &PaymentIntent) -> Result<CreatePaymentResponse>;

    /// Fetches the authoritative record for a payment id.
    async fn payment_status(&self, payment_id: &str) -> Result<PaymentRecord>;

    /// Fetches the plan catalog.
    async fn plans(&self) -> Result<Vec<Plan>>;
}

/// The host application shell's redirect surface. Deferred navigations fire
/// through this after the grace delay, so implementations must be shareable
/// with the spawned timer task.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, target: NavigationTarget);
}

pub type PaymentBackendBox = Box<dyn PaymentBackend>;
pub type NavigatorRef = Arc<dyn Navigator>;

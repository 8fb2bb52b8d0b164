use crate::domain::payment::{CreatePaymentResponse, PaymentIntent, PaymentRecord};
use crate::domain::plan::Plan;
use crate::domain::ports::PaymentBackend;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// On-disk shape of a backend fixture for offline runs and tests.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct BackendFixture {
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub payments: HashMap<String, PaymentRecord>,
    #[serde(default)]
    pub create: Option<CreatePaymentResponse>,
}

/// An in-memory stand-in for the Payment Backend Service.
///
/// Uses `Arc<RwLock<...>>` for shared concurrent access, so clones observe
/// the same state. The outage switch makes every call fail, simulating an
/// unreachable backend.
#[derive(Default, Clone)]
pub struct InMemoryPaymentBackend {
    records: Arc<RwLock<HashMap<String, PaymentRecord>>>,
    plans: Arc<RwLock<Vec<Plan>>>,
    create_response: Arc<RwLock<Option<CreatePaymentResponse>>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryPaymentBackend {
    /// Creates a new, empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads records, plans, and the scripted create response from a JSON
    /// fixture file.
    pub fn from_fixture_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let fixture: BackendFixture = serde_json::from_str(&raw)
            .map_err(|e| PaymentError::Validation(format!("invalid fixture: {e}")))?;
        Ok(Self::from_fixture(fixture))
    }

    pub fn from_fixture(fixture: BackendFixture) -> Self {
        Self {
            records: Arc::new(RwLock::new(fixture.payments)),
            plans: Arc::new(RwLock::new(fixture.plans)),
            create_response: Arc::new(RwLock::new(fixture.create)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn put_record(&self, record: PaymentRecord) {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
    }

    pub async fn set_plans(&self, plans: Vec<Plan>) {
        *self.plans.write().await = plans;
    }

    pub async fn set_create_response(&self, response: CreatePaymentResponse) {
        *self.create_response.write().await = Some(response);
    }

    /// When set, every call fails as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(PaymentError::Unreachable("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PaymentBackend for InMemoryPaymentBackend {
    async fn create_payment(&self, _intent: &PaymentIntent) -> Result<CreatePaymentResponse> {
        self.check_reachable()?;
        let response = self.create_response.read().await;
        response.clone().ok_or_else(|| PaymentError::Backend {
            status: 500,
            body: "no scripted create response".to_string(),
        })
    }

    async fn payment_status(&self, payment_id: &str) -> Result<PaymentRecord> {
        self.check_reachable()?;
        let records = self.records.read().await;
        records
            .get(payment_id)
            .cloned()
            .ok_or_else(|| PaymentError::Backend {
                status: 404,
                body: format!("payment {payment_id} not found"),
            })
    }

    async fn plans(&self) -> Result<Vec<Plan>> {
        self.check_reachable()?;
        let plans = self.plans.read().await;
        Ok(plans.clone())
    }
}

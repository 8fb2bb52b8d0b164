use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment lifecycle status as reported by the payment backend.
///
/// The first four variants are the backend's vocabulary. `Failure` is a
/// client-side pseudo-status used when no confirmation was obtainable at all.
/// Any value outside the known set parses to `Unknown`; the vocabulary is an
/// external contract that may grow, so parsing must never fail.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Failure,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Parses a status string from the redirect URL. Unrecognized values map
    /// to `Unknown` rather than erroring: URL parameters are caller-controlled.
    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "failure" => Self::Failure,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Failure => "failure",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// User-facing classification of a payment attempt.
///
/// `Success` and `Pending` trigger a deferred navigation into the product;
/// `Failed` and `Unknown` are terminal and wait for an explicit user action.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    Success,
    Pending,
    Failed,
    Unknown,
}

impl From<PaymentStatus> for Outcome {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Approved => Self::Success,
            PaymentStatus::Pending => Self::Pending,
            PaymentStatus::Rejected | PaymentStatus::Cancelled | PaymentStatus::Failure => {
                Self::Failed
            }
            PaymentStatus::Unknown => Self::Unknown,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Pending => "pending",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Represents a non-negative monetary amount in the platform's base currency.
///
/// This is a wrapper around `rust_decimal::Decimal` to enforce domain-specific
/// rules and provide type safety for monetary values coming off the wire.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "amount must be non-negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The authoritative payment record held by the payment backend.
///
/// The client only ever reads this; status transitions are backend-owned.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    pub id: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub status_detail: String,
    pub transaction_amount: Amount,
    pub date_created: DateTime<Utc>,
    /// Present only once the payment was approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_approved: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payment_method_id: String,
    #[serde(default)]
    pub payment_type_id: String,
}

/// The untrusted correlation parameters the external processor appends to the
/// return URL. Built once per page load; a missing key is a valid state.
///
/// When `payment_id` is present it is used to fetch the authoritative
/// [`PaymentRecord`], which supersedes whatever `status` the URL claims.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct ReturnContext {
    pub payment_id: Option<String>,
    pub status: Option<PaymentStatus>,
    pub merchant_order_id: Option<String>,
    pub preference_id: Option<String>,
    pub external_reference: Option<String>,
}

/// A request to start a payment for a plan, sent to the backend which answers
/// with the processor's hosted checkout URL. Not persisted client-side.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct PaymentIntent {
    /// Serialized as `plano_id`, the field name the backend expects.
    #[serde(rename = "plano_id")]
    pub plan_id: String,
    pub user_id: String,
}

impl PaymentIntent {
    pub fn new(plan_id: &str, user_id: &str) -> Result<Self, PaymentError> {
        if plan_id.trim().is_empty() {
            return Err(PaymentError::Validation("plan id is empty".to_string()));
        }
        if user_id.trim().is_empty() {
            return Err(PaymentError::Validation("user id is empty".to_string()));
        }
        Ok(Self {
            plan_id: plan_id.to_string(),
            user_id: user_id.to_string(),
        })
    }
}

/// Raw "create payment" response as the backend returns it. Both fields are
/// optional on the wire; the flow enforces their presence before redirecting.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq, Clone)]
pub struct CreatePaymentResponse {
    #[serde(default)]
    pub init_point: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
}

/// A fully-validated checkout hand-off: the hosted payment page to redirect
/// to and the backend-assigned payment id.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CheckoutSession {
    pub init_point: String,
    pub payment_id: String,
}

/// Where the host application shell can take the user after an outcome.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NavigationTarget {
    DashboardSuccess,
    DashboardPending,
    PlanSelection,
    Support,
}

impl NavigationTarget {
    pub fn path(&self) -> &'static str {
        match self {
            Self::DashboardSuccess => "/dashboard?payment=success",
            Self::DashboardPending => "/dashboard?payment=pending",
            Self::PlanSelection => "/planos",
            Self::Support => "/ajuda",
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

use crate::domain::payment::{CreatePaymentResponse, PaymentIntent, PaymentRecord};
use crate::domain::plan::Plan;
use crate::domain::ports::PaymentBackend;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Envelope every backend endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

/// REST adapter for the Payment Backend Service.
///
/// Credentials are injected at construction instead of living in a global
/// client, so the flow can be exercised against any backend instance.
pub struct HttpPaymentBackend {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpPaymentBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }
}

/// Unwraps a backend response: non-2xx is a backend error carrying the body;
/// a 2xx that is not a successful envelope with data is an invalid response.
fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(PaymentError::Backend {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|e| PaymentError::InvalidResponse(format!("{e}; body={body}")))?;
    if !envelope.success {
        let reason = envelope
            .error
            .or(envelope.message)
            .unwrap_or_else(|| body.to_string());
        return Err(PaymentError::InvalidResponse(reason));
    }
    envelope
        .data
        .ok_or_else(|| PaymentError::InvalidResponse("envelope has no data".to_string()))
}

#[async_trait]
impl PaymentBackend for HttpPaymentBackend {
    async fn create_payment(&self, intent: &PaymentIntent) -> Result<CreatePaymentResponse> {
        debug!(plan_id = %intent.plan_id, "POST /api/payments/create");
        let response = self
            .request(Method::POST, "/api/payments/create")
            .json(intent)
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    async fn payment_status(&self, payment_id: &str) -> Result<PaymentRecord> {
        debug!(payment_id, "GET /api/payments/status");
        let response = self
            .request(Method::GET, &format!("/api/payments/status/{payment_id}"))
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    async fn plans(&self) -> Result<Vec<Plan>> {
        debug!("GET /api/planos");
        let response = self.request(Method::GET, "/api/planos").send().await?;
        Self::read_envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;

    #[test]
    fn test_parse_success_envelope() {
        let body = r#"{
            "success": true,
            "data": {
                "id": "123",
                "status": "approved",
                "transaction_amount": 49.90,
                "date_created": "2025-08-01T12:00:00Z"
            },
            "message": "Status do pagamento obtido com sucesso"
        }"#;
        let record: PaymentRecord = parse_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(record.status, PaymentStatus::Approved);
    }

    #[test]
    fn test_parse_non_2xx_is_backend_error() {
        let result: Result<PaymentRecord> =
            parse_envelope(StatusCode::NOT_FOUND, r#"{"error": "Pagamento não encontrado"}"#);
        assert!(matches!(
            result,
            Err(PaymentError::Backend { status: 404, .. })
        ));
    }

    #[test]
    fn test_parse_unsuccessful_envelope() {
        let result: Result<PaymentRecord> =
            parse_envelope(StatusCode::OK, r#"{"success": false, "error": "boom"}"#);
        match result {
            Err(PaymentError::InvalidResponse(reason)) => assert_eq!(reason, "boom"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_body() {
        let result: Result<PaymentRecord> = parse_envelope(StatusCode::OK, "<html>oops</html>");
        assert!(matches!(result, Err(PaymentError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_envelope_without_data() {
        let result: Result<PaymentRecord> = parse_envelope(StatusCode::OK, r#"{"success": true}"#);
        assert!(matches!(result, Err(PaymentError::InvalidResponse(_))));
    }

    #[test]
    fn test_create_response_tolerates_missing_fields() {
        let body = r#"{"success": true, "data": {"payment_id": "p1"}}"#;
        let response: CreatePaymentResponse = parse_envelope(StatusCode::OK, body).unwrap();
        assert!(response.init_point.is_none());
        assert_eq!(response.payment_id.as_deref(), Some("p1"));
    }
}

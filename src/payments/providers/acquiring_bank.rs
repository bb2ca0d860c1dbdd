use crate::payments::error::{BankError, BankResult};
use crate::payments::provider::AcquiringBank;
use crate::payments::types::{
    parse_bank_body, AuthorizationOutcome, BankErrorResponse, BankPaymentRequest,
    BankPaymentResponse, ValidatedPaymentRequest,
};
use crate::payments::utils::PaymentHttpClient;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AcquiringBankConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for AcquiringBankConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Acquiring bank reached over HTTP at `POST {base_url}/payments`.
pub struct HttpAcquiringBank {
    config: AcquiringBankConfig,
    http: PaymentHttpClient,
}

impl HttpAcquiringBank {
    pub fn new(config: AcquiringBankConfig) -> BankResult<Self> {
        let http = PaymentHttpClient::new(config.timeout)?;
        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl AcquiringBank for HttpAcquiringBank {
    async fn authorize(
        &self,
        request: &ValidatedPaymentRequest,
    ) -> BankResult<AuthorizationOutcome> {
        let payload = BankPaymentRequest::from(request);
        let response = self
            .http
            .post_json(&self.endpoint("/payments"), &payload)
            .await?;

        if response.status.is_success() {
            let body: BankPaymentResponse = parse_bank_body(&response.body)?;
            info!(
                authorized = body.authorized,
                last_four = %request.last_four_card_digits(),
                "acquiring bank processed authorization"
            );
            return Ok(body.into());
        }

        let error = match response.status {
            StatusCode::BAD_REQUEST => {
                parse_bank_body::<BankErrorResponse>(&response.body)?.into_error()
            }
            StatusCode::SERVICE_UNAVAILABLE => BankError::Unavailable,
            status => BankError::Unexpected {
                status: status.as_u16(),
            },
        };
        warn!(
            status = response.status.as_u16(),
            kind = error.kind(),
            "acquiring bank refused authorization request"
        );
        Err(error)
    }

    fn name(&self) -> &'static str {
        "acquiring_bank"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::types::Currency;
    use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn spawn_bank(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn bank_at(base_url: String, timeout: Duration) -> HttpAcquiringBank {
        HttpAcquiringBank::new(AcquiringBankConfig { base_url, timeout }).unwrap()
    }

    fn request() -> ValidatedPaymentRequest {
        ValidatedPaymentRequest {
            card_number: "2222405343248877".to_string(),
            expiry_month: 6,
            expiry_year: 2027,
            currency: Currency::GBP,
            amount: 1000,
            cvv: "123".to_string(),
        }
    }

    async fn respond_with(status: AxumStatus, body: Value) -> HttpAcquiringBank {
        let router = Router::new().route(
            "/payments",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        bank_at(spawn_bank(router).await, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn sends_wire_format_and_reads_outcome() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let router = Router::new().route(
            "/payments",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(json!({"authorized": true, "authorization_code": "code"}))
                }
            }),
        );
        let bank = bank_at(spawn_bank(router).await, Duration::from_secs(5));

        let outcome = bank.authorize(&request()).await.unwrap();

        assert_eq!(
            outcome,
            AuthorizationOutcome {
                authorized: true,
                authorization_code: "code".to_string()
            }
        );
        let sent = seen.lock().unwrap().clone().unwrap();
        assert_eq!(
            sent,
            json!({
                "card_number": "2222405343248877",
                "expiry_date": "06/2027",
                "currency": "GBP",
                "amount": 1000,
                "cvv": "123"
            })
        );
    }

    #[tokio::test]
    async fn declined_is_an_outcome_not_an_error() {
        let bank = respond_with(
            AxumStatus::OK,
            json!({"authorized": false, "authorization_code": ""}),
        )
        .await;
        let outcome = bank.authorize(&request()).await.unwrap();
        assert!(!outcome.authorized);
    }

    #[tokio::test]
    async fn bad_request_carries_bank_message() {
        let bank = respond_with(
            AxumStatus::BAD_REQUEST,
            json!({"error_message": "Not all required properties were sent in the request"}),
        )
        .await;
        let err = bank.authorize(&request()).await.unwrap_err();
        assert_eq!(
            err,
            BankError::RejectedPayload {
                error_message: "Not all required properties were sent in the request"
                    .to_string()
            }
        );
    }

    #[tokio::test]
    async fn service_unavailable_maps_to_unavailable() {
        let bank = respond_with(AxumStatus::SERVICE_UNAVAILABLE, json!({})).await;
        assert_eq!(
            bank.authorize(&request()).await.unwrap_err(),
            BankError::Unavailable
        );
    }

    #[tokio::test]
    async fn other_statuses_are_generic() {
        for status in [AxumStatus::INTERNAL_SERVER_ERROR, AxumStatus::NOT_FOUND] {
            let bank = respond_with(status, json!({})).await;
            assert_eq!(
                bank.authorize(&request()).await.unwrap_err(),
                BankError::Unexpected {
                    status: status.as_u16()
                }
            );
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_not_an_outcome() {
        let bank = respond_with(AxumStatus::OK, json!({"approved": "yes"})).await;
        assert!(matches!(
            bank.authorize(&request()).await,
            Err(BankError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn slow_bank_times_out() {
        let router = Router::new().route(
            "/payments",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"authorized": true, "authorization_code": "late"}))
            }),
        );
        let bank = bank_at(spawn_bank(router).await, Duration::from_millis(200));

        assert_eq!(
            bank.authorize(&request()).await.unwrap_err(),
            BankError::Timeout
        );
    }

    #[tokio::test]
    async fn unreachable_bank_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let bank = bank_at(format!("http://{}", addr), Duration::from_secs(2));
        assert!(matches!(
            bank.authorize(&request()).await,
            Err(BankError::Transport { .. })
        ));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let bank = bank_at("http://bank.local/".to_string(), Duration::from_secs(1));
        assert_eq!(bank.endpoint("/payments"), "http://bank.local/payments");
    }
}

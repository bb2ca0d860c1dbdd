use crate::payments::error::{BankError, BankResult};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// Status and raw body of a bank response, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Thin reqwest wrapper: one attempt per call, timeout applied per request.
#[derive(Clone)]
pub struct PaymentHttpClient {
    client: Client,
    timeout: Duration,
}

impl PaymentHttpClient {
    pub fn new(timeout: Duration) -> BankResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BankError::Transport {
                message: format!("failed to initialize HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> BankResult<RawResponse> {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;
        Ok(RawResponse { status, body })
    }
}

fn classify_transport_error(error: reqwest::Error) -> BankError {
    if error.is_timeout() {
        warn!(error = %error, "acquiring bank request timed out");
        BankError::Timeout
    } else {
        warn!(error = %error, "acquiring bank request failed");
        BankError::Transport {
            message: error.to_string(),
        }
    }
}

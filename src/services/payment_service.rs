//! Payment Service
//!
//! Runs a payment through validation, authorization with the acquiring bank
//! and storage in one pass. A payment is created once and never changes.

use crate::error::{AppError, AppResult};
use crate::logging::mask_card_number;
use crate::payments::provider::AcquiringBank;
use crate::payments::store::PaymentStore;
use crate::payments::types::{Payment, PaymentRequest, PaymentResponse, PaymentStatus};
use crate::payments::validation;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentService {
    bank: Arc<dyn AcquiringBank>,
    store: Arc<dyn PaymentStore>,
}

impl PaymentService {
    pub fn new(bank: Arc<dyn AcquiringBank>, store: Arc<dyn PaymentStore>) -> Self {
        Self { bank, store }
    }

    /// Validates, authorizes and stores a payment.
    ///
    /// A declined authorization is stored and returned like an authorized one.
    /// Validation and bank failures return early and store nothing.
    pub async fn create_payment(&self, request: PaymentRequest) -> AppResult<PaymentResponse> {
        let validated = validation::validate(&request).map_err(|errors| {
            warn!(fields = ?errors.fields(), "payment request rejected by validation");
            AppError::Validation(errors)
        })?;

        info!(
            card = %mask_card_number(&validated.card_number),
            currency = %validated.currency,
            amount = validated.amount,
            bank = self.bank.name(),
            "requesting authorization"
        );

        let outcome = self.bank.authorize(&validated).await.map_err(|e| {
            warn!(kind = e.kind(), error = %e, "authorization failed");
            AppError::Bank(e)
        })?;

        let payment = Payment::new(&validated, PaymentStatus::from_outcome(&outcome));
        self.store.put(payment.clone()).await;

        info!(
            payment_id = %payment.id,
            status = %payment.status,
            "payment stored"
        );

        Ok(PaymentResponse::from(&payment))
    }

    /// Returns `None` for an unknown id.
    pub async fn get_payment(&self, id: Uuid) -> Option<PaymentResponse> {
        self.store
            .get(id)
            .await
            .map(|payment| PaymentResponse::from(&payment))
    }
}

use crate::error::AppError;
use crate::payments::types::{PaymentRequest, PaymentResponse};
use crate::services::payment_service::PaymentService;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentsState {
    pub payment_service: Arc<PaymentService>,
}

/// POST /api/payments
pub async fn create_payment(
    State(state): State<PaymentsState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

    let payment = state.payment_service.create_payment(request).await?;
    info!(payment_id = %payment.id, status = %payment.status, "Payment created");

    Ok(Json(payment))
}

/// GET /api/payments/{id}
///
/// Ids that are not UUIDs cannot exist and are reported as not found.
pub async fn get_payment(
    State(state): State<PaymentsState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment_id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound(id.clone()))?;

    state
        .payment_service
        .get_payment(payment_id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound(id))
}

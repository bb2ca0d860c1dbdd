//! HTTP API surface

pub mod payments;

use crate::health::health;
use crate::middleware::error::handle_panic;
use crate::middleware::logging::{request_logging_middleware, UuidRequestId};
use crate::services::payment_service::PaymentService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

/// Builds the application router with request-id, logging and panic layers.
pub fn router(payment_service: PaymentService) -> Router {
    let state = payments::PaymentsState {
        payment_service: Arc::new(payment_service),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/payments", post(payments::create_payment))
        .route("/api/payments/{id}", get(payments::get_payment))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(axum::middleware::from_fn(request_logging_middleware))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

//! Error response formatting middleware
//!
//! Renders every failure as a problem-details JSON body and converts panics
//! escaping a handler into the generic 500 response.

use crate::error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;

/// Problem-details body returned for every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    pub status: u16,
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Field name to messages, present on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ProblemDetails {
    pub fn from_app_error(error: &AppError) -> Self {
        let errors = match error {
            AppError::Validation(errors) => Some(errors.to_map()),
            AppError::InvalidBody(message) => {
                Some(BTreeMap::from([("body".to_string(), vec![message.clone()])]))
            }
            _ => None,
        };

        Self {
            status: error.status_code(),
            title: error.title().to_string(),
            detail: error.detail(),
            errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self {
            AppError::NotFound(id) => {
                tracing::info!(payment_id = %id, "payment not found");
            }
            err if err.is_server_error() => {
                tracing::error!(
                    error = %err,
                    status = %status_code.as_u16(),
                    "Server error occurred"
                );
            }
            err => {
                tracing::warn!(
                    error = %err,
                    status = %status_code.as_u16(),
                    "Client error occurred"
                );
            }
        }

        (status_code, Json(ProblemDetails::from_app_error(&self))).into_response()
    }
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", message)).into_response()
}

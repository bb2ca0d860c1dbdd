//! Application error type for the payment API
//!
//! Each variant maps to one HTTP status and one problem title. Bank failures
//! keep their kind so callers can tell payload problems from outages.

use crate::payments::error::BankError;
use crate::payments::validation::ValidationErrors;
use thiserror::Error;

pub const INVALID_PAYLOAD_TITLE: &str = "Invalid Payload";
pub const NOT_FOUND_TITLE: &str = "Payment Not Found";
pub const BANK_TIMEOUT_TITLE: &str = "Acquiring Bank Timeout";
pub const BANK_REJECTED_TITLE: &str = "Acquiring Bank Rejected Request";
pub const BANK_UNAVAILABLE_TITLE: &str = "Acquiring Bank Unavailable";
pub const INTERNAL_ERROR_TITLE: &str = "Internal Server Error";
pub const INTERNAL_ERROR_DETAIL: &str = "An unhandled error occurred";

#[derive(Debug, Error)]
pub enum AppError {
    /// One or more request fields broke a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The body could not be bound at all (bad JSON, wrong types).
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("payment '{0}' was not found")]
    NotFound(String),

    #[error(transparent)]
    Bank(#[from] BankError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Bank(_) | AppError::Internal(_) => 500,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => INVALID_PAYLOAD_TITLE,
            AppError::NotFound(_) => NOT_FOUND_TITLE,
            AppError::Bank(err) => match err {
                BankError::Timeout => BANK_TIMEOUT_TITLE,
                BankError::RejectedPayload { .. } => BANK_REJECTED_TITLE,
                BankError::Unavailable => BANK_UNAVAILABLE_TITLE,
                _ => INTERNAL_ERROR_TITLE,
            },
            AppError::Internal(_) => INTERNAL_ERROR_TITLE,
        }
    }

    /// Client-facing detail. Never carries internal error text.
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => None,
            AppError::NotFound(id) => Some(format!("Payment with ID '{}' was not found.", id)),
            AppError::Bank(err) => Some(match err {
                BankError::RejectedPayload { error_message } => error_message.clone(),
                BankError::Timeout | BankError::Unavailable => err.summary().to_string(),
                _ => INTERNAL_ERROR_DETAIL.to_string(),
            }),
            AppError::Internal(_) => Some(INTERNAL_ERROR_DETAIL.to_string()),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

pub type AppResult<T> = Result<T, AppError>;

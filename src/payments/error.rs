use thiserror::Error;

pub type BankResult<T> = Result<T, BankError>;

pub const TIMEOUT_MESSAGE: &str = "Request to acquiring bank timed out.";
pub const REJECTED_PAYLOAD_MESSAGE: &str = "Acquiring bank rejected the payment request payload.";
pub const UNAVAILABLE_MESSAGE: &str = "Acquiring bank service is unavailable.";
pub const GENERIC_MESSAGE: &str =
    "An error occurred while processing the request with the acquiring bank.";

/// Failed interaction with the acquiring bank. Nothing here is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BankError {
    /// The bank did not answer within the configured window.
    #[error("Request to acquiring bank timed out.")]
    Timeout,

    /// HTTP 400: the bank considered the payload invalid.
    #[error("Acquiring bank rejected the payment request payload: {error_message}")]
    RejectedPayload { error_message: String },

    /// HTTP 503: overload or maintenance on the bank side.
    #[error("Acquiring bank service is unavailable.")]
    Unavailable,

    /// Any other non-success status.
    #[error("Acquiring bank returned HTTP {status}")]
    Unexpected { status: u16 },

    /// The bank answered with a body we could not read.
    #[error("invalid acquiring bank response: {message}")]
    MalformedResponse { message: String },

    /// Connection-level failure other than a timeout.
    #[error("acquiring bank request failed: {message}")]
    Transport { message: String },
}

impl BankError {
    pub fn kind(&self) -> &'static str {
        match self {
            BankError::Timeout => "timeout",
            BankError::RejectedPayload { .. } => "rejected_payload",
            BankError::Unavailable => "unavailable",
            BankError::Unexpected { .. } => "unexpected_status",
            BankError::MalformedResponse { .. } => "malformed_response",
            BankError::Transport { .. } => "transport",
        }
    }

    /// Summary message for the failure kind.
    pub fn summary(&self) -> &'static str {
        match self {
            BankError::Timeout => TIMEOUT_MESSAGE,
            BankError::RejectedPayload { .. } => REJECTED_PAYLOAD_MESSAGE,
            BankError::Unavailable => UNAVAILABLE_MESSAGE,
            _ => GENERIC_MESSAGE,
        }
    }
}

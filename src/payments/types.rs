use crate::payments::error::{BankError, BankResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Currencies accepted for card payments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Currency {
    GBP = 0,
    USD = 1,
    EUR = 2,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::GBP, Currency::USD, Currency::EUR];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsing is case-sensitive: "gbp" is not a supported currency.
impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| UnsupportedCurrency(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency: {0}")]
pub struct UnsupportedCurrency(pub String);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PaymentStatus {
    Authorized = 0,
    Declined = 1,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Authorized => "Authorized",
            PaymentStatus::Declined => "Declined",
        }
    }

    /// The only place an authorization outcome decides a payment's status.
    pub fn from_outcome(outcome: &AuthorizationOutcome) -> Self {
        if outcome.authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Declined
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inbound payment request as bound from JSON.
///
/// Every field is optional so that a missing value is reported by
/// validation against its own field instead of failing the whole body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRequest {
    pub card_number: Option<String>,
    pub expiry_month: Option<i64>,
    pub expiry_year: Option<i64>,
    pub currency: Option<String>,
    pub amount: Option<i64>,
    pub cvv: Option<String>,
}

/// A payment request that passed every validation rule.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedPaymentRequest {
    pub card_number: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub currency: Currency,
    pub amount: i64,
    pub cvv: String,
}

impl ValidatedPaymentRequest {
    pub fn last_four_card_digits(&self) -> String {
        last_four(&self.card_number)
    }
}

// Card number and CVV never reach logs through Debug.
impl std::fmt::Debug for ValidatedPaymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedPaymentRequest")
            .field("card_number", &crate::logging::mask_card_number(&self.card_number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("currency", &self.currency)
            .field("amount", &self.amount)
            .field("cvv", &"***")
            .finish()
    }
}

/// Final four characters of a card number.
pub fn last_four(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}

/// Result of a processed authorization. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationOutcome {
    pub authorized: bool,
    pub authorization_code: String,
}

/// Stored payment record. Only the last four card digits are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,
    pub status: PaymentStatus,
    pub last_four_card_digits: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub currency: Currency,
    pub amount: i64,
}

impl Payment {
    pub fn new(request: &ValidatedPaymentRequest, status: PaymentStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            status,
            last_four_card_digits: request.last_four_card_digits(),
            expiry_month: request.expiry_month,
            expiry_year: request.expiry_year,
            currency: request.currency,
            amount: request.amount,
        }
    }
}

/// External representation of a payment, returned by create and retrieve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub status: String,
    pub last_four_card_digits: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id,
            status: payment.status.as_str().to_string(),
            last_four_card_digits: payment.last_four_card_digits.clone(),
            expiry_month: payment.expiry_month,
            expiry_year: payment.expiry_year,
            currency: payment.currency.as_str().to_string(),
            amount: payment.amount,
        }
    }
}

/// Acquiring bank request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankPaymentRequest {
    pub card_number: String,
    pub expiry_date: String,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
}

impl From<&ValidatedPaymentRequest> for BankPaymentRequest {
    fn from(request: &ValidatedPaymentRequest) -> Self {
        Self {
            card_number: request.card_number.clone(),
            expiry_date: format_expiry_date(request.expiry_month, request.expiry_year),
            currency: request.currency.as_str().to_string(),
            amount: request.amount,
            cvv: request.cvv.clone(),
        }
    }
}

/// "MM/YYYY" with a zero-padded month.
pub fn format_expiry_date(month: u32, year: i32) -> String {
    format!("{:02}/{}", month, year)
}

/// Acquiring bank success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankPaymentResponse {
    pub authorized: bool,
    #[serde(default)]
    pub authorization_code: String,
}

impl From<BankPaymentResponse> for AuthorizationOutcome {
    fn from(response: BankPaymentResponse) -> Self {
        Self {
            authorized: response.authorized,
            authorization_code: response.authorization_code,
        }
    }
}

/// Acquiring bank body for a rejected (HTTP 400) request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankErrorResponse {
    pub error_message: String,
}

impl BankErrorResponse {
    pub fn into_error(self) -> BankError {
        BankError::RejectedPayload {
            error_message: self.error_message,
        }
    }
}

/// Parses a bank JSON body, treating any shape mismatch as a malformed response.
pub fn parse_bank_body<T: serde::de::DeserializeOwned>(body: &str) -> BankResult<T> {
    serde_json::from_str(body).map_err(|e| BankError::MalformedResponse {
        message: e.to_string(),
    })
}

//! Inbound payment request validation
//!
//! Every field is checked on its own and all violations are collected, so a
//! client sees the full list of problems in one response.

use crate::payments::types::{Currency, PaymentRequest, ValidatedPaymentRequest};
use chrono::{DateTime, Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

lazy_static! {
    static ref CARD_NUMBER_REGEX: Regex = Regex::new(r"^[0-9]{14,19}$").unwrap();
    static ref CURRENCY_REGEX: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
    static ref CVV_REGEX: Regex = Regex::new(r"^[0-9]{3,4}$").unwrap();
}

pub const CARD_NUMBER: &str = "card_number";
pub const EXPIRY_MONTH: &str = "expiry_month";
pub const EXPIRY_YEAR: &str = "expiry_year";
pub const CURRENCY: &str = "currency";
pub const AMOUNT: &str = "amount";
pub const CVV: &str = "cvv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-tagged validation failures, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("payment request failed validation on {} rule(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Distinct field names in first-seen order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !fields.contains(&error.field.as_str()) {
                fields.push(error.field.as_str());
            }
        }
        fields
    }

    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// `field -> [messages]` view used for the 400 response body.
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        map
    }
}

fn required(field: &str) -> String {
    format!("The {} field is required.", field)
}

/// An empty string counts as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Validates against the current UTC month.
pub fn validate(request: &PaymentRequest) -> Result<ValidatedPaymentRequest, ValidationErrors> {
    validate_at(request, Utc::now())
}

/// Validates with an explicit clock for the expiry rule.
pub fn validate_at(
    request: &PaymentRequest,
    now: DateTime<Utc>,
) -> Result<ValidatedPaymentRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let card_number = match present(&request.card_number) {
        None => {
            errors.add(CARD_NUMBER, required(CARD_NUMBER));
            None
        }
        Some(value) if !CARD_NUMBER_REGEX.is_match(value) => {
            errors.add(CARD_NUMBER, "Card number must be between 14 and 19 digits.");
            None
        }
        Some(value) => Some(value.to_string()),
    };

    let expiry_month = match request.expiry_month {
        None => {
            errors.add(EXPIRY_MONTH, required(EXPIRY_MONTH));
            None
        }
        Some(value) if !(1..=12).contains(&value) => {
            errors.add(EXPIRY_MONTH, "Expiry month must be between 1 and 12.");
            None
        }
        Some(value) => Some(value as u32),
    };

    let expiry_year = match request.expiry_year {
        None => {
            errors.add(EXPIRY_YEAR, required(EXPIRY_YEAR));
            None
        }
        Some(value) if !(1..=i32::MAX as i64).contains(&value) => {
            errors.add(EXPIRY_YEAR, "Expiry year must be a positive integer.");
            None
        }
        Some(value) => Some(value as i32),
    };

    // Only once both parts passed their own rules.
    if let (Some(month), Some(year)) = (expiry_month, expiry_year) {
        if !is_future_expiry(month, year, now) {
            let message = "Card expiry date must be in the future.";
            errors.add(EXPIRY_MONTH, message);
            errors.add(EXPIRY_YEAR, message);
        }
    }

    let currency = match present(&request.currency) {
        None => {
            errors.add(CURRENCY, required(CURRENCY));
            None
        }
        Some(value) if !CURRENCY_REGEX.is_match(value) => {
            errors.add(CURRENCY, "Currency must be 3 uppercase characters.");
            None
        }
        Some(value) => match Currency::from_str(value) {
            Ok(currency) => Some(currency),
            Err(_) => {
                errors.add(CURRENCY, "Currency must be a valid currency code.");
                None
            }
        },
    };

    let amount = match request.amount {
        None => {
            errors.add(AMOUNT, required(AMOUNT));
            None
        }
        Some(value) if value <= 0 => {
            errors.add(AMOUNT, "Amount must be a positive integer.");
            None
        }
        Some(value) => Some(value),
    };

    let cvv = match present(&request.cvv) {
        None => {
            errors.add(CVV, required(CVV));
            None
        }
        Some(value) if !CVV_REGEX.is_match(value) => {
            errors.add(CVV, "CVV must be 3 or 4 digits.");
            None
        }
        Some(value) => Some(value.to_string()),
    };

    match (card_number, expiry_month, expiry_year, currency, amount, cvv) {
        (
            Some(card_number),
            Some(expiry_month),
            Some(expiry_year),
            Some(currency),
            Some(amount),
            Some(cvv),
        ) if errors.is_empty() => Ok(ValidatedPaymentRequest {
            card_number,
            expiry_month,
            expiry_year,
            currency,
            amount,
            cvv,
        }),
        _ => Err(errors),
    }
}

/// True when (year, month) is strictly after the current (year, month).
fn is_future_expiry(month: u32, year: i32, now: DateTime<Utc>) -> bool {
    let current_year = now.year();
    let current_month = now.month();
    current_year < year || (current_year == year && current_month < month)
}

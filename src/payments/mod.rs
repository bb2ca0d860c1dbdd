//! Card payment domain: validation, acquiring bank adapter and payment storage

pub mod error;
pub mod provider;
pub mod providers;
pub mod store;
pub mod types;
pub mod utils;
pub mod validation;

pub use error::{BankError, BankResult};
pub use provider::AcquiringBank;
pub use store::{InMemoryPaymentStore, PaymentStore};
pub use types::{
    AuthorizationOutcome, Currency, Payment, PaymentRequest, PaymentResponse, PaymentStatus,
    ValidatedPaymentRequest,
};

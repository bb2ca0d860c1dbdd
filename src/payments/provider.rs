use crate::payments::error::BankResult;
use crate::payments::types::{AuthorizationOutcome, ValidatedPaymentRequest};
use async_trait::async_trait;

/// An acquiring bank that authorizes or declines card charges.
///
/// Implementations make exactly one attempt per call. A declined charge is
/// a successful call with `authorized == false`; only failed interactions
/// come back as `Err`.
#[async_trait]
pub trait AcquiringBank: Send + Sync {
    async fn authorize(&self, request: &ValidatedPaymentRequest)
        -> BankResult<AuthorizationOutcome>;

    fn name(&self) -> &'static str;
}

//! Services module for business logic

pub mod payment_service;

pub use crate::services::payment_service::PaymentService;

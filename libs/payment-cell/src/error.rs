use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

pub const INVALID_PAYMENT_MESSAGE: &str = "Please enter a valid name and amount.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("A payment is already being processed")]
    AlreadySubmitting,

    #[error("No payment is being processed")]
    NothingToCancel,

    #[error("Payment session {0} not found")]
    SessionNotFound(Uuid),
}

impl From<PaymentError> for AppError {
    fn from(error: PaymentError) -> Self {
        match error {
            PaymentError::InvalidInput(msg) => AppError::validation(msg),
            PaymentError::AlreadySubmitting | PaymentError::NothingToCancel => {
                AppError::Conflict(error.to_string())
            }
            PaymentError::SessionNotFound(_) => AppError::NotFound(error.to_string()),
        }
    }
}

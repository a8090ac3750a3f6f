use sea_orm::{DbErr, TransactionError};
use thiserror::Error;

/// Errors surfaced by the service layer. Validation failures are detected
/// before any mutation; storage failures inside a transaction roll the whole
/// transaction back before propagating.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("access denied for this role")]
    Forbidden,
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("insufficient stock for product {product_id}")]
    InsufficientStock { product_id: i32 },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<TransactionError<ServiceError>> for ServiceError {
    fn from(err: TransactionError<ServiceError>) -> Self {
        match err {
            TransactionError::Connection(e) => Self::Db(e),
            TransactionError::Transaction(e) => e,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

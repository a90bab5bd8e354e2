use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot finalize a bill with no line items")]
    EmptyBill,

    #[error("Cannot finalize a bill with no patient attached")]
    NoPatient,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type BillingResult<T> = Result<T, BillingError>;

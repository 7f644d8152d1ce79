use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Request input broke one or more rules; each entry names one.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// The caller is not allowed to perform the operation. No endpoint
    /// requires authentication yet, so nothing produces this.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The backing store could not be reached.
    #[error("store unavailable")]
    StoreUnavailable,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

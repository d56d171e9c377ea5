use validator::ValidationErrors;

/// Errors surfaced before a chain starts running.
///
/// Every failure is a parameter problem detected up front; nothing inside the
/// Monte Carlo loop is recoverable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<ValidationErrors> for SimError {
    fn from(e: ValidationErrors) -> Self {
        SimError::InvalidParameter(e.to_string())
    }
}

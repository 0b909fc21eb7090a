use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreditAnchorError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CreditAnchorError {
    /// Shorthand for the common `InvalidInput` case.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CreditAnchorError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CreditAnchorError {
    fn from(e: serde_json::Error) -> Self {
        CreditAnchorError::SerializationError(e.to_string())
    }
}

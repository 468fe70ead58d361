use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentalQuoteError {
    #[error("Invalid property type: '{0}' (expected apartment, house or studio)")]
    InvalidPropertyType(String),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Failed to write '{path}': {reason}")]
    FileWriteFailure { path: String, reason: String },

    #[error("Input closed before a valid answer was given")]
    InputClosed,

    #[error("Prompt failed: {0}")]
    PromptFailure(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RentalQuoteError {
    fn from(e: serde_json::Error) -> Self {
        RentalQuoteError::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for RentalQuoteError {
    fn from(e: csv::Error) -> Self {
        RentalQuoteError::SerializationError(e.to_string())
    }
}

use thiserror::Error;

/// Shown when the server gives no usable `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Translation failed. Please try again.";

/// Request-level failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// Transport failure or non-2xx status, already normalized.
    #[error("{message}")]
    Request { message: String },

    /// 2xx response without a usable `translations` field.
    #[error("Invalid response format")]
    InvalidResponseShape,
}

impl TranslationError {
    pub fn generic() -> Self {
        TranslationError::Request {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn from_detail(detail: Option<&str>) -> Self {
        match detail {
            Some(message) => TranslationError::Request {
                message: message.to_string(),
            },
            None => Self::generic(),
        }
    }
}

/// Input problem caught before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter text to translate")]
    EmptyText,

    #[error("Please enter at least one target language")]
    NoTargetLanguage,
}

use serde::{Deserialize, Serialize};

/// Structured error body returned by the store API.
///
/// The API is inconsistent about which field it fills, so both are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Primary error text, preferred when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Secondary message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Creates a body carrying only an `error` field.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: None,
        }
    }

    /// Creates a body carrying only a `message` field.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            error: None,
            message: Some(message.into()),
        }
    }

    /// Returns the text a user should see: `error`, then `message`.
    ///
    /// Blank strings count as absent.
    #[must_use]
    pub fn best_message(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.best_message() {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "unknown error"),
        }
    }
}

impl std::error::Error for ErrorBody {}

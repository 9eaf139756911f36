//! Error types for API calls, wizard operations and the draft cache.

use reqwest::StatusCode;
use shared::models::{ErrorBody, SnapshotError};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a remote call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The resource does not exist; for store status this means "no store yet".
    #[error("resource not found")]
    NotFound,
    /// Non-success status, with the structured body when the API sent one.
    #[error("request failed with status {status}")]
    Status {
        status: StatusCode,
        body: Option<ErrorBody>,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("inconsistent store snapshot: {0}")]
    Malformed(#[from] SnapshotError),
}

impl ApiError {
    /// Structured body sent by the API, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Picks the text a user should see for a failed call.
///
/// Order: the body's `error`, the body's `message`, the error's own text,
/// then `fallback`.
#[must_use]
pub fn extract_error_message(error: &ApiError, fallback: &str) -> String {
    if let Some(message) = error.body().and_then(ErrorBody::best_message) {
        return message.to_string();
    }
    // A bare status carries nothing a user can act on.
    if matches!(error, ApiError::Status { .. }) {
        return fallback.to_string();
    }
    let own = error.to_string();
    if own.trim().is_empty() {
        fallback.to_string()
    } else {
        own
    }
}

/// Failure of a wizard operation. The controller also records the message
/// as its step error.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Local check failed; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// The operation is not allowed from the current state.
    #[error("{0}")]
    InvalidTransition(String),
    /// The remote call failed.
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl WizardError {
    pub(crate) fn api(source: ApiError, fallback: &str) -> Self {
        Self::Api {
            message: extract_error_message(&source, fallback),
            source,
        }
    }
}

/// Failure of a draft cache backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_error_field_is_shown_verbatim() {
        let error = ApiError::Status {
            status: StatusCode::CONFLICT,
            body: Some(ErrorBody::new("Store name already exists")),
        };
        assert_eq!(
            extract_error_message(&error, "Failed to create store"),
            "Store name already exists"
        );
    }

    #[test]
    fn test_body_message_used_when_error_field_missing() {
        let error = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            body: Some(ErrorBody::with_message("c@ku.th is not registered")),
        };
        assert_eq!(
            extract_error_message(&error, "Failed to create store"),
            "c@ku.th is not registered"
        );
    }

    #[test]
    fn test_status_without_body_uses_fallback() {
        let error = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: None,
        };
        assert_eq!(
            extract_error_message(&error, "Failed to create store"),
            "Failed to create store"
        );
    }

    #[test]
    fn test_empty_body_uses_fallback() {
        let error = ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: Some(ErrorBody::default()),
        };
        assert_eq!(extract_error_message(&error, "fallback"), "fallback");
    }

    #[test]
    fn test_other_errors_use_their_own_text() {
        let decode = serde_json::from_str::<ErrorBody>("not json").unwrap_err();
        let error = ApiError::Decode(decode);
        let message = extract_error_message(&error, "fallback");
        assert!(message.starts_with("unexpected response body"));
    }

    #[test]
    fn test_wizard_error_carries_extracted_message() {
        let error = WizardError::api(
            ApiError::Status {
                status: StatusCode::FORBIDDEN,
                body: Some(ErrorBody::new("Not a store member")),
            },
            "Failed to leave store",
        );
        assert_eq!(error.to_string(), "Not a store member");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_not_found_is_distinguished() {
        assert!(ApiError::NotFound.is_not_found());
        assert!(ApiError::NotFound.body().is_none());
    }
}

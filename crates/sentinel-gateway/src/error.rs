//! Error types for inference gateway calls.

use thiserror::Error;

use crate::operation::Operation;

/// Errors that can occur while calling the inference service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// No API key was configured.
    #[error("no inference service credential configured")]
    MissingCredential,

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("inference service returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        message: String,
    },

    /// The service answered without any candidate text.
    #[error("{operation} response contained no text")]
    EmptyResponse {
        /// Operation that was called.
        operation: Operation,
    },

    /// The response did not match the declared schema.
    #[error("{operation} protocol violation: {reason}")]
    ProtocolViolation {
        /// Operation that was called.
        operation: Operation,
        /// What was wrong with the response.
        reason: String,
    },
}

impl GatewayError {
    /// Returns a short message suitable for inline display.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => {
                "The inference service is not configured. Set GEMINI_API_KEY and try again."
            }
            Self::Network(_) => {
                "Could not reach the inference service. Please check your connection."
            }
            Self::Status { .. } => "The inference service rejected the request.",
            Self::EmptyResponse { .. } | Self::ProtocolViolation { .. } => {
                "The inference service returned an unexpected response."
            }
        }
    }

    pub(crate) fn protocol(operation: Operation, reason: impl Into<String>) -> Self {
        Self::ProtocolViolation {
            operation,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_operation() {
        let err = GatewayError::protocol(Operation::PredictOne, "missing required field: reasoning");
        assert_eq!(
            err.to_string(),
            "predictOne protocol violation: missing required field: reasoning"
        );
    }

    #[test]
    fn test_user_messages() {
        let err = GatewayError::Network("connection refused".to_string());
        assert!(err.user_message().contains("connection"));

        let err = GatewayError::EmptyResponse {
            operation: Operation::AnalyzeSchema,
        };
        assert!(err.user_message().contains("unexpected response"));
    }
}

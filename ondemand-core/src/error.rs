//! Error types for OnDemand.
//!
//! A single error hierarchy using `thiserror`, shared by the REST client, the
//! browser cache, and the API layer.

use thiserror::Error;

/// Result type alias using `OnDemandError`.
pub type Result<T> = std::result::Result<T, OnDemandError>;

/// Main error type for all OnDemand operations.
#[derive(Debug, Error)]
pub enum OnDemandError {
    // ═══════════════════════════════════════════════════════════════════════════
    // REMOTE PLATFORM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The platforms endpoint answered with a non-success status.
    #[error("Sauce REST returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Connection timeout.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// The response body was not a platform list.
    #[error("Invalid platforms response: {0}")]
    InvalidResponse(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Category name did not match any automation tier.
    #[error("Unknown browser category: {0}")]
    UnknownCategory(String),

    /// No cached browser has the requested key.
    #[error("No {category} browser found for key '{key}'")]
    BrowserNotFound { category: String, key: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl OnDemandError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            OnDemandError::HttpError(_) | OnDemandError::ConnectionTimeout(_) => true,
            OnDemandError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error came from talking to the remote platform API.
    pub fn is_remote_error(&self) -> bool {
        matches!(
            self,
            OnDemandError::HttpError(_)
                | OnDemandError::HttpStatus { .. }
                | OnDemandError::ConnectionTimeout(_)
                | OnDemandError::InvalidResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OnDemandError::BrowserNotFound {
            category: "webdriver".into(),
            key: "chrome48".into(),
        };
        assert!(err.to_string().contains("webdriver"));
        assert!(err.to_string().contains("chrome48"));
    }

    #[test]
    fn test_error_classification() {
        assert!(OnDemandError::HttpError("reset".into()).is_recoverable());
        assert!(OnDemandError::ConnectionTimeout("30s".into()).is_recoverable());
        assert!(OnDemandError::HttpStatus { status: 503, body: String::new() }.is_recoverable());
        assert!(!OnDemandError::HttpStatus { status: 401, body: String::new() }.is_recoverable());
        assert!(!OnDemandError::UnknownCategory("rc".into()).is_recoverable());

        assert!(OnDemandError::InvalidResponse("bad".into()).is_remote_error());
        assert!(!OnDemandError::ConfigError("bad".into()).is_remote_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(OnDemandError::from);
        assert!(matches!(result, Err(OnDemandError::JsonError(_))));
    }
}

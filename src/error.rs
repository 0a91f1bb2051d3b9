//! Error types for the x402 Bazaar client

use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, X402Error>;

/// Errors produced by the marketplace client and command adapter
#[derive(Debug, Error)]
pub enum X402Error {
    /// Caller supplied an invalid method, parameter or command; no request was sent
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// Client configuration is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Request did not complete within the configured timeout
    #[error("Request timeout after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Connection refused, reset, DNS failure and similar transport problems
    #[error("Request error: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    /// Marketplace answered with a status other than 2xx or an accepted 402
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// A 2xx response whose body is not valid JSON
    #[error("Invalid JSON in HTTP {status} response: {source}")]
    InvalidJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A 402 response that lacks one or more of the required payment fields
    #[error("Malformed payment-required body, missing: {}", .missing.join(", "))]
    MalformedPayment { missing: Vec<&'static str> },

    /// A free endpoint unexpectedly demanded payment
    #[error("Endpoint {endpoint} returned 402 Payment Required but is advertised as free")]
    UnexpectedPayment { endpoint: String },

    /// JSON (de)serialization error outside of response classification
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl X402Error {
    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status code associated with this error, when one exists
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::InvalidJson { status, .. } => Some(*status),
            Self::MalformedPayment { .. } | Self::UnexpectedPayment { .. } => Some(402),
            Self::Network { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error was detected locally before any network call
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_extraction() {
        let err = X402Error::Status {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        assert_eq!(X402Error::Timeout { seconds: 5 }.status_code(), None);
        assert_eq!(
            X402Error::MalformedPayment {
                missing: vec!["address"]
            }
            .status_code(),
            Some(402)
        );
    }

    #[test]
    fn test_malformed_payment_message_lists_fields() {
        let err = X402Error::MalformedPayment {
            missing: vec!["chain", "token"],
        };
        assert!(err.to_string().contains("chain, token"));
    }

    #[test]
    fn test_timeout_message() {
        let err = X402Error::Timeout { seconds: 30 };
        assert_eq!(err.to_string(), "Request timeout after 30 seconds");
    }

    #[test]
    fn test_usage_helper() {
        let err = X402Error::usage("Unsupported HTTP method: PATCH");
        assert!(err.is_usage());
        assert!(err.to_string().contains("PATCH"));
    }
}

//! Error types for the Paxful API client.
//!
//! This module provides a single error type covering every failure mode of
//! the SDK, from configuration problems to token-endpoint rejections.

use thiserror::Error;

/// A specialized `Result` type for Paxful operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Paxful API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The SDK was configured in a way that makes the requested operation
    /// impossible (e.g. no redirect URI for the authorization flow, or no
    /// credential storage when one is required).
    #[error("Configuration error: {0}")]
    Config(String),

    /// An authorized request was dispatched but no credentials have ever
    /// been saved to storage. Seed storage with one of the grant
    /// operations first.
    #[error("Misconfiguration: no credentials provided")]
    MisconfiguredCredentials,

    /// The OAuth token endpoint returned a non-2xx status during token
    /// acquisition or refresh.
    #[error("Invalid response received (expected 200, received {status}) when trying to {operation}: {body}")]
    Http {
        /// HTTP status code returned by the token endpoint
        status: u16,
        /// The operation being performed (e.g. "exchange code")
        operation: String,
        /// Raw response body text for debugging
        body: String,
    },

    /// The token endpoint returned a 2xx response that is missing a
    /// non-empty `access_token` or an `expires_in` value.
    #[error("Invalid response received when trying to {operation} - server didn't return a properly formatted token")]
    MalformedToken {
        /// The operation being performed (e.g. "refresh token")
        operation: String,
    },

    /// The underlying HTTP transport failed (connection, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Reading a streamed payload body failed
    #[error("Payload I/O error: {0}")]
    PayloadIo(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this is an authentication/credential error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::MisconfiguredCredentials | Error::Http { .. } | Error::MalformedToken { .. }
        )
    }

    /// Returns `true` if this error indicates a caller-side setup issue
    /// rather than a remote failure.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_) | Error::MisconfiguredCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::MisconfiguredCredentials.is_auth_error());
        assert!(Error::MisconfiguredCredentials.is_config_error());
        assert!(Error::Config("missing redirect uri".into()).is_config_error());
        assert!(!Error::Config("missing redirect uri".into()).is_auth_error());
    }

    #[test]
    fn test_http_error_message_names_operation() {
        let err = Error::Http {
            status: 403,
            operation: "refresh token".into(),
            body: "forbidden".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("received 403"));
        assert!(msg.contains("refresh token"));
        assert!(msg.contains("forbidden"));
    }

    #[test]
    fn test_malformed_token_message() {
        let err = Error::MalformedToken {
            operation: "retrieve personal credentials".into(),
        };
        assert!(err
            .to_string()
            .contains("didn't return a properly formatted token"));
    }
}

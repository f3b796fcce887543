//! Credential value type and the token-endpoint wire shape.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An access/refresh token pair plus its absolute expiry.
///
/// Created by the grant operations on every successful acquisition or
/// refresh and replaced wholesale - never mutated in place. The SDK does
/// not proactively check `expires_at`; staleness is discovered reactively
/// when a request comes back 401.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// The bearer access token.
    pub access_token: String,
    /// The refresh token, when the grant issued one. Client-credentials
    /// grants typically do not.
    pub refresh_token: Option<String>,
    /// Absolute expiry, computed at acquisition time from the
    /// server-reported TTL.
    pub expires_at: DateTime<Utc>,
}

impl Credentials {
    /// The `Authorization` header value for this credential.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Raw payload of the OAuth token endpoint.
///
/// Fields are optional so an incomplete 2xx body surfaces as a
/// [`MalformedToken`](crate::Error::MalformedToken) error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountServiceTokenResponse {
    /// Access token issued by the server.
    pub access_token: Option<String>,
    /// Refresh token, when the grant issues one.
    pub refresh_token: Option<String>,
    /// Token TTL in seconds.
    pub expires_in: Option<i64>,
    /// Token type (always `bearer` in practice; unused by logic).
    #[serde(default)]
    pub token_type: Option<String>,
    /// JWT id (unused by logic).
    #[serde(default)]
    pub jti: Option<String>,
    /// Granted scope (unused by logic).
    #[serde(default)]
    pub scope: Option<String>,
}

impl AccountServiceTokenResponse {
    /// Validate the payload and map it into a [`Credentials`].
    ///
    /// `operation` names the grant being performed and is carried into the
    /// error when the server didn't return a properly formatted token.
    pub(crate) fn into_credentials(self, operation: &str) -> Result<Credentials> {
        let access_token = match self.access_token {
            Some(token) if !token.is_empty() => token,
            _ => {
                return Err(Error::MalformedToken {
                    operation: operation.to_string(),
                })
            }
        };
        let expires_in = self.expires_in.ok_or_else(|| Error::MalformedToken {
            operation: operation.to_string(),
        })?;

        Ok(Credentials {
            access_token,
            refresh_token: self.refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
        })
    }
}

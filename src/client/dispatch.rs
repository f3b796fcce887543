//! Authorized request dispatch with a single transparent refresh.

use crate::config::{ApiConfig, HostConfig};
use crate::oauth::{grants, CredentialStorage};
use crate::transport::{OutgoingRequest, Transport, TransportResponse};
use crate::{Error, Result};

/// Send an authorized request, repairing the first 401 with one token
/// refresh and one retry.
///
/// The stored credential's bearer token is attached and the request sent.
/// A non-401 response is returned unchanged. On 401, fresh credentials are
/// acquired - via the refresh-token grant when the stored credential
/// carries a refresh token, via the client-credentials grant otherwise -
/// persisted to storage, and the same request is re-sent exactly once. The
/// second response is returned verbatim whatever its status: a persistent
/// 401 is a terminal authentication failure requiring out-of-band
/// re-authorization.
///
/// The refresh decision looks only at the stored credential, never at the
/// 401 body, so an authorization failure unrelated to token expiry (e.g.
/// insufficient scope) still triggers one refresh-and-retry cycle. This
/// imprecision is intentional and kept for compatibility.
pub(crate) async fn send_with_refresh(
    transport: &dyn Transport,
    hosts: &HostConfig,
    config: &ApiConfig,
    storage: &dyn CredentialStorage,
    mut request: OutgoingRequest,
) -> Result<TransportResponse> {
    let credentials = storage
        .get_credentials()
        .await
        .ok_or(Error::MisconfiguredCredentials)?;

    request.set_header("Authorization", credentials.bearer());
    let response = transport.send(&request).await?;
    if response.status != 401 {
        return Ok(response);
    }

    tracing::debug!(url = %request.url, "request rejected with 401, refreshing credentials");
    let fresh = match credentials.refresh_token.as_deref() {
        Some(refresh_token) => grants::refresh(transport, hosts, config, refresh_token).await?,
        None => grants::client_credentials(transport, hosts, config).await?,
    };
    let fresh = storage.save_credentials(fresh).await;

    request.set_header("Authorization", fresh.bearer());
    transport.send(&request).await
}

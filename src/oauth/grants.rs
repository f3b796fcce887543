//! The three OAuth2 grant operations.
//!
//! Each operation POSTs a form-urlencoded body to the token endpoint,
//! validates the response and maps it into a [`Credentials`]. None of them
//! touch credential storage - persisting the result belongs to the caller.

use secrecy::ExposeSecret;

use crate::config::{ApiConfig, HostConfig};
use crate::transport::{OutgoingRequest, Transport, TransportResponse};
use crate::{Error, Result};

use super::credentials::{AccountServiceTokenResponse, Credentials};

/// Exchange an authorization code for credentials
/// (`grant_type=authorization_code`).
///
/// `code` is the value returned to the redirect URI after the user
/// authorizes the application.
pub async fn exchange_code(
    transport: &dyn Transport,
    hosts: &HostConfig,
    config: &ApiConfig,
    code: &str,
) -> Result<Credentials> {
    let form = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "authorization_code")
        .append_pair("code", code)
        .append_pair("redirect_uri", config.redirect_uri.as_deref().unwrap_or(""))
        .append_pair("client_id", &config.client_id)
        .append_pair("client_secret", config.client_secret.expose_secret())
        .finish();

    tracing::debug!("exchanging authorization code for credentials");
    request_token(transport, hosts, form, "retrieve impersonated credentials").await
}

/// Acquire credentials for the application's own account
/// (`grant_type=client_credentials`).
///
/// Also used by the dispatcher as the re-acquisition path when the stored
/// credential carries no refresh token.
pub async fn client_credentials(
    transport: &dyn Transport,
    hosts: &HostConfig,
    config: &ApiConfig,
) -> Result<Credentials> {
    let form = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "client_credentials")
        .append_pair("client_id", &config.client_id)
        .append_pair("client_secret", config.client_secret.expose_secret())
        .finish();

    tracing::debug!("retrieving personal credentials");
    request_token(transport, hosts, form, "retrieve personal credentials").await
}

/// Trade a refresh token for fresh credentials
/// (`grant_type=refresh_token`).
pub async fn refresh(
    transport: &dyn Transport,
    hosts: &HostConfig,
    config: &ApiConfig,
    refresh_token: &str,
) -> Result<Credentials> {
    let form = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "refresh_token")
        .append_pair("refresh_token", refresh_token)
        .append_pair("client_id", &config.client_id)
        .append_pair("client_secret", config.client_secret.expose_secret())
        .finish();

    tracing::debug!("refreshing access token");
    request_token(transport, hosts, form, "refresh token").await
}

async fn request_token(
    transport: &dyn Transport,
    hosts: &HostConfig,
    form: String,
    operation: &str,
) -> Result<Credentials> {
    let request = OutgoingRequest::post(hosts.token_url())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Accept", "application/json")
        .with_body(form.into_bytes());

    let response = transport.send(&request).await?;
    validate(response, operation)
}

fn validate(response: TransportResponse, operation: &str) -> Result<Credentials> {
    if !response.is_success() {
        return Err(Error::Http {
            status: response.status,
            operation: operation.to_string(),
            body: response.text(),
        });
    }
    let token: AccountServiceTokenResponse = response.json()?;
    token.into_credentials(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{header, RecordingTransport};

    fn config() -> ApiConfig {
        ApiConfig::new("my-client", "my-secret").with_redirect_uri("https://example.com/cb")
    }

    fn hosts() -> HostConfig {
        HostConfig::default()
    }

    fn token_body() -> serde_json::Value {
        serde_json::json!({
            "access_token": "new-access",
            "refresh_token": "new-refresh",
            "expires_in": 3600,
            "token_type": "bearer",
            "jti": "id",
            "scope": "profile email"
        })
    }

    #[tokio::test]
    async fn test_exchange_code_request_shape() {
        let transport = RecordingTransport::new();
        transport.push_response(200, token_body());

        let credentials = exchange_code(&transport, &hosts(), &config(), "xyz")
            .await
            .unwrap();
        assert_eq!(credentials.access_token, "new-access");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.url, "https://accounts.paxful.com/oauth2/token");
        assert_eq!(
            header(request, "content-type"),
            Some("application/x-www-form-urlencoded")
        );

        let body = String::from_utf8(request.body.clone().unwrap()).unwrap();
        assert!(body.contains("grant_type=authorization_code"));
        assert!(body.contains("code=xyz"));
        assert!(body.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcb"));
        assert!(body.contains("client_id=my-client"));
        assert!(body.contains("client_secret=my-secret"));
    }

    #[tokio::test]
    async fn test_client_credentials_request_shape() {
        let transport = RecordingTransport::new();
        transport.push_response(200, token_body());

        client_credentials(&transport, &hosts(), &config())
            .await
            .unwrap();

        let body = String::from_utf8(transport.requests()[0].body.clone().unwrap()).unwrap();
        assert!(body.contains("grant_type=client_credentials"));
        assert!(!body.contains("redirect_uri"));
        assert!(!body.contains("refresh_token"));
    }

    #[tokio::test]
    async fn test_refresh_request_shape() {
        let transport = RecordingTransport::new();
        transport.push_response(200, token_body());

        refresh(&transport, &hosts(), &config(), "old-refresh")
            .await
            .unwrap();

        let body = String::from_utf8(transport.requests()[0].body.clone().unwrap()).unwrap();
        assert!(body.contains("grant_type=refresh_token"));
        assert!(body.contains("refresh_token=old-refresh"));
    }

    #[tokio::test]
    async fn test_non_success_is_http_error() {
        let transport = RecordingTransport::new();
        transport.push_response(500, serde_json::json!({"error": "server_error"}));

        let result = refresh(&transport, &hosts(), &config(), "old-refresh").await;
        match result {
            Err(Error::Http {
                status,
                operation,
                body,
            }) => {
                assert_eq!(status, 500);
                assert_eq!(operation, "refresh token");
                assert!(body.contains("server_error"));
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_token_body() {
        let transport = RecordingTransport::new();
        transport.push_response(200, serde_json::json!({ "token_type": "bearer" }));

        let result = client_credentials(&transport, &hosts(), &config()).await;
        assert!(matches!(
            result,
            Err(Error::MalformedToken { operation }) if operation == "retrieve personal credentials"
        ));
    }
}

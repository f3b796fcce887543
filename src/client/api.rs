//! The `PaxfulApi` facade.

use std::sync::Arc;

use url::Url;

use crate::config::{ApiConfig, HostConfig};
use crate::oauth::{grants, CredentialStorage, Credentials, Profile};
use crate::transport::{HttpTransport, OutgoingRequest, Transport};
use crate::{Error, Result};

use super::dispatch;
use super::payload::Payload;

/// A redirect descriptor for the authorization flow: emit it as an HTTP
/// response to send the user to the OAuth authorization endpoint.
#[derive(Debug, Clone)]
pub struct AuthorizationRedirect {
    /// Redirect status code (301).
    pub status: u16,
    /// Value for the `Location` header.
    pub location: Url,
}

/// The client facade exposing the Paxful API integration.
///
/// Composes the configuration, host resolution, credential storage and the
/// authorized dispatcher into five operations: [`login`](Self::login),
/// [`exchange_code`](Self::exchange_code),
/// [`own_credentials`](Self::own_credentials),
/// [`profile`](Self::profile) and [`invoke`](Self::invoke).
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use paxful_rs::{ApiConfig, InMemoryCredentialStorage, PaxfulApi, Payload};
///
/// # async fn example() -> paxful_rs::Result<()> {
/// let api = PaxfulApi::with_storage(
///     ApiConfig::new("client-id", "client-secret"),
///     Arc::new(InMemoryCredentialStorage::new()),
/// )?;
///
/// // Seed storage with the application's own credentials, then call.
/// api.own_credentials().await?;
/// let offers = api.invoke("/paxful/v1/offer/all", Payload::empty()).await?;
/// println!("{offers}");
/// # Ok(())
/// # }
/// ```
pub struct PaxfulApi {
    config: ApiConfig,
    hosts: HostConfig,
    transport: Arc<dyn Transport>,
    storage: Option<Arc<dyn CredentialStorage>>,
}

impl PaxfulApi {
    /// Create a facade without credential storage.
    ///
    /// The grant operations still work and return credentials to the
    /// caller, but nothing is persisted, so [`profile`](Self::profile) and
    /// [`invoke`](Self::invoke) are unavailable.
    ///
    /// Hosts are resolved once, here, from `PAXFUL_OAUTH_HOST` /
    /// `PAXFUL_DATA_HOST`, defaulting to the production hosts. An empty or
    /// absent scope defaults to `["profile", "email"]`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = HttpTransport::with_proxy(config.proxy.clone())?;
        Ok(Self {
            config: config.normalize(),
            hosts: HostConfig::from_env(),
            transport: Arc::new(transport),
            storage: None,
        })
    }

    /// Create a facade with credential storage, enabling authorized
    /// dispatch.
    pub fn with_storage(config: ApiConfig, storage: Arc<dyn CredentialStorage>) -> Result<Self> {
        let mut api = Self::new(config)?;
        api.storage = Some(storage);
        Ok(api)
    }

    /// Override the resolved hosts (e.g. to point at a test server).
    pub fn with_hosts(mut self, hosts: HostConfig) -> Self {
        self.hosts = hosts;
        self
    }

    /// Replace the outbound transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// The effective configuration, after scope defaulting.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The hosts this facade resolved at construction.
    pub fn hosts(&self) -> &HostConfig {
        &self.hosts
    }

    /// Build the redirect that sends the user to authorize access.
    ///
    /// Fails with a configuration error when no redirect URI was
    /// configured - the authorization-code flow cannot proceed without it.
    /// No network call is made.
    pub fn login(&self) -> Result<AuthorizationRedirect> {
        let redirect_uri = self.config.redirect_uri.as_deref().ok_or_else(|| {
            Error::Config("redirect uri is needed for authorization flow".into())
        })?;

        let mut location = Url::parse(&self.hosts.authorize_url())?;
        location
            .query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", &self.config.scope.join(" "));

        Ok(AuthorizationRedirect {
            status: 301,
            location,
        })
    }

    /// Exchange the code produced by [`login`](Self::login) for
    /// credentials of the user who authorized the application.
    ///
    /// The credentials are persisted when storage is configured, and
    /// returned either way.
    pub async fn exchange_code(&self, code: &str) -> Result<Credentials> {
        let credentials =
            grants::exchange_code(self.transport.as_ref(), &self.hosts, &self.config, code)
                .await?;
        Ok(self.persist(credentials).await)
    }

    /// Retrieve credentials for the application's own account via the
    /// client-credentials grant.
    ///
    /// The credentials are persisted when storage is configured, and
    /// returned either way.
    pub async fn own_credentials(&self) -> Result<Credentials> {
        let credentials =
            grants::client_credentials(self.transport.as_ref(), &self.hosts, &self.config).await?;
        Ok(self.persist(credentials).await)
    }

    /// Get the profile of the currently authenticated user.
    ///
    /// Requires credential storage; fails with a configuration error
    /// otherwise.
    pub async fn profile(&self) -> Result<Profile> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| Error::Config("no credentials storage defined".into()))?;

        let request =
            OutgoingRequest::get(self.hosts.userinfo_url()).header("Accept", "application/json");
        let response = dispatch::send_with_refresh(
            self.transport.as_ref(),
            &self.hosts,
            &self.config,
            storage.as_ref(),
            request,
        )
        .await?;
        response.json()
    }

    /// Invoke an API operation on behalf of the currently authenticated
    /// user.
    ///
    /// `url` is the operation path on the data host (e.g.
    /// `/paxful/v1/offer/all`). The payload is encoded here at the
    /// boundary; dispatch goes through the refresh-on-401 path, and any
    /// non-401 error response is parsed and returned to the caller as-is.
    pub async fn invoke(&self, url: &str, payload: Payload) -> Result<serde_json::Value> {
        let storage = self
            .storage
            .as_ref()
            .ok_or(Error::MisconfiguredCredentials)?;

        let encoded = payload.encode().await?;
        let request = OutgoingRequest::post(self.hosts.data_url(url))
            .header("Accept", "application/json")
            .header("Content-Type", encoded.content_type)
            .with_body(encoded.body);

        let response = dispatch::send_with_refresh(
            self.transport.as_ref(),
            &self.hosts,
            &self.config,
            storage.as_ref(),
            request,
        )
        .await?;
        response.json()
    }

    async fn persist(&self, credentials: Credentials) -> Credentials {
        match &self.storage {
            Some(storage) => storage.save_credentials(credentials).await,
            None => credentials,
        }
    }
}

impl std::fmt::Debug for PaxfulApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaxfulApi")
            .field("config", &self.config)
            .field("hosts", &self.hosts)
            .field("storage", &self.storage.as_ref().map(|_| ".."))
            .finish()
    }
}

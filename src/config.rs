//! Client configuration: application credentials and host resolution.

use secrecy::SecretString;

/// Environment variable overriding the OAuth (accounts) host.
pub const OAUTH_HOST_ENV: &str = "PAXFUL_OAUTH_HOST";
/// Environment variable overriding the data (API) host.
pub const DATA_HOST_ENV: &str = "PAXFUL_DATA_HOST";

const DEFAULT_OAUTH_HOST: &str = "https://accounts.paxful.com";
const DEFAULT_DATA_HOST: &str = "https://api.paxful.com";

/// Scopes requested when the caller does not supply any.
pub const DEFAULT_SCOPE: [&str; 2] = ["profile", "email"];

/// Configuration needed to use the Paxful API.
///
/// `client_id` and `client_secret` are generated at the developers portal.
/// The redirect URI is only required for the authorization-code flow
/// ([`PaxfulApi::login`](crate::PaxfulApi::login)).
///
/// # Example
///
/// ```
/// use paxful_rs::ApiConfig;
///
/// let config = ApiConfig::new("client-id", "client-secret")
///     .with_redirect_uri("https://example.com/callback")
///     .with_scope(["profile", "email"]);
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Client ID generated at the developers portal.
    pub client_id: String,
    /// Client secret generated at the developers portal.
    pub client_secret: SecretString,
    /// Redirect URI registered at the developers portal. Required only
    /// for the authorization-code flow.
    pub redirect_uri: Option<String>,
    /// Scopes needed to interact with the API. Empty means "use the
    /// default scope" and is filled in at facade construction.
    pub scope: Vec<String>,
    /// Optional proxy for all outbound requests.
    pub proxy: Option<reqwest::Proxy>,
}

impl ApiConfig {
    /// Create a configuration from a client id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            redirect_uri: None,
            scope: Vec::new(),
            proxy: None,
        }
    }

    /// Set the redirect URI for the authorization-code flow.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set the requested scopes.
    pub fn with_scope<I, S>(mut self, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }

    /// Route all outbound requests through a proxy.
    pub fn with_proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Fill in the default scope if none was supplied. Idempotent; a
    /// non-empty scope is preserved unchanged.
    pub(crate) fn normalize(mut self) -> Self {
        if self.scope.is_empty() {
            self.scope = DEFAULT_SCOPE.iter().map(|s| s.to_string()).collect();
        }
        self
    }
}

/// The two process-wide host endpoints, resolved once per
/// [`PaxfulApi`](crate::PaxfulApi) construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Base URL of the OAuth (accounts) host.
    pub oauth_host: String,
    /// Base URL of the data (API) host.
    pub data_host: String,
}

impl HostConfig {
    /// Resolve hosts from the `PAXFUL_OAUTH_HOST` / `PAXFUL_DATA_HOST`
    /// environment variables, falling back to the production hosts when a
    /// variable is unset or empty.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var(OAUTH_HOST_ENV).ok(),
            std::env::var(DATA_HOST_ENV).ok(),
        )
    }

    /// Resolve hosts from explicit override values. `None` and `""` both
    /// select the production default.
    pub fn resolve(oauth_host: Option<String>, data_host: Option<String>) -> Self {
        Self {
            oauth_host: Self::or_default(oauth_host, DEFAULT_OAUTH_HOST),
            data_host: Self::or_default(data_host, DEFAULT_DATA_HOST),
        }
    }

    /// Use explicit hosts, bypassing environment resolution.
    pub fn new(oauth_host: impl Into<String>, data_host: impl Into<String>) -> Self {
        Self {
            oauth_host: oauth_host.into(),
            data_host: data_host.into(),
        }
    }

    fn or_default(value: Option<String>, default: &str) -> String {
        match value {
            Some(v) if !v.is_empty() => v,
            _ => default.to_string(),
        }
    }

    /// URL of the OAuth token endpoint.
    pub(crate) fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.oauth_host)
    }

    /// URL of the OAuth authorization endpoint.
    pub(crate) fn authorize_url(&self) -> String {
        format!("{}/oauth2/authorize", self.oauth_host)
    }

    /// URL of the OAuth userinfo endpoint.
    pub(crate) fn userinfo_url(&self) -> String {
        format!("{}/oauth2/userinfo", self.oauth_host)
    }

    /// URL of an operation on the data host.
    pub(crate) fn data_url(&self, path: &str) -> String {
        format!("{}{}", self.data_host, path)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

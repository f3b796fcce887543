//! # paxful-rs
//!
//! A Rust client SDK for the Paxful cryptocurrency trading API.
//!
//! This crate manages the OAuth2 credential lifecycle and dispatches
//! authenticated calls to API operations:
//!
//! - **Grant flows**: authorization-code exchange, client-credentials and
//!   refresh-token grants
//! - **Pluggable storage**: bring your own [`CredentialStorage`]
//!   (database, encrypted disk, ...) or use the in-memory default
//! - **Transparent refresh**: a 401 triggers one silent token refresh and
//!   one retry; everything else is passed through untouched
//! - **Async-first**: built on Tokio and reqwest
//!
//! ## Client-credentials flow
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use paxful_rs::{ApiConfig, InMemoryCredentialStorage, PaxfulApi, Payload};
//!
//! #[tokio::main]
//! async fn main() -> paxful_rs::Result<()> {
//!     let api = PaxfulApi::with_storage(
//!         ApiConfig::new("YOUR CLIENT ID", "YOUR CLIENT SECRET"),
//!         Arc::new(InMemoryCredentialStorage::new()),
//!     )?;
//!
//!     // Seed storage with the application's own credentials.
//!     api.own_credentials().await?;
//!
//!     // Invoke any API operation on behalf of the account.
//!     let offers = api
//!         .invoke("/paxful/v1/offer/all", Payload::form([("offer_type", "buy")]))
//!         .await?;
//!     println!("{offers}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Authorization flow
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use paxful_rs::{ApiConfig, InMemoryCredentialStorage, PaxfulApi};
//!
//! # async fn example() -> paxful_rs::Result<()> {
//! let api = PaxfulApi::with_storage(
//!     ApiConfig::new("YOUR CLIENT ID", "YOUR CLIENT SECRET")
//!         .with_redirect_uri("https://your.app/callback"),
//!     Arc::new(InMemoryCredentialStorage::new()),
//! )?;
//!
//! // Send the user to authorize access...
//! let redirect = api.login()?;
//! println!("redirect ({}) to {}", redirect.status, redirect.location);
//!
//! // ...then exchange the code your callback received.
//! let credentials = api.exchange_code("CODE FROM CALLBACK").await?;
//! let profile = api.profile().await?;
//! println!("hello, {}", profile.sub);
//! # Ok(())
//! # }
//! ```
//!
//! ## Hosts
//!
//! The OAuth and data hosts are resolved once when the facade is
//! constructed, from `PAXFUL_OAUTH_HOST` and `PAXFUL_DATA_HOST`, and
//! default to the production endpoints when unset or empty.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod oauth;
pub mod transport;

// Re-export primary types at crate root for convenience
pub use client::{AuthorizationRedirect, PaxfulApi, Payload};
pub use config::{ApiConfig, HostConfig};
pub use error::{Error, Result};
pub use oauth::{
    AccountServiceTokenResponse, CredentialStorage, Credentials, InMemoryCredentialStorage,
    Profile,
};
pub use transport::{HttpTransport, OutgoingRequest, Transport, TransportResponse};

/// Prelude module for convenient imports.
///
/// ```rust
/// use paxful_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{AuthorizationRedirect, PaxfulApi, Payload};
    pub use crate::config::{ApiConfig, HostConfig};
    pub use crate::error::{Error, Result};
    pub use crate::oauth::{
        CredentialStorage, Credentials, InMemoryCredentialStorage, Profile,
    };
    pub use crate::transport::{HttpTransport, Transport};
}

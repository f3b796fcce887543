//! OAuth2 credential lifecycle: credentials, storage and the grant flows.

mod credentials;
pub mod grants;
mod profile;
mod storage;

pub use credentials::{AccountServiceTokenResponse, Credentials};
pub use profile::Profile;
pub use storage::{CredentialStorage, InMemoryCredentialStorage};

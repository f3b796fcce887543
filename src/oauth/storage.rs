//! Pluggable credential storage.

use async_trait::async_trait;
use std::sync::Mutex;

use super::Credentials;

/// Capability for persisting the current [`Credentials`].
///
/// Implemented by the caller and injected into the facade; the SDK reads
/// the slot before every authorized dispatch and overwrites it after a
/// token refresh. Only last-write-wins semantics are required: there is no
/// atomic get-and-refresh primitive, so two concurrent 401s may each
/// trigger a refresh and race on the save. Callers wanting single-flight
/// refresh must add their own locking around storage access.
#[async_trait]
pub trait CredentialStorage: Send + Sync {
    /// The last-saved credentials, or `None` if none were ever saved.
    async fn get_credentials(&self) -> Option<Credentials>;

    /// Persist credentials for later retrieval, returning them unchanged.
    async fn save_credentials(&self, credentials: Credentials) -> Credentials;
}

/// Default single-slot storage, scoped to the owning facade instance.
///
/// Tokens are kept in process memory only and lost on restart - fine for
/// tests and short-lived tools, not for production services.
pub struct InMemoryCredentialStorage {
    credentials: Mutex<Option<Credentials>>,
}

impl InMemoryCredentialStorage {
    /// Create an empty storage slot.
    pub fn new() -> Self {
        tracing::warn!("please don't use InMemoryCredentialStorage in production");
        Self {
            credentials: Mutex::new(None),
        }
    }

    /// Create a storage slot pre-seeded with credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        let storage = Self::new();
        *storage.credentials.lock().unwrap() = Some(credentials);
        storage
    }
}

impl Default for InMemoryCredentialStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStorage for InMemoryCredentialStorage {
    async fn get_credentials(&self) -> Option<Credentials> {
        self.credentials.lock().unwrap().clone()
    }

    async fn save_credentials(&self, credentials: Credentials) -> Credentials {
        *self.credentials.lock().unwrap() = Some(credentials.clone());
        credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn credentials(access_token: &str) -> Credentials {
        Credentials {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_storage_returns_none() {
        let storage = InMemoryCredentialStorage::new();
        assert!(storage.get_credentials().await.is_none());
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let storage = InMemoryCredentialStorage::new();
        let saved = storage.save_credentials(credentials("abc")).await;
        assert_eq!(saved.access_token, "abc");

        let stored = storage.get_credentials().await.unwrap();
        assert_eq!(stored.access_token, "abc");
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let storage = InMemoryCredentialStorage::new();
        storage.save_credentials(credentials("first")).await;
        storage.save_credentials(credentials("second")).await;

        let stored = storage.get_credentials().await.unwrap();
        assert_eq!(stored.access_token, "second");
    }

    #[tokio::test]
    async fn test_pre_seeded_storage() {
        let storage = InMemoryCredentialStorage::with_credentials(credentials("seeded"));
        let stored = storage.get_credentials().await.unwrap();
        assert_eq!(stored.access_token, "seeded");
    }
}

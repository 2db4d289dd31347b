//! Admin session and key storage
//!
//! The API key that gates the admin endpoints lives behind an injected
//! [`KeyStore`] collaborator and is carried by an explicit [`AdminSession`]
//! value passed to admin calls, so nothing global is consulted and tests
//! can swap in an in-memory store.

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::ApiClient;

/// Persistent storage for the admin API key.
pub trait KeyStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// A verified-or-restored admin credential.
#[derive(Debug, Clone)]
pub struct AdminSession {
    api_key: String,
}

impl AdminSession {
    /// Wrap a key without verifying it. Prefer [`AdminSession::login`].
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Restore a previously saved session, if any.
    pub fn restore(store: &dyn KeyStore) -> Result<Option<Self>> {
        Ok(store.load()?.map(Self::new))
    }

    /// Verify `key` against the submissions endpoint and persist it only on
    /// success. A bad key surfaces as [`Error::Unauthorized`] and nothing is
    /// stored.
    pub async fn login(client: &ApiClient, store: &dyn KeyStore, key: &str) -> Result<Self> {
        let session = Self::new(key);
        client.submissions(&session).await?;
        store.save(key)?;
        tracing::info!("admin session established");
        Ok(session)
    }

    /// Drop the persisted key.
    pub fn logout(store: &dyn KeyStore) -> Result<()> {
        store.clear()
    }
}

/// In-memory [`KeyStore`], for tests and embedded use.
#[derive(Default)]
pub struct MemoryKeyStore {
    key: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Mutex::new(Some(key.into())),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.key.lock().clone())
    }

    fn save(&self, key: &str) -> Result<()> {
        *self.key.lock() = Some(key.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.key.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_returns_none_without_a_saved_key() {
        let store = MemoryKeyStore::new();
        assert!(AdminSession::restore(&store).unwrap().is_none());
    }

    #[test]
    fn logout_clears_the_store() {
        let store = MemoryKeyStore::with_key("fk_test");
        assert!(AdminSession::restore(&store).unwrap().is_some());
        AdminSession::logout(&store).unwrap();
        assert!(AdminSession::restore(&store).unwrap().is_none());
    }

    #[test]
    fn keystore_errors_map_to_the_sdk_error() {
        struct Broken;
        impl KeyStore for Broken {
            fn load(&self) -> Result<Option<String>> {
                Err(Error::KeyStore("disk on fire".into()))
            }
            fn save(&self, _key: &str) -> Result<()> {
                Err(Error::KeyStore("disk on fire".into()))
            }
            fn clear(&self) -> Result<()> {
                Err(Error::KeyStore("disk on fire".into()))
            }
        }
        assert!(matches!(
            AdminSession::restore(&Broken),
            Err(Error::KeyStore(_))
        ));
    }
}

//! `localStorage` backend for the token store

use vyshivka_http::{KeyValueStore, StorageError, TokenStore};
use web_sys::Storage;

/// Token persistence in `window.localStorage`
///
/// Holds no handle of its own; the storage object is looked up on every call,
/// so the type stays `Send + Sync` and always sees writes made by other tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// Token store over `localStorage` under the default key
    pub fn token_store() -> TokenStore {
        TokenStore::new(Self)
    }
}

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage()
            && storage.remove_item(key).is_err()
        {
            warn!(key, "failed to remove item from localStorage");
        }
    }
}

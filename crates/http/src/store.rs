//! Persisted token storage
//!
//! The token pair lives under a single key of a string key-value store
//! (`localStorage` in the browser). Every read goes back to the backend so a
//! pair written by another tab, or removed by a logout elsewhere, is seen by
//! the very next request.

use crate::token::decode_claims;
use crate::types::TokenPair;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Key under which the serialized pair is stored
pub const TOKEN_STORAGE_KEY: &str = "authTokens";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),

    #[error("Storage write failed: {0}")]
    Write(String),
}

/// Minimal string key-value backend
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// Process-local backend, used natively and in tests
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Durable home of the current [`TokenPair`]
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl TokenStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self::with_key(backend, TOKEN_STORAGE_KEY)
    }

    pub fn with_key(backend: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Arc::new(backend),
            key: key.into(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored pair
    ///
    /// Unparseable values and pairs whose access token cannot be decoded are
    /// removed and reported as absent.
    pub fn load(&self) -> Option<TokenPair> {
        let raw = self.backend.get(&self.key)?;

        let pair = match serde_json::from_str::<TokenPair>(&raw) {
            Ok(pair) => pair,
            Err(error) => {
                warn!(%error, key = %self.key, "discarding unparseable stored tokens");
                self.backend.remove(&self.key);
                return None;
            }
        };

        if let Err(error) = decode_claims(&pair.access) {
            warn!(%error, key = %self.key, "discarding stored tokens with undecodable access token");
            self.backend.remove(&self.key);
            return None;
        }

        Some(pair)
    }

    /// Replace the stored pair as a whole
    pub fn save(&self, pair: &TokenPair) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string(pair).map_err(|e| StorageError::Write(e.to_string()))?;
        self.backend.set(&self.key, &serialized)
    }

    pub fn clear(&self) {
        self.backend.remove(&self.key);
    }

    pub fn is_present(&self) -> bool {
        self.load().is_some()
    }
}

//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use cookies::JarOptions;
use keystore::KeyStore;

/// Application state shared across all request handlers.
///
/// `Arc`-wrapped so that Axum can clone the state for each request without
/// copying key material.
#[derive(Clone)]
pub struct AppState {
    /// Jar defaults, including the shared key store; cloned into every
    /// request's jar.
    pub jar_options: Arc<JarOptions>,
}

impl AppState {
    /// Create a new [`AppState`] from jar defaults.
    pub fn new(jar_options: JarOptions) -> Self {
        Self {
            jar_options: Arc::new(jar_options),
        }
    }

    /// Key rings for encryption and signing.
    pub fn key_store(&self) -> &KeyStore {
        &self.jar_options.key_store
    }
}

impl Default for AppState {
    /// A state without keys, suitable for tests.
    fn default() -> Self {
        Self::new(JarOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystore::{KeyStoreConfig, SigningConfig};

    #[test]
    fn key_store_is_the_jar_key_store() {
        let store = Arc::new(
            KeyStore::new(KeyStoreConfig {
                encryption: None,
                signing: Some(SigningConfig::new(["keyboard cat"])),
            })
            .unwrap(),
        );
        let state = AppState::new(JarOptions::new(Arc::clone(&store)));
        assert!(std::ptr::eq(state.key_store(), &*store));
        assert!(state.key_store().has_signing_keys());
        assert!(!AppState::default().key_store().has_signing_keys());
    }
}

//! `localStorage` backend for the funnel store.
use ventana_core::{FunnelStore, KeyValueStorage, StorageError};

use crate::dom::{js_error_message, local_storage};

/// Handle-less adapter: `localStorage` is looked up on every call so a
/// storage that becomes unavailable mid-session degrades per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

impl BrowserStorage {
    #[must_use]
    pub const fn store() -> FunnelStore<Self> {
        FunnelStore::new(Self)
    }
}

fn unavailable(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(js_error_message(err))
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = local_storage().map_err(|err| unavailable(&err))?;
        storage.get_item(key).map_err(|err| unavailable(&err))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().map_err(|err| unavailable(&err))?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: js_error_message(&err),
            })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let storage = local_storage().map_err(|err| unavailable(&err))?;
        storage.remove_item(key).map_err(|err| unavailable(&err))
    }
}

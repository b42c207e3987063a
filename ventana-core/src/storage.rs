//! Persistent key-value storage seam and the typed funnel store built on it.
//!
//! Every read and write goes through [`FunnelStore`], which absorbs storage
//! failures: a broken or unavailable backend is logged and treated as "no data
//! present" so it can never interrupt phase progression.
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::answers::QuizAnswers;
use crate::attribution::Attribution;
use crate::constants::{
    KEY_ATTRIBUTION, KEY_QUIZ_DATA, KEY_SPOTS_LEFT, KEY_TIMER_START, KEY_USER_COUNT,
};
use crate::time::EpochMillis;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected write to {key}: {reason}")]
    Write { key: String, reason: String },
}

/// String-valued persistent storage, e.g. the browser's `localStorage`.
/// Platform-specific implementations should provide this.
pub trait KeyValueStorage {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or refuses the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory storage. Clones share the same map, which is how a page reload
/// is simulated: a new session built from a clone sees everything the old
/// one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    unavailable: Rc<Cell<bool>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail, as a browser with storage disabled would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items.borrow().clone()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable.get() {
            Err(StorageError::Unavailable("memory storage disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Typed accessors over the funnel's persisted keys. Last write wins; no
/// cross-tab coordination.
#[derive(Debug, Clone)]
pub struct FunnelStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> FunnelStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("storage read of {key} failed: {err}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.set_item(key, value) {
            log::warn!("storage write of {key} failed: {err}");
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("ignoring malformed {key}: {err}");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write(key, &json),
            Err(err) => log::warn!("could not serialise {key}: {err}"),
        }
    }

    fn read_u32(&self, key: &str) -> Option<u32> {
        let raw = self.read(key)?;
        raw.trim()
            .parse()
            .map_err(|err| log::warn!("ignoring malformed {key} {raw:?}: {err}"))
            .ok()
    }

    /// Quiz answers; empty when none were stored or the payload is unreadable.
    #[must_use]
    pub fn quiz_answers(&self) -> QuizAnswers {
        self.read_json(KEY_QUIZ_DATA).unwrap_or_default()
    }

    pub fn save_quiz_answers(&self, answers: &QuizAnswers) {
        self.write_json(KEY_QUIZ_DATA, answers);
    }

    #[must_use]
    pub fn spots_left(&self) -> Option<u32> {
        self.read_u32(KEY_SPOTS_LEFT)
    }

    pub fn set_spots_left(&self, spots: u32) {
        self.write(KEY_SPOTS_LEFT, &spots.to_string());
    }

    #[must_use]
    pub fn session_clock_start(&self) -> Option<EpochMillis> {
        let raw = self.read(KEY_TIMER_START)?;
        let parsed = EpochMillis::parse(&raw);
        if parsed.is_none() {
            log::warn!("ignoring malformed {KEY_TIMER_START} {raw:?}");
        }
        parsed
    }

    pub fn set_session_clock_start(&self, started_at: EpochMillis) {
        self.write(KEY_TIMER_START, &started_at.to_string());
    }

    pub fn clear_session_clock_start(&self) {
        if let Err(err) = self.storage.remove_item(KEY_TIMER_START) {
            log::warn!("storage removal of {KEY_TIMER_START} failed: {err}");
        }
    }

    /// Captured campaign attribution; empty when none was captured.
    #[must_use]
    pub fn attribution(&self) -> Attribution {
        self.read_json(KEY_ATTRIBUTION).unwrap_or_default()
    }

    pub fn save_attribution(&self, attribution: &Attribution) {
        self.write_json(KEY_ATTRIBUTION, attribution);
    }

    #[must_use]
    pub fn user_count(&self) -> Option<u32> {
        self.read_u32(KEY_USER_COUNT)
    }

    pub fn set_user_count(&self, count: u32) {
        self.write(KEY_USER_COUNT, &count.to_string());
    }
}

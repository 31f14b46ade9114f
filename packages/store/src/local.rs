//! # Browser `localStorage` session storage
//!
//! [`LocalStorage`] is the [`SessionStorage`] used on the web platform. It is a
//! zero-size handle: the `web_sys::Storage` object is looked up on each call
//! because it is neither `Send` nor cheap to keep alive across hot reloads.
//!
//! Reads swallow errors (a blocked or missing `localStorage` reads as "no
//! session"); writes report them so login can tell the user.

use crate::error::StoreError;
use crate::session::SessionStorage;

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Storage(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Storage("localStorage disabled".to_string()))
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Storage(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Storage(format!("{e:?}")))
    }
}

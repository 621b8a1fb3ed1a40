//! Client-local Preferences
//!
//! Small key/value settings that survive restarts. The browser build keeps
//! them in `localStorage`.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{AppError, AppResult};

/// Key under which the last selected broker is stored
pub const LAST_USED_BROKER_KEY: &str = "lastUsedBroker";

pub trait Preferences {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> AppResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| AppError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| AppError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| AppError::Storage("localStorage unavailable".to_string()))
    }
}

impl Preferences for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }
}

/// Process-local preferences, lost on exit
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RefCell<HashMap<String, String>>,
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

//! Persisted session flag.
//!
//! Exactly one location (`sessionStorage`) and one writer: every read and
//! write of the signed-in flag goes through a [`SessionStore`].

use std::cell::RefCell;

use crate::constants::SESSION_FLAG_KEY;
use crate::error::AppError;

pub trait SessionStore {
    fn load(&self) -> bool;
    fn save(&self, signed_in: bool) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

/// `window.sessionStorage` backed store.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    fn storage() -> Result<web_sys::Storage, AppError> {
        web_sys::window()
            .ok_or_else(|| AppError::Dom("window".into()))?
            .session_storage()
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::Dom("sessionStorage".into()))
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> bool {
        match Self::storage() {
            Ok(storage) => matches!(
                storage.get_item(SESSION_FLAG_KEY),
                Ok(Some(ref v)) if v == "true"
            ),
            Err(e) => {
                log::warn!("session flag unavailable: {}", e);
                false
            }
        }
    }

    fn save(&self, signed_in: bool) -> Result<(), AppError> {
        let value = if signed_in { "true" } else { "false" };
        Self::storage()?
            .set_item(SESSION_FLAG_KEY, value)
            .map_err(AppError::from)
    }

    fn clear(&self) -> Result<(), AppError> {
        Self::storage()?
            .remove_item(SESSION_FLAG_KEY)
            .map_err(AppError::from)
    }
}

/// In-memory store used by tests and by pages without Web Storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    value: RefCell<Option<String>>,
}

impl MemorySessionStore {
    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> bool {
        self.value.borrow().as_deref() == Some("true")
    }

    fn save(&self, signed_in: bool) -> Result<(), AppError> {
        *self.value.borrow_mut() = Some(signed_in.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.value.borrow_mut() = None;
        Ok(())
    }
}

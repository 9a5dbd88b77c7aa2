use auspidiam_core::{Storage, StorageError};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// `window.localStorage`, or nothing when the browser denies access.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open(window: &Window) -> Self {
        LocalStorage {
            inner: window.local_storage().ok().flatten(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    fn backend(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.backend()?.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.backend()?.set_item(key, value).map_err(js_err)
    }
}

fn js_err(v: JsValue) -> StorageError {
    StorageError::Rejected(v.as_string().unwrap_or_else(|| format!("{v:?}")))
}

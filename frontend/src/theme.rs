use chat_widget::errors::ChatError;
use chat_widget::theme::{Theme, ThemeStore};

/// Theme preference kept in `window.localStorage`.
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl ThemeStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ChatError> {
        let storage = Self::storage().ok_or_else(|| ChatError::Storage {
            message: "localStorage unavailable".to_string(),
        })?;
        storage
            .set_item(key, value)
            .map_err(|e| ChatError::Storage { message: format!("{e:?}") })
    }
}

/// Sets `data-theme` on the document element.
pub fn apply(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    match root {
        Some(root) => {
            if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
                log::warn!("Failed to apply theme: {e:?}");
            }
        }
        None => log::warn!("No document element to apply theme to"),
    }
}

use std::str::FromStr;

use tracing::warn;

use crate::errors::ChatError;

/// Storage key the preference lives under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}

/// Durable key/value storage for the preference (`localStorage` in the browser).
pub trait ThemeStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<(), ChatError>;
}

/// The stored theme, or light when nothing valid is stored.
pub fn load_theme(store: &impl ThemeStore) -> Theme {
    store
        .load(THEME_KEY)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

/// Flips `current` and persists the result. A failed write is logged and the
/// new theme is still returned, so the page keeps working without storage.
pub fn toggle_theme(store: &impl ThemeStore, current: Theme) -> Theme {
    let next = current.toggled();
    if let Err(e) = store.save(THEME_KEY, next.as_str()) {
        warn!("Failed to persist theme preference: {e}");
    }
    next
}

//! User preferences persisted as a flat JSON key-value file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clipboard::DEFAULT_HISTORY_SIZE;
use crate::error::SettingsError;
use crate::repeat::BACKSPACE_REPEAT_INTERVAL;
use crate::shift::DOUBLE_TAP_WINDOW;

const KEYBOARD_KEY: &str = "keyboard";
const THEME_MODE_KEY: &str = "theme_mode";
const KEYBOARD_THEME_KEY: &str = "keyboard_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyboardTheme {
    #[default]
    Default,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub keyboard_theme: KeyboardTheme,
}

/// Behaviour knobs for the keyboard core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardSettings {
    pub double_tap_window_ms: u64,
    pub backspace_repeat_ms: u64,
    pub clipboard_history_size: usize,
    /// Where installed fonts live. Hosts usually point this into app storage.
    pub font_dir: Option<PathBuf>,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            double_tap_window_ms: DOUBLE_TAP_WINDOW.as_millis() as u64,
            backspace_repeat_ms: BACKSPACE_REPEAT_INTERVAL.as_millis() as u64,
            clipboard_history_size: DEFAULT_HISTORY_SIZE,
            font_dir: None,
        }
    }
}

impl KeyboardSettings {
    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_ms)
    }

    pub fn backspace_repeat(&self) -> Duration {
        Duration::from_millis(self.backspace_repeat_ms)
    }
}

/// A JSON object on disk, read once and written back on [`SettingsStore::save`].
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl SettingsStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Map::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(SettingsError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Typed value for `key`, `None` when absent or of the wrong shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Ignoring invalid setting `{}`: {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SettingsError> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json).map_err(io_err)?;
        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }

    pub fn keyboard_settings(&self) -> KeyboardSettings {
        self.get(KEYBOARD_KEY).unwrap_or_default()
    }

    pub fn set_keyboard_settings(
        &mut self,
        settings: &KeyboardSettings,
    ) -> Result<(), SettingsError> {
        self.set(KEYBOARD_KEY, settings)
    }

    pub fn theme(&self) -> ThemeState {
        ThemeState {
            mode: self.get(THEME_MODE_KEY).unwrap_or_default(),
            keyboard_theme: self.get(KEYBOARD_THEME_KEY).unwrap_or_default(),
        }
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) -> Result<(), SettingsError> {
        self.set(THEME_MODE_KEY, &mode)?;
        self.save()
    }

    pub fn set_keyboard_theme(&mut self, theme: KeyboardTheme) -> Result<(), SettingsError> {
        self.set(KEYBOARD_THEME_KEY, &theme)?;
        self.save()
    }
}

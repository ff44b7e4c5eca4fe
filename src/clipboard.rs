//! Bounded, deduplicated history of recent clipboard text.
//!
//! The history is fed from outside (a platform clipboard listener, or the
//! [`SystemClipboard`] watcher with the `clipboard` feature) and read by the
//! keyboard's clipboard overlay. Most recent entry first.

use std::sync::mpsc::Receiver;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

use crate::observable::Observable;
use crate::settings::KeyboardSettings;

/// Default number of entries kept.
pub const DEFAULT_HISTORY_SIZE: usize = 10;

/// Previews of single-line entries are cut after this many graphemes.
const PREVIEW_MAX_GRAPHEMES: usize = 100;
/// Previews of multi-line entries show this many lines.
const PREVIEW_MAX_LINES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardItem {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Shortened content for display.
    pub preview: String,
}

impl ClipboardItem {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            id: Uuid::new_v4().to_string(),
            preview: preview(&content),
            timestamp: Utc::now(),
            content,
        }
    }
}

/// First two lines for multi-line text, otherwise the first 100 graphemes.
/// An ellipsis marks anything cut off.
pub fn preview(content: &str) -> String {
    if content.contains('\n') {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut shown = lines[..PREVIEW_MAX_LINES.min(lines.len())].join("\n");
        if lines.len() > PREVIEW_MAX_LINES {
            shown.push_str("...");
        }
        return shown;
    }

    let mut graphemes = content.graphemes(true);
    let head: String = graphemes.by_ref().take(PREVIEW_MAX_GRAPHEMES).collect();
    if graphemes.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// The clipboard history store.
///
/// Shared between the platform listener and the dispatcher, so every
/// operation takes `&self`.
#[derive(Debug)]
pub struct ClipboardHistory {
    items: Observable<Vec<ClipboardItem>>,
    max_size: usize,
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl ClipboardHistory {
    pub fn new(max_size: usize) -> Self {
        Self {
            items: Observable::new(Vec::new()),
            max_size: max_size.max(1),
        }
    }

    /// History sized by `clipboard_history_size`.
    pub fn from_settings(settings: &KeyboardSettings) -> Self {
        Self::new(settings.clipboard_history_size)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Record new clipboard text at the front.
    ///
    /// Existing entries with the same content are dropped first, so copying
    /// the same text again moves it to the top instead of duplicating it.
    pub fn add(&self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        let max_size = self.max_size;
        self.items.update(|items| {
            let mut next = Vec::with_capacity(max_size);
            next.push(ClipboardItem::new(text.clone()));
            next.extend(
                items
                    .iter()
                    .filter(|item| item.content != text)
                    .take(max_size - 1)
                    .cloned(),
            );
            next
        });
        log::debug!("clipboard history: {} entries", self.len());
    }

    pub fn clear(&self) {
        self.items.set(Vec::new());
    }

    pub fn delete_by_content(&self, content: &str) {
        self.items.update(|items| {
            items
                .iter()
                .filter(|item| item.content != content)
                .cloned()
                .collect()
        });
    }

    pub fn items(&self) -> Vec<ClipboardItem> {
        self.items.get()
    }

    pub fn len(&self) -> usize {
        self.items.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive the full list after every change.
    pub fn subscribe(&self) -> Receiver<Vec<ClipboardItem>> {
        self.items.subscribe()
    }
}

#[cfg(feature = "clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "clipboard")]
mod system {
    use std::sync::Arc;

    use super::ClipboardHistory;

    /// Watches the OS clipboard through `arboard` and feeds the history.
    ///
    /// There is no portable change notification, so the host polls.
    pub struct SystemClipboard {
        clipboard: arboard::Clipboard,
        history: Arc<ClipboardHistory>,
        last_seen: Option<String>,
    }

    impl SystemClipboard {
        /// Open the system clipboard and seed the history with its current text.
        pub fn new(history: Arc<ClipboardHistory>) -> Result<Self, arboard::Error> {
            let mut watcher = Self {
                clipboard: arboard::Clipboard::new()?,
                history,
                last_seen: None,
            };
            watcher.poll();
            Ok(watcher)
        }

        /// Check for new clipboard text. Returns true when the history changed.
        pub fn poll(&mut self) -> bool {
            match self.clipboard.get_text() {
                Ok(text) if self.last_seen.as_deref() != Some(text.as_str()) => {
                    self.history.add(text.clone());
                    self.last_seen = Some(text);
                    true
                }
                Ok(_) => false,
                Err(arboard::Error::ContentNotAvailable) => false,
                Err(e) => {
                    log::error!("Failed to read system clipboard: {}", e);
                    false
                }
            }
        }

        /// Put text on the system clipboard. The history picks it up on the
        /// next poll like any other copy.
        pub fn copy(&mut self, text: &str) {
            if let Err(e) = self.clipboard.set_text(text.to_string()) {
                log::error!("Failed to write system clipboard: {}", e);
            }
        }
    }
}

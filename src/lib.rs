pub mod clipboard;
pub mod dispatcher;
pub mod error;
pub mod fonts;
pub mod key;
pub mod keymap;
pub mod layout;
pub mod observable;
pub mod repeat;
pub mod settings;
pub mod shift;
pub mod traits;
pub mod types;

pub use crate::clipboard::{ClipboardHistory, ClipboardItem};
pub use crate::dispatcher::{Dispatcher, DispatcherBuilder};
pub use crate::error::{FontError, SettingsError};
pub use crate::fonts::{FontCatalog, FontCatalogState, FontData, Typeface};
pub use crate::key::{KeyCode, KeyDirection, KeyEvent};
pub use crate::observable::Observable;
pub use crate::settings::{KeyboardSettings, KeyboardTheme, SettingsStore, ThemeMode, ThemeState};
pub use crate::traits::{CommitText, FontSpan, InputConnection};
pub use crate::types::{
    EditorInfo, FontStyle, InputClass, KeyboardAction, KeyboardLayout, KeyboardState, ShiftState,
};

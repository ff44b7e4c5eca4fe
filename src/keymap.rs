//! Key rows for each typing layout and what tapping a key means.

use crate::types::{KeyboardAction, KeyboardLayout};

pub const SHIFT: &str = "shift";
pub const BACKSPACE: &str = "⌫";
pub const TAB: &str = "tab";
pub const SPACE: &str = "space";
pub const ENTER: &str = "enter";
pub const TO_SYMBOLS: &str = "?123";
pub const TO_SYMBOLS2: &str = "=\\<";
pub const TO_ALPHABETIC: &str = "ABC";

const NUMBER_ROW: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];

const ALPHABETIC: &[&[&str]] = &[
    NUMBER_ROW,
    &["q", "w", "e", "r", "t", "y", "u", "i", "o", "p"],
    &["a", "s", "d", "f", "g", "h", "j", "k", "l"],
    &[SHIFT, "z", "x", "c", "v", "b", "n", "m", BACKSPACE],
    &[TAB, TO_SYMBOLS, SPACE, ",", ".", ENTER],
];

const SYMBOL_1: &[&[&str]] = &[
    NUMBER_ROW,
    &["@", "#", "$", "_", "&", "-", "+", "(", ")", "/"],
    &["*", "\"", "'", ":", ";", "!", "?", BACKSPACE],
    &[TO_ALPHABETIC, TO_SYMBOLS2, SPACE, ",", ".", ENTER],
];

const SYMBOL_2: &[&[&str]] = &[
    &["~", "`", "|", "•", "√", "π", "÷", "×", "§", "∆"],
    &["£", "€", "¥", "^", "°", "=", "{", "}", "\\"],
    &["%", "©", "®", "™", "✓", "[", "]", BACKSPACE],
    &[TO_ALPHABETIC, TO_SYMBOLS, SPACE, "<", ">", ENTER],
];

/// What a key tap produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// Text to commit, subject to shift.
    Text(String),
    Action(KeyboardAction),
}

/// Rows of key labels for `layout`, top to bottom. Overlays have no keys.
pub fn rows(layout: KeyboardLayout) -> &'static [&'static [&'static str]] {
    match layout {
        KeyboardLayout::Alphabetic => ALPHABETIC,
        KeyboardLayout::Symbol1 => SYMBOL_1,
        KeyboardLayout::Symbol2 => SYMBOL_2,
        KeyboardLayout::Clipboard | KeyboardLayout::FontSelector => &[],
    }
}

/// Map a key label to its input.
pub fn resolve(label: &str) -> KeyInput {
    let action = match label {
        SHIFT => KeyboardAction::Shift,
        BACKSPACE => KeyboardAction::Backspace,
        TAB => KeyboardAction::Tab,
        SPACE => KeyboardAction::Space,
        ENTER => KeyboardAction::Enter,
        TO_SYMBOLS => KeyboardAction::SwitchToSymbols,
        TO_SYMBOLS2 => KeyboardAction::SwitchToSymbols2,
        TO_ALPHABETIC => KeyboardAction::SwitchToAlphabetic,
        text => return KeyInput::Text(text.to_string()),
    };
    KeyInput::Action(action)
}

/// Whether `label` appears on `layout`.
pub fn has_key(layout: KeyboardLayout, label: &str) -> bool {
    rows(layout).iter().any(|row| row.contains(&label))
}

use std::time::Instant;

/// State of the shift key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftState {
    /// Normal lowercase input.
    #[default]
    Off,
    /// The next committed text is uppercased, then shift turns off.
    Shifted,
    /// Everything is uppercased until shift is pressed again.
    CapsLock,
}

impl ShiftState {
    /// Whether committed text should be uppercased.
    pub fn is_active(self) -> bool {
        self != ShiftState::Off
    }
}

/// The keyboard view currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardLayout {
    /// Main QWERTY keyboard.
    #[default]
    Alphabetic,
    /// First symbol page (`@#$` and friends).
    Symbol1,
    /// Second symbol page (math and currency).
    Symbol2,
    /// Clipboard history overlay.
    Clipboard,
    /// Font picker overlay.
    FontSelector,
}

impl KeyboardLayout {
    /// Overlays temporarily replace the typing surface and remember
    /// the layout to restore.
    pub fn is_overlay(self) -> bool {
        matches!(self, KeyboardLayout::Clipboard | KeyboardLayout::FontSelector)
    }
}

/// Per-session keyboard state.
///
/// Transitions never mutate in place; every method in the `shift` and
/// `layout` modules returns a new record so the owner can swap it atomically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyboardState {
    /// The visible layout.
    pub current_layout: KeyboardLayout,
    /// Layout restored when an overlay is hidden. Single slot, not a stack.
    pub previous_layout: KeyboardLayout,
    /// Shift key state.
    pub shift_state: ShiftState,
    /// Time of the last shift press, `None` until the first press.
    pub last_shift_press: Option<Instant>,
    /// Selected custom font, `None` means the host's default font.
    pub selected_font_id: Option<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Discrete actions emitted by the keyboard UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardAction {
    Shift,
    Backspace,
    /// Long-press on backspace started.
    StartBackspace,
    /// Long-press on backspace released.
    StopBackspace,
    Tab,
    Space,
    Enter,

    SwitchToAlphabetic,
    SwitchToSymbols,
    SwitchToSymbols2,

    ShowClipboard,
    HideClipboard,
    ClearClipboard,
    PasteFromClipboard(String),
    DeleteFromClipboard(String),

    ShowFontSelector,
    HideFontSelector,
    /// Select a font by id. An empty id restores the default font.
    SelectFont(String),
}

bitflags::bitflags! {
    /// Typeface style bits, as understood by the host's text renderer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FontStyle: u8 {
        const BOLD   = 0b01;
        const ITALIC = 0b10;
    }
}

/// Broad class of the field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputClass {
    #[default]
    Text,
    Number,
    Phone,
    Datetime,
}

/// What the host tells us about the field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorInfo {
    pub class: InputClass,
    /// Style already applied to the field's text.
    pub base_style: FontStyle,
}

impl EditorInfo {
    /// Plain text fields accept styled spans; numeric, phone and date
    /// fields do not.
    pub fn supports_rich_text(&self) -> bool {
        self.class == InputClass::Text
    }
}

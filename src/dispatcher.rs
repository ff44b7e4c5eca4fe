use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::clipboard::ClipboardHistory;
use crate::fonts::FontCatalog;
use crate::key::{KeyCode, KeyEvent};
use crate::keymap::{self, KeyInput};
use crate::observable::Observable;
use crate::repeat::{BACKSPACE_REPEAT_INTERVAL, RepeatTimer};
use crate::settings::KeyboardSettings;
use crate::shift::DOUBLE_TAP_WINDOW;
use crate::traits::{CommitText, FontSpan, InputConnection};
use crate::types::{EditorInfo, FontStyle, KeyboardAction, KeyboardLayout, KeyboardState};

/// Skew applied to emulate italics on an upright typeface.
pub const FAKE_ITALIC_SKEW: f32 = -0.25;

#[derive(Debug)]
struct Session<C> {
    connection: C,
    editor: EditorInfo,
}

/// Routes keyboard actions to state transitions, the host connection, or
/// the clipboard and font collaborators.
///
/// The dispatcher is the single writer of [`KeyboardState`]. Actions are
/// handled one at a time through `&mut self`; hosts that dispatch from
/// several threads wrap the dispatcher in one mutex.
#[derive(Debug)]
pub struct Dispatcher<C: InputConnection> {
    state: Observable<KeyboardState>,
    clipboard: Arc<ClipboardHistory>,
    fonts: Arc<FontCatalog>,
    session: Option<Session<C>>,
    backspace: RepeatTimer,
    double_tap: Duration,
}

pub struct DispatcherBuilder {
    clipboard: Arc<ClipboardHistory>,
    fonts: Arc<FontCatalog>,
    double_tap: Duration,
    backspace_repeat: Duration,
}

impl DispatcherBuilder {
    pub fn new(clipboard: Arc<ClipboardHistory>, fonts: Arc<FontCatalog>) -> Self {
        Self {
            clipboard,
            fonts,
            double_tap: DOUBLE_TAP_WINDOW,
            backspace_repeat: BACKSPACE_REPEAT_INTERVAL,
        }
    }

    /// Builder whose collaborators and timings all come from `settings`.
    /// Fonts live in `fallback_font_dir` unless the settings name a directory.
    pub fn from_settings(
        settings: &KeyboardSettings,
        fallback_font_dir: impl Into<PathBuf>,
    ) -> Self {
        let clipboard = Arc::new(ClipboardHistory::from_settings(settings));
        let fonts = Arc::new(FontCatalog::from_settings(settings, fallback_font_dir));
        Self::new(clipboard, fonts).settings(settings)
    }

    pub fn double_tap_window(mut self, window: Duration) -> Self {
        self.double_tap = window;
        self
    }

    pub fn backspace_repeat(mut self, interval: Duration) -> Self {
        self.backspace_repeat = interval;
        self
    }

    /// Apply the timing settings. The collaborators passed to
    /// [`DispatcherBuilder::new`] keep their own size and directory.
    pub fn settings(self, settings: &KeyboardSettings) -> Self {
        self.double_tap_window(settings.double_tap_window())
            .backspace_repeat(settings.backspace_repeat())
    }

    pub fn build<C: InputConnection>(self) -> Dispatcher<C> {
        Dispatcher {
            state: Observable::new(KeyboardState::new()),
            clipboard: self.clipboard,
            fonts: self.fonts,
            session: None,
            backspace: RepeatTimer::new(self.backspace_repeat),
            double_tap: self.double_tap,
        }
    }
}

impl<C: InputConnection> Dispatcher<C> {
    pub fn new(clipboard: Arc<ClipboardHistory>, fonts: Arc<FontCatalog>) -> Self {
        DispatcherBuilder::new(clipboard, fonts).build()
    }

    /// Snapshot of the keyboard state.
    pub fn state(&self) -> KeyboardState {
        self.state.get()
    }

    /// Receive every new keyboard state, starting with the current one.
    pub fn subscribe(&self) -> Receiver<KeyboardState> {
        self.state.subscribe()
    }

    pub fn clipboard(&self) -> &Arc<ClipboardHistory> {
        &self.clipboard
    }

    pub fn fonts(&self) -> &Arc<FontCatalog> {
        &self.fonts
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn connection(&self) -> Option<&C> {
        self.session.as_ref().map(|s| &s.connection)
    }

    pub fn connection_mut(&mut self) -> Option<&mut C> {
        self.session.as_mut().map(|s| &mut s.connection)
    }

    pub fn editor_info(&self) -> Option<EditorInfo> {
        self.session.as_ref().map(|s| s.editor)
    }

    pub fn is_backspace_repeating(&self) -> bool {
        self.backspace.is_running()
    }

    /// Begin an input session: fresh state, no repeat, rescanned fonts.
    ///
    /// A font refresh failure is left in the catalog's error field; typing
    /// still works with whatever fonts were known before.
    pub fn start_input(&mut self, connection: C, editor: EditorInfo) {
        self.backspace.stop();
        self.state.set(KeyboardState::new());
        self.session = Some(Session { connection, editor });
        if let Err(e) = self.fonts.refresh() {
            log::warn!("Font refresh failed at session start: {}", e);
        }
        log::debug!("input session started: {:?}", editor);
    }

    /// End the session and hand the connection back to the host.
    pub fn finish_input(&mut self) -> Option<C> {
        self.backspace.stop();
        self.state.set(KeyboardState::new());
        self.session.take().map(|s| s.connection)
    }

    pub fn handle_action(&mut self, action: KeyboardAction) {
        self.handle_action_at(action, Instant::now());
    }

    /// Handle `action` as if it happened at `now`.
    pub fn handle_action_at(&mut self, action: KeyboardAction, now: Instant) {
        log::trace!("action {:?}", action);
        match action {
            KeyboardAction::Backspace => self.delete_backward(),
            KeyboardAction::StartBackspace => self.backspace.start(now),
            KeyboardAction::StopBackspace => self.backspace.stop(),
            KeyboardAction::Space => self.commit(CommitText::plain(" ")),
            KeyboardAction::Enter => self.send_key(KeyCode::Enter),
            KeyboardAction::Tab => self.send_key(KeyCode::Tab),

            KeyboardAction::Shift => {
                let window = self.double_tap;
                self.transition(|s| s.press_shift(now, window));
            }

            KeyboardAction::SwitchToAlphabetic => {
                self.transition(|s| s.switch_layout(KeyboardLayout::Alphabetic))
            }
            KeyboardAction::SwitchToSymbols => {
                self.transition(|s| s.switch_layout(KeyboardLayout::Symbol1))
            }
            KeyboardAction::SwitchToSymbols2 => {
                self.transition(|s| s.switch_layout(KeyboardLayout::Symbol2))
            }

            KeyboardAction::ShowClipboard => {
                self.transition(|s| s.show_overlay(KeyboardLayout::Clipboard))
            }
            KeyboardAction::ShowFontSelector => {
                self.transition(|s| s.show_overlay(KeyboardLayout::FontSelector))
            }
            KeyboardAction::HideClipboard | KeyboardAction::HideFontSelector => {
                self.transition(KeyboardState::hide_overlay)
            }

            KeyboardAction::ClearClipboard => self.clipboard.clear(),
            KeyboardAction::DeleteFromClipboard(content) => {
                self.clipboard.delete_by_content(&content)
            }
            KeyboardAction::PasteFromClipboard(text) => {
                self.commit(CommitText::plain(text));
                self.transition(KeyboardState::hide_overlay);
            }

            KeyboardAction::SelectFont(font_id) => {
                self.transition(|s| s.select_font(&font_id))
            }
        }
    }

    /// Commit text from a character key.
    ///
    /// Uppercased while shift is on, styled with the selected font when the
    /// field accepts rich text, and a one-shot shift is consumed afterwards.
    pub fn commit_key(&mut self, text: &str) {
        let state = self.state.get();
        let text = if state.shift_state.is_active() {
            text.to_uppercase()
        } else {
            text.to_string()
        };
        let commit = self.styled(text, state.selected_font_id.as_deref());
        self.commit(commit);
        self.transition(KeyboardState::consume_shift);
    }

    /// Handle a tap on the key labelled `label` in the current layout.
    pub fn press_key(&mut self, label: &str) {
        self.press_key_at(label, Instant::now());
    }

    pub fn press_key_at(&mut self, label: &str, now: Instant) {
        match keymap::resolve(label) {
            KeyInput::Text(text) => self.commit_key(&text),
            KeyInput::Action(action) => self.handle_action_at(action, now),
        }
    }

    /// Drive the backspace repeat from the host loop. Returns the number of
    /// deletes performed.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let due = self.backspace.due(now);
        for _ in 0..due {
            self.delete_backward();
        }
        due
    }

    fn transition(&self, f: impl FnOnce(&KeyboardState) -> KeyboardState) {
        let next = self.state.update(f);
        log::debug!(
            "layout={:?} shift={:?} font={:?}",
            next.current_layout,
            next.shift_state,
            next.selected_font_id
        );
    }

    fn styled(&self, text: String, font_id: Option<&str>) -> CommitText {
        let Some(font_id) = font_id.filter(|id| !id.is_empty()) else {
            return CommitText::plain(text);
        };
        let Some(editor) = self.editor_info() else {
            return CommitText::plain(text);
        };
        if !editor.supports_rich_text() {
            log::debug!("{:?} field has no rich text, committing plain", editor.class);
            return CommitText::plain(text);
        }

        match self.fonts.load_font(font_id) {
            Ok(typeface) => {
                let missing = editor.base_style & !typeface.style;
                let span = FontSpan {
                    fake_bold: missing.contains(FontStyle::BOLD),
                    text_skew_x: if missing.contains(FontStyle::ITALIC) {
                        FAKE_ITALIC_SKEW
                    } else {
                        0.0
                    },
                    start: 0,
                    end: text.chars().count(),
                    typeface,
                };
                CommitText {
                    text,
                    span: Some(span),
                }
            }
            Err(e) if e.is_missing_resource() => {
                log::warn!("{}; committing plain text", e);
                CommitText::plain(text)
            }
            Err(e) => {
                log::error!("Failed to load font {}: {}; committing plain text", font_id, e);
                CommitText::plain(text)
            }
        }
    }

    fn with_connection(&mut self, op: &str, f: impl FnOnce(&mut C)) {
        match self.session.as_mut() {
            Some(session) => f(&mut session.connection),
            None => log::trace!("no input session, dropping {}", op),
        }
    }

    fn commit(&mut self, text: CommitText) {
        self.with_connection("commit", |c| c.commit_text(text, 1));
    }

    fn send_key(&mut self, code: KeyCode) {
        self.with_connection("key event", |c| {
            for event in KeyEvent::tap(code) {
                c.send_key_event(event);
            }
        });
    }

    /// Clear the selection if there is one, otherwise delete the char
    /// before the cursor.
    fn delete_backward(&mut self) {
        self.with_connection("backspace", |c| match c.selected_text() {
            Some(selected) if !selected.is_empty() => c.commit_text(CommitText::plain(""), 1),
            _ => c.delete_surrounding_text(1, 0),
        });
    }
}

use crate::fonts::Typeface;
use crate::key::KeyEvent;

/// A styled span covering committed text, rendered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpan {
    /// Typeface to substitute.
    pub typeface: Typeface,
    /// Embolden glyphs when the field is bold but the typeface is not.
    pub fake_bold: bool,
    /// Horizontal skew for italic emulation, 0.0 when not needed.
    pub text_skew_x: f32,
    /// Start of the span in chars (inclusive).
    pub start: usize,
    /// End of the span in chars (exclusive).
    pub end: usize,
}

/// Text handed to [`InputConnection::commit_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct CommitText {
    pub text: String,
    /// Font styling, present only for rich-text fields with a custom font.
    pub span: Option<FontSpan>,
}

impl CommitText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: None,
        }
    }

    pub fn is_styled(&self) -> bool {
        self.span.is_some()
    }
}

/// The platform's text-editing target for the current input session.
///
/// Implementations are expected to be synchronous.
pub trait InputConnection {
    /// Replace the current selection (or insert at the cursor) with `text`.
    /// `cursor` follows the platform convention: 1 places the cursor after
    /// the inserted text.
    fn commit_text(&mut self, text: CommitText, cursor: i32);

    /// Delete `before` chars before and `after` chars after the cursor.
    fn delete_surrounding_text(&mut self, before: u32, after: u32);

    /// Currently selected text, if any.
    fn selected_text(&self) -> Option<String>;

    fn send_key_event(&mut self, event: KeyEvent);
}

/// Key codes the keyboard sends to the host as raw key events.
///
/// Only keys that have no text representation go through key events;
/// everything else is committed as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// The Enter/Return key. Lets the host decide between newline and submit.
    Enter,
    /// The Tab key, typically used by the host to move focus.
    Tab,
}

/// Whether a key event is the press or the release half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Down,
    Up,
}

/// A single key event delivered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed or released.
    pub code: KeyCode,
    pub direction: KeyDirection,
}

impl KeyEvent {
    pub fn down(code: KeyCode) -> Self {
        Self {
            code,
            direction: KeyDirection::Down,
        }
    }

    pub fn up(code: KeyCode) -> Self {
        Self {
            code,
            direction: KeyDirection::Up,
        }
    }

    /// Press followed by release, in that order.
    pub fn tap(code: KeyCode) -> [KeyEvent; 2] {
        [Self::down(code), Self::up(code)]
    }
}

use std::time::{Duration, Instant};

use crate::types::{KeyboardState, ShiftState};

/// Two shift presses closer together than this lock caps.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

impl KeyboardState {
    /// Apply a shift press at `now`.
    ///
    /// Rules, first match wins:
    /// 1. caps lock turns off,
    /// 2. shifted turns off once the double-tap window has passed,
    /// 3. shifted inside the window locks caps,
    /// 4. anything else becomes shifted.
    ///
    /// The press time is always recorded.
    pub fn press_shift(&self, now: Instant, double_tap: Duration) -> Self {
        let elapsed = match self.last_shift_press {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::MAX,
        };

        let shift_state = match self.shift_state {
            ShiftState::CapsLock => ShiftState::Off,
            ShiftState::Shifted if elapsed >= double_tap => ShiftState::Off,
            ShiftState::Shifted if elapsed < double_tap => ShiftState::CapsLock,
            _ => ShiftState::Shifted,
        };

        Self {
            shift_state,
            last_shift_press: Some(now),
            ..self.clone()
        }
    }

    /// Drop a one-shot shift after text was committed. Caps lock stays.
    pub fn consume_shift(&self) -> Self {
        match self.shift_state {
            ShiftState::Shifted => Self {
                shift_state: ShiftState::Off,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }
}

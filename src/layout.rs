use crate::types::{KeyboardLayout, KeyboardState};

impl KeyboardState {
    /// Switch between typing layouts. `previous_layout` is untouched.
    ///
    /// Overlays are routed through [`KeyboardState::show_overlay`] so they
    /// always remember where to return to.
    pub fn switch_layout(&self, layout: KeyboardLayout) -> Self {
        if layout.is_overlay() {
            return self.show_overlay(layout);
        }
        Self {
            current_layout: layout,
            ..self.clone()
        }
    }

    /// Show the clipboard or font selector on top of the current layout.
    ///
    /// Showing a second overlay without hiding the first overwrites the
    /// return slot with the first overlay: back-navigation is one level deep.
    pub fn show_overlay(&self, overlay: KeyboardLayout) -> Self {
        if !overlay.is_overlay() {
            return self.switch_layout(overlay);
        }
        Self {
            previous_layout: self.current_layout,
            current_layout: overlay,
            ..self.clone()
        }
    }

    /// Return to the layout recorded by the last `show_overlay`.
    pub fn hide_overlay(&self) -> Self {
        Self {
            current_layout: self.previous_layout,
            ..self.clone()
        }
    }

    /// Pick a font and close the selector. An empty id clears the selection.
    pub fn select_font(&self, font_id: &str) -> Self {
        let selected_font_id = (!font_id.is_empty()).then(|| font_id.to_string());
        Self {
            selected_font_id,
            ..self.hide_overlay()
        }
    }
}

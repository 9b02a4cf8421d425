//! Timed caption overlay
//!
//! Visibility is derived from the time the caption was last shown; nothing
//! flips a flag when it expires.

use crate::render::{Surface, TextStyle};

/// The single caption slot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Caption {
    /// Empty means no caption
    text: String,
    /// Timestamp of the last `show`, in milliseconds
    shown_at_ms: u64,
}

impl Caption {
    /// Replace the text and restart the timer
    pub fn show(&mut self, text: &str, now_ms: u64) {
        self.text.clear();
        self.text.push_str(text);
        self.shown_at_ms = now_ms;
    }

    /// Drop the text immediately, leaving the timestamp alone
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shown_at_ms(&self) -> u64 {
        self.shown_at_ms
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Visible while text is set and less than `duration_ms` has elapsed
    pub fn is_visible(&self, now_ms: u64, duration_ms: u64) -> bool {
        !self.text.is_empty() && now_ms.saturating_sub(self.shown_at_ms) < duration_ms
    }

    /// Draw centered on the surface if visible. Returns whether it was drawn.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        style: &TextStyle,
        now_ms: u64,
        duration_ms: u64,
    ) -> bool {
        if !self.is_visible(now_ms, duration_ms) {
            return false;
        }
        let center = surface.center();
        surface.draw_text(&self.text, center, style);
        true
    }
}

//! Display and notification collaborators the countdown writes into.

use std::cell::RefCell;

/// Receives the message for an expired timer.
///
/// Implementations are best-effort: failures are theirs to log, the
/// countdown completes regardless.
pub trait Notifier {
    /// Announce `message` (notification bubble, sound or both).
    fn notify(&self, message: &str);
}

/// A text surface that shows remaining time.
pub trait LabelSink {
    /// Replace the displayed text.
    fn set_text(&self, text: &str);
}

/// In-memory label that remembers the last text written to it.
#[derive(Debug, Default)]
pub struct TextLabel {
    text: RefCell<String>,
}

impl TextLabel {
    /// Create an empty label.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl LabelSink for TextLabel {
    fn set_text(&self, text: &str) {
        let mut current = self.text.borrow_mut();
        current.clear();
        current.push_str(text);
    }
}

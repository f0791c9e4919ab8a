//! Terminal renderings of the countdown labels.

use kitchen_timer_core::LabelSink;

use std::{
    cell::RefCell,
    io::{self, Write},
};

use tracing::debug;

/// The shared panel label, redrawn in place on one terminal line.
#[derive(Debug)]
pub struct TerminalLabel {
    visible: bool,
    last: RefCell<String>,
}

impl TerminalLabel {
    /// A panel label; `visible == false` swallows all text.
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            last: RefCell::new(String::new()),
        }
    }
}

impl LabelSink for TerminalLabel {
    fn set_text(&self, text: &str) {
        if !self.visible || *self.last.borrow() == text {
            return;
        }

        let width = self.last.borrow().len();
        let mut stdout = io::stdout().lock();
        // Best effort: a closed stdout must not stop the countdown.
        let _ = write!(stdout, "\r{:width$}\r{}", "", text, width = width);
        let _ = stdout.flush();

        self.last.replace(text.to_string());
    }
}

/// A timer's detailed label, reported through the log on change.
#[derive(Debug)]
pub struct LogLabel {
    name: String,
    last: RefCell<String>,
}

impl LogLabel {
    /// Label for the timer called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last: RefCell::new(String::new()),
        }
    }
}

impl LabelSink for LogLabel {
    fn set_text(&self, text: &str) {
        if *self.last.borrow() == text {
            return;
        }
        debug!(timer = %self.name, remaining = text, "Label updated");
        self.last.replace(text.to_string());
    }
}

//! Non-fatal diagnostics emitted during conversion.

use std::cell::RefCell;

/// Receiver for warnings that do not abort a conversion.
pub trait WarningSink {
    /// Report a warning message.
    fn warn(&self, message: &str);
}

impl<S: WarningSink + ?Sized> WarningSink for &S {
    fn warn(&self, message: &str) {
        (**self).warn(message)
    }
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Keeps warnings in memory for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: RefCell<Vec<String>>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Number of warnings received.
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// True if no warning has been received.
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

//! User-facing notifications.

use std::collections::VecDeque;

/// A synchronous, user-facing notification sink.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Pending alerts, oldest first.
///
/// The terminal host treats a non-empty queue as a modal: input is swallowed
/// until every alert has been dismissed.
#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: VecDeque<String>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The alert currently shown, if any.
    pub fn current(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }

    /// Dismiss the alert currently shown.
    pub fn dismiss(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn is_blocking(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for AlertQueue {
    fn alert(&mut self, message: &str) {
        self.pending.push_back(message.to_string());
    }
}

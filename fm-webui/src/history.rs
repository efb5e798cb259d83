//! Session history.
//!
//! `History` is the platform side of navigation: it stores entries and, when
//! the user moves back or forward, queues a `PopStateEvent` for every
//! subscriber. The router never reads entries directly; it only pushes new
//! ones and reacts to queued events.

use crate::error::{HistoryStateSnafu, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::ResultExt;
use tokio::sync::mpsc;

/// Payload stored with every entry the router pushes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub url: String,
}

impl HistoryState {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "url": self.url })
    }

    /// Decode a payload; fails when it has no string `url` field.
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).context(HistoryStateSnafu)
    }
}

/// Fired when the active entry changes through back/forward traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct PopStateEvent {
    pub state: Option<Value>,
}

impl PopStateEvent {
    pub fn new(state: Option<Value>) -> Self {
        Self { state }
    }

    /// The router payload carried by this event, if any.
    pub fn history_state(&self) -> Option<HistoryState> {
        let value = self.state.as_ref()?;
        match HistoryState::from_value(value) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::debug!(%err, "popstate payload is not a router entry");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub state: Option<Value>,
    pub url: String,
}

pub trait History {
    /// Add an entry after the current one, discarding any forward entries.
    fn push_state(&mut self, state: Value, url: &str);

    /// Move one entry back. Returns false if already at the first entry.
    fn back(&mut self) -> bool;

    /// Move one entry forward. Returns false if already at the last entry.
    fn forward(&mut self) -> bool;

    /// Number of entries in the session.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The visible location of the current entry.
    fn location(&self) -> &str;

    /// Register for pop-state events.
    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<PopStateEvent>;
}

/// In-process history stack, the default platform for the terminal host.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
    listeners: Vec<mpsc::UnboundedSender<PopStateEvent>>,
}

impl MemoryHistory {
    /// Create a history holding only the initial, state-less entry.
    pub fn new() -> Self {
        Self {
            entries: vec![HistoryEntry {
                state: None,
                url: String::new(),
            }],
            index: 0,
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    fn dispatch(&mut self) {
        let event = PopStateEvent::new(self.current().state.clone());
        // Dropped receivers are pruned here.
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for MemoryHistory {
    fn push_state(&mut self, state: Value, url: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            state: Some(state),
            url: url.to_string(),
        });
        self.index = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        self.dispatch();
        true
    }

    fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        self.dispatch();
        true
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn location(&self) -> &str {
        &self.current().url
    }

    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<PopStateEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(tx);
        rx
    }
}

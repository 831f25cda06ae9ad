use crate::message::Message;

/// Ordered, append-only list of rendered entries.
///
/// There is no removal or cap; the transcript lives as long as its view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry and returns its index.
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Tracks which entry a scrollable container is pinned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollTracker {
    visible_index: Option<usize>,
    scroll_requests: usize,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the view to the entry at `index`.
    pub fn follow(&mut self, index: usize) {
        self.visible_index = Some(index);
        self.scroll_requests += 1;
    }

    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }

    /// True when the newest of `len` entries is the one in view.
    pub fn is_at_latest(&self, len: usize) -> bool {
        match (self.visible_index, len) {
            (_, 0) => true,
            (Some(index), len) => index + 1 == len,
            (None, _) => false,
        }
    }
}

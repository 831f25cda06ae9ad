use crate::message::Message;
use crate::transcript::{ScrollTracker, Transcript};

/// Presentation surface the widget drives: an input control and a scrollable
/// transcript container.
pub trait ChatView {
    /// Current raw value of the input control.
    fn input_value(&self) -> String;
    fn clear_input(&mut self);
    /// Appends one entry as the last child of the transcript container.
    fn append_entry(&mut self, message: &Message);
    /// Scrolls the container so the newest entry is fully visible.
    fn scroll_to_latest(&mut self);
}

/// Headless view that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    input: String,
    transcript: Transcript,
    scroll: ScrollTracker,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user typing into the input control.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn scroll(&self) -> ScrollTracker {
        self.scroll
    }
}

impl ChatView for MemoryView {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn append_entry(&mut self, message: &Message) {
        self.transcript.push(message.clone());
    }

    fn scroll_to_latest(&mut self) {
        if let Some(last_index) = self.transcript.len().checked_sub(1) {
            self.scroll.follow(last_index);
        }
    }
}

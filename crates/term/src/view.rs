use std::io::Write;

use agrimind_widget::{ChatView, Message, Origin, Transcript};

/// [`ChatView`] that prints each entry as one `who> text` line.
///
/// The "input control" is the most recent line read from the terminal.
pub struct TerminalView<W> {
    input: String,
    transcript: Transcript,
    writer: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(writer: W) -> Self {
        Self {
            input: String::new(),
            transcript: Transcript::new(),
            writer,
        }
    }

    pub fn set_input(&mut self, line: impl Into<String>) {
        self.input = line.into();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

fn prompt(origin: Origin) -> &'static str {
    match origin {
        Origin::User => "you",
        Origin::Bot => "bot",
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn append_entry(&mut self, message: &Message) {
        self.transcript.push(message.clone());
        if let Err(error) = writeln!(self.writer, "{}> {}", prompt(message.origin()), message.text())
        {
            tracing::warn!(error = %error, "failed to print transcript entry");
        }
    }

    fn scroll_to_latest(&mut self) {
        if let Err(error) = self.writer.flush() {
            tracing::warn!(error = %error, "failed to flush transcript");
        }
    }
}

use serde::Serialize;

/// Fixed text shown for every transport or decode failure.
pub const CONNECTION_ERROR_TEXT: &str = "Error: Unable to connect to the server.";
/// Prefix applied to application-level errors reported by the endpoint.
pub const ERROR_PREFIX: &str = "Error: ";

/// Presentation class shared by every transcript entry.
pub const MESSAGE_CLASS: &str = "message";

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    User,
    Bot,
}

impl Origin {
    /// Returns the origin-specific presentation class.
    ///
    /// The two classes are mutually exclusive, so a renderer can style entries
    /// by origin without inspecting their text.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }

    /// Full class list for one entry, e.g. `"message user-message"`.
    pub fn class_list(self) -> String {
        format!("{MESSAGE_CLASS} {}", self.class_name())
    }
}

/// One immutable transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    origin: Origin,
}

impl Message {
    pub fn new(text: impl Into<String>, origin: Origin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Origin::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Origin::Bot)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}

/// Request body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Decoded meaning of a successful endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// `response` field, rendered verbatim.
    Response(String),
    /// `error` field, already carrying [`ERROR_PREFIX`].
    Error(String),
    /// Neither field present; nothing is rendered.
    Empty,
}

impl ReplyOutcome {
    pub fn error(detail: impl AsRef<str>) -> Self {
        Self::Error(format!("{ERROR_PREFIX}{}", detail.as_ref()))
    }

    /// Returns the BOT entry this outcome renders as, if any.
    pub fn into_message(self) -> Option<Message> {
        match self {
            Self::Response(text) | Self::Error(text) => Some(Message::bot(text)),
            Self::Empty => None,
        }
    }
}

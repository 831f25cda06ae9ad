#![deny(unsafe_code)]

//! Chat widget core shared by the browser and terminal frontends.
//!
//! The widget captures text from an input control, renders it into a
//! transcript, posts it to a chat endpoint and renders the endpoint's reply.
//! Presentation and networking are injected through [`ChatView`] and
//! [`ChatTransport`].

/// Endpoint address and element identifiers.
pub mod config;
pub mod error;
/// UI triggers that start a submit.
pub mod events;
/// Transcript entries and wire payloads.
pub mod message;
pub mod reply;
pub mod transcript;
pub mod transport;
pub mod view;
pub mod widget;

pub use config::WidgetConfig;
pub use error::{WidgetError, WidgetResult};
pub use events::{ENTER_KEY, SubmitTrigger};
pub use message::{
    CONNECTION_ERROR_TEXT, ChatRequest, ERROR_PREFIX, MESSAGE_CLASS, Message, Origin, ReplyOutcome,
};
pub use reply::decode_reply;
pub use transcript::{ScrollTracker, Transcript};
pub use transport::{ChatTransport, ScriptedReply, ScriptedTransport};
pub use view::{ChatView, MemoryView};
pub use widget::{ChatWidget, PendingReply};

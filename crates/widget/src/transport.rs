use std::cell::RefCell;
use std::collections::VecDeque;

use futures::future::{self, LocalBoxFuture};

use crate::error::{ConnectSnafu, WidgetResult};
use crate::message::ChatRequest;

/// Sends one chat request and resolves to the raw reply body.
///
/// The returned future owns everything it needs, so the widget can hand it to
/// the frontend's executor. Futures are not `Send`: browser `fetch` futures
/// live on the page's single event loop, and every frontend drives replies
/// from one thread.
pub trait ChatTransport {
    fn endpoint(&self) -> &str;
    fn send(&self, request: ChatRequest) -> LocalBoxFuture<'static, WidgetResult<String>>;
}

/// Canned reply for [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    Body(String),
    Unreachable(String),
}

/// Transport that answers from a queue instead of the network.
///
/// Requests beyond the scripted replies fail as unreachable.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<ScriptedReply>>,
    requests: RefCell<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.push(ScriptedReply::Body(body.into()));
        self
    }

    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.push(ScriptedReply::Unreachable(reason.into()));
        self
    }

    pub fn push(&self, reply: ScriptedReply) {
        self.replies.borrow_mut().push_back(reply);
    }

    /// Every request sent so far, in send order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.borrow().clone()
    }
}

impl ChatTransport for ScriptedTransport {
    fn endpoint(&self) -> &str {
        "scripted://chat"
    }

    fn send(&self, request: ChatRequest) -> LocalBoxFuture<'static, WidgetResult<String>> {
        self.requests.borrow_mut().push(request);
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ScriptedReply::Unreachable("no scripted reply left".to_string()));

        let result = match reply {
            ScriptedReply::Body(body) => Ok(body),
            ScriptedReply::Unreachable(message) => ConnectSnafu {
                stage: "scripted-send",
                endpoint: self.endpoint().to_string(),
                message,
            }
            .fail(),
        };

        Box::pin(future::ready(result))
    }
}

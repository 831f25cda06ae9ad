use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::events::SubmitTrigger;
use crate::message::{CONNECTION_ERROR_TEXT, ChatRequest, Message, Origin};
use crate::reply::decode_reply;
use crate::transport::ChatTransport;
use crate::view::ChatView;

/// Chat widget bound to one view and one endpoint.
///
/// Submits never block each other: every accepted submit returns its own
/// [`PendingReply`], and the widget keeps accepting input while replies are
/// in flight. Replies append in completion order, not send order.
pub struct ChatWidget<V, T> {
    view: Rc<RefCell<V>>,
    transport: Rc<T>,
}

impl<V, T> ChatWidget<V, T>
where
    V: ChatView + 'static,
    T: ChatTransport,
{
    pub fn new(view: Rc<RefCell<V>>, transport: Rc<T>) -> Self {
        tracing::info!(endpoint = %transport.endpoint(), "chat widget ready");
        Self { view, transport }
    }

    pub fn view(&self) -> &Rc<RefCell<V>> {
        &self.view
    }

    pub fn transport(&self) -> &Rc<T> {
        &self.transport
    }

    /// Handles a key-press in the input control.
    pub fn handle_key(&self, key: &str) -> Option<PendingReply> {
        SubmitTrigger::from_key(key).and_then(|trigger| self.submit(trigger))
    }

    /// Captures the input and issues the request.
    ///
    /// Returns `None` without touching the view or the network when the
    /// trimmed input is empty. Otherwise the USER entry is rendered and the
    /// input cleared before the request goes out.
    pub fn submit(&self, trigger: SubmitTrigger) -> Option<PendingReply> {
        let raw_input = self.view.borrow().input_value();
        let text = trim_input(&raw_input);
        if text.is_empty() {
            tracing::debug!(?trigger, "ignoring blank submit");
            return None;
        }
        let text = text.to_string();

        self.add_message(text.clone(), Origin::User);
        self.view.borrow_mut().clear_input();

        tracing::debug!(
            ?trigger,
            endpoint = %self.transport.endpoint(),
            length = text.len(),
            "sending chat message"
        );
        let endpoint = self.transport.endpoint().to_string();
        let in_flight = self.transport.send(ChatRequest::new(text));

        Some(PendingReply::new(Rc::clone(&self.view), endpoint, in_flight))
    }

    /// Renders one entry and scrolls it into view.
    pub fn add_message(&self, text: impl Into<String>, origin: Origin) {
        render(&self.view, &Message::new(text, origin));
    }
}

/// Outstanding reply for one submit.
///
/// Resolves after appending at most one BOT entry and yields that entry. It
/// never fails: transport and decode errors become the generic connection
/// error entry. Dropping it before completion leaves the USER entry without a
/// reply; frontends spawn it instead.
#[must_use = "a pending reply renders nothing unless it is awaited or spawned"]
pub struct PendingReply {
    inner: LocalBoxFuture<'static, Option<Message>>,
}

impl PendingReply {
    fn new<V>(
        view: Rc<RefCell<V>>,
        endpoint: String,
        in_flight: LocalBoxFuture<'static, crate::error::WidgetResult<String>>,
    ) -> Self
    where
        V: ChatView + 'static,
    {
        let inner = async move {
            let reply = match in_flight.await.and_then(|body| decode_reply(&body)) {
                Ok(outcome) => outcome.into_message(),
                Err(error) => {
                    tracing::warn!(endpoint = %endpoint, error = %error, "chat request failed");
                    Some(Message::bot(CONNECTION_ERROR_TEXT))
                }
            };

            if let Some(message) = &reply {
                render(&view, message);
            }
            reply
        };

        Self {
            inner: inner.boxed_local(),
        }
    }
}

impl Future for PendingReply {
    type Output = Option<Message>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

/// Trims the way browsers trim input values, which includes the BOM.
fn trim_input(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

fn render<V: ChatView>(view: &RefCell<V>, message: &Message) {
    let mut view = view.borrow_mut();
    view.append_entry(message);
    view.scroll_to_latest();
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::channel::oneshot;
    use tokio::task::{self, LocalSet};

    use super::*;
    use crate::error::{ConnectSnafu, WidgetResult};
    use crate::transport::ScriptedTransport;
    use crate::view::MemoryView;

    fn widget_with(
        transport: ScriptedTransport,
    ) -> ChatWidget<MemoryView, ScriptedTransport> {
        ChatWidget::new(Rc::new(RefCell::new(MemoryView::new())), Rc::new(transport))
    }

    fn type_input(widget: &ChatWidget<MemoryView, ScriptedTransport>, value: &str) {
        widget.view().borrow_mut().set_input(value);
    }

    fn transcript_pairs(view: &MemoryView) -> Vec<(Origin, String)> {
        view.transcript()
            .iter()
            .map(|message| (message.origin(), message.text().to_string()))
            .collect()
    }

    #[test]
    fn blank_input_has_no_side_effects() {
        let widget = widget_with(ScriptedTransport::new());

        for blank in ["", "   ", "\t\n "] {
            type_input(&widget, blank);
            assert!(widget.submit(SubmitTrigger::Activate).is_none());
            assert!(widget.handle_key("Enter").is_none());
        }

        let view = widget.view().borrow();
        assert!(view.transcript().is_empty());
        assert_eq!(view.scroll().scroll_requests(), 0);
        assert!(widget.transport().requests().is_empty());
    }

    #[test]
    fn byte_order_mark_is_trimmed_like_whitespace() {
        let widget = widget_with(ScriptedTransport::new().with_body("{}"));

        type_input(&widget, "\u{FEFF}");
        assert!(widget.submit(SubmitTrigger::Activate).is_none());

        type_input(&widget, "\u{FEFF} hi\u{FEFF}");
        assert!(widget.submit(SubmitTrigger::Activate).is_some());
        assert_eq!(widget.transport().requests(), [ChatRequest::new("hi")]);
    }

    #[test]
    fn submit_renders_user_entry_and_clears_input_before_reply() {
        let widget = widget_with(ScriptedTransport::new().with_body(r#"{"response":"hello"}"#));
        type_input(&widget, "  hi  ");

        let pending = widget.submit(SubmitTrigger::Activate);
        assert!(pending.is_some());

        let view = widget.view().borrow();
        assert_eq!(transcript_pairs(&view), [(Origin::User, "hi".to_string())]);
        assert_eq!(view.input_value(), "");
        assert!(view.scroll().is_at_latest(view.transcript().len()));
        assert_eq!(widget.transport().requests(), [ChatRequest::new("hi")]);
    }

    #[tokio::test]
    async fn response_field_appends_bot_entry() {
        let widget = widget_with(ScriptedTransport::new().with_body(r#"{"response":"hello"}"#));
        type_input(&widget, "hi");

        let appended = widget.submit(SubmitTrigger::Activate).unwrap().await;
        assert_eq!(appended, Some(Message::bot("hello")));

        let view = widget.view().borrow();
        assert_eq!(
            transcript_pairs(&view),
            [
                (Origin::User, "hi".to_string()),
                (Origin::Bot, "hello".to_string())
            ]
        );
        assert!(view.scroll().is_at_latest(2));
    }

    #[tokio::test]
    async fn error_field_appends_prefixed_bot_entry() {
        let widget = widget_with(ScriptedTransport::new().with_body(r#"{"error":"bad"}"#));
        type_input(&widget, "hi");

        widget.submit(SubmitTrigger::Activate).unwrap().await;

        let view = widget.view().borrow();
        assert_eq!(view.transcript().len(), 2);
        assert_eq!(view.transcript().last(), Some(&Message::bot("Error: bad")));
    }

    #[tokio::test]
    async fn network_failure_appends_generic_error() {
        let widget = widget_with(ScriptedTransport::new().with_failure("connection refused"));
        type_input(&widget, "hi");

        let appended = widget.submit(SubmitTrigger::Activate).unwrap().await;
        assert_eq!(appended, Some(Message::bot(CONNECTION_ERROR_TEXT)));
        assert_eq!(widget.view().borrow().transcript().len(), 2);
    }

    #[tokio::test]
    async fn malformed_body_is_indistinguishable_from_network_failure() {
        let widget = widget_with(ScriptedTransport::new().with_body("Internal Server Error"));
        type_input(&widget, "hi");

        let appended = widget.submit(SubmitTrigger::Activate).unwrap().await;
        assert_eq!(appended, Some(Message::bot(CONNECTION_ERROR_TEXT)));
    }

    #[tokio::test]
    async fn reply_without_known_fields_appends_nothing() {
        let widget = widget_with(ScriptedTransport::new().with_body(r#"{"status":"ok"}"#));
        type_input(&widget, "hi");

        let appended = widget.submit(SubmitTrigger::Activate).unwrap().await;
        assert_eq!(appended, None);

        let view = widget.view().borrow();
        assert_eq!(transcript_pairs(&view), [(Origin::User, "hi".to_string())]);
    }

    #[tokio::test]
    async fn enter_key_and_activation_produce_identical_transcripts() {
        let body = r#"{"response":"hello"}"#;
        let clicked = widget_with(ScriptedTransport::new().with_body(body));
        let pressed = widget_with(ScriptedTransport::new().with_body(body));
        type_input(&clicked, "hi");
        type_input(&pressed, "hi");

        clicked.submit(SubmitTrigger::Activate).unwrap().await;
        pressed.handle_key("Enter").unwrap().await;

        assert_eq!(
            transcript_pairs(&clicked.view().borrow()),
            transcript_pairs(&pressed.view().borrow())
        );
        assert_eq!(clicked.transport().requests(), pressed.transport().requests());
    }

    #[test]
    fn other_keys_do_not_submit() {
        let widget = widget_with(ScriptedTransport::new());
        type_input(&widget, "hi");

        assert!(widget.handle_key("a").is_none());
        assert!(widget.handle_key("Shift").is_none());

        let view = widget.view().borrow();
        assert!(view.transcript().is_empty());
        assert_eq!(view.input_value(), "hi");
    }

    #[tokio::test]
    async fn mixed_submits_pair_each_user_entry_with_one_reply() {
        let transport = ScriptedTransport::new()
            .with_body(r#"{"response":"a"}"#)
            .with_failure("timeout")
            .with_body("{}");
        let widget = widget_with(transport);

        let mut pending = Vec::new();
        for input in ["one", "", "two", "   ", "three"] {
            type_input(&widget, input);
            if let Some(reply) = widget.submit(SubmitTrigger::Activate) {
                let view = widget.view().borrow();
                assert!(view.scroll().is_at_latest(view.transcript().len()));
                drop(view);
                pending.push(reply);
            }
        }
        assert_eq!(pending.len(), 3);
        assert_eq!(widget.transport().requests().len(), 3);

        for reply in pending {
            reply.await;
            let view = widget.view().borrow();
            assert!(view.scroll().is_at_latest(view.transcript().len()));
        }

        let view = widget.view().borrow();
        let users = view.transcript().iter().filter(|m| m.is_user()).count();
        let bots = view.transcript().iter().filter(|m| !m.is_user()).count();
        assert_eq!(users, 3);
        assert_eq!(bots, 2);
    }

    /// Transport whose replies are released by the test, in any order.
    #[derive(Default)]
    struct GatedTransport {
        gates: RefCell<Vec<Option<oneshot::Sender<String>>>>,
    }

    impl GatedTransport {
        fn release(&self, index: usize, body: &str) {
            let gate = self.gates.borrow_mut()[index].take().unwrap();
            gate.send(body.to_string()).unwrap();
        }
    }

    impl ChatTransport for GatedTransport {
        fn endpoint(&self) -> &str {
            "gated://chat"
        }

        fn send(&self, _request: ChatRequest) -> LocalBoxFuture<'static, WidgetResult<String>> {
            let (gate, released) = oneshot::channel();
            self.gates.borrow_mut().push(Some(gate));
            async move {
                released.await.map_err(|_| {
                    ConnectSnafu {
                        stage: "gated-send",
                        endpoint: "gated://chat".to_string(),
                        message: "gate dropped".to_string(),
                    }
                    .build()
                })
            }
            .boxed_local()
        }
    }

    #[tokio::test]
    async fn overlapping_replies_append_in_completion_order() {
        let view = Rc::new(RefCell::new(MemoryView::new()));
        let transport = Rc::new(GatedTransport::default());
        let widget = ChatWidget::new(Rc::clone(&view), Rc::clone(&transport));

        LocalSet::new()
            .run_until(async move {
                view.borrow_mut().set_input("first");
                let first = task::spawn_local(widget.submit(SubmitTrigger::Activate).unwrap());
                view.borrow_mut().set_input("second");
                let second = task::spawn_local(widget.handle_key("Enter").unwrap());

                transport.release(1, r#"{"response":"reply to second"}"#);
                second.await.unwrap();
                transport.release(0, r#"{"response":"reply to first"}"#);
                first.await.unwrap();

                assert_eq!(
                    transcript_pairs(&view.borrow()),
                    [
                        (Origin::User, "first".to_string()),
                        (Origin::User, "second".to_string()),
                        (Origin::Bot, "reply to second".to_string()),
                        (Origin::Bot, "reply to first".to_string()),
                    ]
                );
                assert!(view.borrow().scroll().is_at_latest(4));
            })
            .await;
    }

    /// Transport that records the view state at the moment a request leaves.
    struct ObservingTransport {
        view: Rc<RefCell<MemoryView>>,
        seen: RefCell<Vec<(Vec<(Origin, String)>, String)>>,
    }

    impl ChatTransport for ObservingTransport {
        fn endpoint(&self) -> &str {
            "observing://chat"
        }

        fn send(&self, _request: ChatRequest) -> LocalBoxFuture<'static, WidgetResult<String>> {
            let view = self.view.borrow();
            self.seen
                .borrow_mut()
                .push((transcript_pairs(&view), view.input_value()));
            Box::pin(futures::future::ready(Ok(r#"{"response":"ok"}"#.to_string())))
        }
    }

    #[tokio::test]
    async fn user_entry_is_rendered_and_input_cleared_before_request_is_sent() {
        let view = Rc::new(RefCell::new(MemoryView::new()));
        let transport = Rc::new(ObservingTransport {
            view: Rc::clone(&view),
            seen: RefCell::default(),
        });
        let widget = ChatWidget::new(Rc::clone(&view), Rc::clone(&transport));

        view.borrow_mut().set_input("hi");
        widget.submit(SubmitTrigger::Activate).unwrap().await;

        assert_eq!(
            transport.seen.borrow().as_slice(),
            [(vec![(Origin::User, "hi".to_string())], String::new())]
        );
        assert_eq!(view.borrow().transcript().len(), 2);
    }
}

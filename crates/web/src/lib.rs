//! Browser binding for the chat widget.
//!
//! On load the module waits for the document to be ready, binds the input,
//! send button and transcript container, and forwards clicks and Enter
//! presses to the widget. Each reply is driven on the page's event loop, so
//! the input stays usable while requests are in flight.

use std::cell::RefCell;
use std::rc::Rc;

use agrimind_widget::{ChatWidget, PendingReply, SubmitTrigger, WidgetConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, KeyboardEvent};

pub mod dom;
pub mod fetch;

use dom::{DomElements, DomView};
use fetch::FetchTransport;

/// Container attribute overriding the endpoint base URL.
pub const BASE_URL_ATTRIBUTE: &str = "data-api-base-url";
/// Container attribute overriding the endpoint path.
pub const CHAT_PATH_ATTRIBUTE: &str = "data-chat-path";

type DomChatWidget = ChatWidget<DomView, FetchTransport>;

/// Initialize WASM module
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("AgriMind chat widget module initialized");

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::warn!("no document available; chat widget not mounted");
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut(Event)>::new({
            let document = document.clone();
            move |_event: Event| mount(&document)
        });
        if let Err(error) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        {
            log::warn!("failed to wait for DOMContentLoaded: {error:?}");
        }
        on_ready.forget();
    } else {
        mount(&document);
    }
}

/// Binds the widget to the page. Does nothing when an element is missing.
fn mount(document: &Document) {
    let defaults = WidgetConfig::default();
    let Some(elements) = DomElements::find(
        document,
        &defaults.input_id,
        &defaults.button_id,
        &defaults.container_id,
    ) else {
        log::warn!(
            "chat widget elements #{}, #{} or #{} not found",
            defaults.input_id,
            defaults.button_id,
            defaults.container_id
        );
        return;
    };

    let config = config_from_attributes(defaults, |name| elements.container.get_attribute(name));
    let transport = Rc::new(FetchTransport::new(config.endpoint_url()));
    let view = Rc::new(RefCell::new(DomView::new(
        document.clone(),
        elements.input.clone(),
        elements.container.clone(),
    )));
    let widget: Rc<DomChatWidget> = Rc::new(ChatWidget::new(view, transport));

    let on_click = Closure::<dyn FnMut(Event)>::new({
        let widget = Rc::clone(&widget);
        move |_event: Event| drive(widget.submit(SubmitTrigger::Activate))
    });
    let on_keypress = Closure::<dyn FnMut(Event)>::new({
        let widget = Rc::clone(&widget);
        move |event: Event| {
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                drive(widget.handle_key(&key_event.key()));
            }
        }
    });

    listen(&elements.button, "click", on_click);
    listen(&elements.input, "keypress", on_keypress);
}

fn drive(pending: Option<PendingReply>) {
    if let Some(pending) = pending {
        wasm_bindgen_futures::spawn_local(async move {
            pending.await;
        });
    }
}

fn listen(target: &web_sys::EventTarget, event_name: &str, handler: Closure<dyn FnMut(Event)>) {
    if let Err(error) =
        target.add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())
    {
        log::warn!("failed to listen for {event_name}: {error:?}");
    }
    // Listeners live as long as the page.
    handler.forget();
}

/// Applies endpoint overrides read from the container's data attributes.
pub fn config_from_attributes(
    config: WidgetConfig,
    attribute: impl Fn(&str) -> Option<String>,
) -> WidgetConfig {
    let mut config = config;
    if let Some(base_url) = attribute(BASE_URL_ATTRIBUTE) {
        config = config.with_base_url(base_url);
    }
    if let Some(chat_path) = attribute(CHAT_PATH_ATTRIBUTE) {
        config = config.with_chat_path(chat_path);
    }
    config.normalized()
}

use agrimind_widget::{ChatView, Message};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

/// The three page elements the widget binds to.
pub struct DomElements {
    pub input: HtmlInputElement,
    pub button: Element,
    pub container: Element,
}

impl DomElements {
    /// Looks up all three elements; `None` when any is missing or the input
    /// id does not name an `<input>`.
    pub fn find(
        document: &Document,
        input_id: &str,
        button_id: &str,
        container_id: &str,
    ) -> Option<Self> {
        let input = document
            .get_element_by_id(input_id)?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        let button = document.get_element_by_id(button_id)?;
        let container = document.get_element_by_id(container_id)?;

        Some(Self {
            input,
            button,
            container,
        })
    }
}

/// [`ChatView`] over a text input and a scrollable container.
pub struct DomView {
    document: Document,
    input: HtmlInputElement,
    container: Element,
}

impl DomView {
    pub fn new(document: Document, input: HtmlInputElement, container: Element) -> Self {
        Self {
            document,
            input,
            container,
        }
    }
}

impl ChatView for DomView {
    fn input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn append_entry(&mut self, message: &Message) {
        let entry = match self.document.create_element("div") {
            Ok(entry) => entry,
            Err(error) => {
                log::warn!("failed to create transcript entry: {error:?}");
                return;
            }
        };
        entry.set_class_name(&message.origin().class_list());
        entry.set_text_content(Some(message.text()));

        if let Err(error) = self.container.append_child(&entry) {
            log::warn!("failed to append transcript entry: {error:?}");
        }
    }

    fn scroll_to_latest(&mut self) {
        self.container.set_scroll_top(self.container.scroll_height());
    }
}

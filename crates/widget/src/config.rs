use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_PATH: &str = "/chat";
pub const DEFAULT_INPUT_ID: &str = "message-input";
pub const DEFAULT_BUTTON_ID: &str = "send-button";
pub const DEFAULT_CONTAINER_ID: &str = "chat-messages";

/// Endpoint address and element identifiers injected into the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    #[serde(default = "default_input_id")]
    pub input_id: String,
    #[serde(default = "default_button_id")]
    pub button_id: String,
    #[serde(default = "default_container_id")]
    pub container_id: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_path: default_chat_path(),
            input_id: default_input_id(),
            button_id: default_button_id(),
            container_id: default_container_id(),
        }
    }
}

impl WidgetConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_chat_path(mut self, chat_path: impl Into<String>) -> Self {
        self.chat_path = chat_path.into();
        self
    }

    /// Full URL the widget posts to, with exactly one `/` between base and path.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.chat_path.trim_start_matches('/')
        )
    }

    /// Trims every field and falls back to defaults for blank ones.
    pub fn normalized(self) -> Self {
        Self {
            base_url: non_blank_or(self.base_url, default_base_url),
            chat_path: non_blank_or(self.chat_path, default_chat_path),
            input_id: non_blank_or(self.input_id, default_input_id),
            button_id: non_blank_or(self.button_id, default_button_id),
            container_id: non_blank_or(self.container_id, default_container_id),
        }
    }
}

fn non_blank_or(value: String, fallback: fn() -> String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback()
    } else {
        trimmed.to_string()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_chat_path() -> String {
    DEFAULT_CHAT_PATH.to_string()
}

fn default_input_id() -> String {
    DEFAULT_INPUT_ID.to_string()
}

fn default_button_id() -> String {
    DEFAULT_BUTTON_ID.to_string()
}

fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

#![deny(unsafe_code)]

//! Terminal frontend for the AgriMind chat widget.
//!
//! Lines read from stdin stand in for the input control and Enter key; the
//! transcript is printed to stdout.

/// Session loop driving the widget from terminal input.
pub mod session;
/// Layered widget settings.
pub mod settings;
pub mod transport;
pub mod view;

pub use session::run_session;
pub use settings::SettingsStore;
pub use transport::HttpTransport;
pub use view::TerminalView;

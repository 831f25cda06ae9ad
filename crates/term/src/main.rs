use std::cell::RefCell;
use std::io;
use std::process::ExitCode;
use std::rc::Rc;

use agrimind_term::{HttpTransport, SettingsStore, TerminalView, run_session};
use agrimind_widget::ChatWidget;
use tokio::io::BufReader;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Logs go to stderr so they never interleave with the transcript on stdout.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!("failed to start async runtime: {error}");
            return ExitCode::FAILURE;
        }
    };

    let settings = SettingsStore::load();
    let endpoint = settings.config().endpoint_url();
    tracing::info!(
        config_path = ?settings.config_path(),
        endpoint = %endpoint,
        "loaded widget settings"
    );
    eprintln!("AgriMind chat ({endpoint}). Type a message and press Enter; Ctrl-D quits.");

    let view = Rc::new(RefCell::new(TerminalView::new(io::stdout())));
    let transport = Rc::new(HttpTransport::new(endpoint));
    let widget = ChatWidget::new(view, transport);

    let local = LocalSet::new();
    let session = local.run_until(run_session(BufReader::new(tokio::io::stdin()), widget));
    match runtime.block_on(session) {
        Ok(submitted) => {
            tracing::info!(submitted, "chat session ended");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("failed to read terminal input: {error}");
            ExitCode::FAILURE
        }
    }
}

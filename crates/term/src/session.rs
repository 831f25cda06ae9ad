use std::io::{self, Write};

use agrimind_widget::{ChatTransport, ChatWidget, ENTER_KEY};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;

use crate::view::TerminalView;

/// Feeds terminal lines into the widget until input ends.
///
/// Each line is typed into the input and followed by an Enter press. Replies
/// are spawned onto the current `LocalSet`, so new lines are accepted while
/// earlier requests are still in flight. On end of input the session waits
/// for every outstanding reply. Returns the number of accepted submits.
pub async fn run_session<R, W, T>(
    reader: R,
    widget: ChatWidget<TerminalView<W>, T>,
) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write + 'static,
    T: ChatTransport,
{
    let mut lines = reader.lines();
    let mut in_flight = JoinSet::new();
    let mut submitted = 0;

    while let Some(line) = lines.next_line().await? {
        widget.view().borrow_mut().set_input(line);
        if let Some(pending) = widget.handle_key(ENTER_KEY) {
            submitted += 1;
            in_flight.spawn_local(pending);
        }
    }

    tracing::debug!(outstanding = in_flight.len(), "input closed, draining replies");
    while let Some(joined) = in_flight.join_next().await {
        if let Err(error) = joined {
            tracing::warn!(error = %error, "reply task ended abnormally");
        }
    }

    Ok(submitted)
}

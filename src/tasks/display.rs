//! Terminal display of the clock snapshot

use std::sync::Arc;
use tokio::{
    io::{self, AsyncWrite, AsyncWriteExt},
    sync::watch,
};
use tracing::{error, info};

use crate::state::{AppState, Snapshot};

/// How snapshots are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// One human-readable status line per change
    Text,
    /// One JSON object per change, for piping into another front end
    Json,
}

/// Render a snapshot as a single status line
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut controls = Vec::new();
    if snapshot.controls.start {
        controls.push("[s]tart");
    }
    if snapshot.controls.stop {
        controls.push("s[t]op");
    }
    if snapshot.controls.skip {
        controls.push("s[k]ip");
    }
    if snapshot.controls.restart {
        controls.push("[r]estart");
    }

    let mut line = format!("Current: {}", snapshot.current_label);
    if !snapshot.time.is_empty() {
        line.push_str(&format!("  {}", snapshot.time));
    }
    if let Some(next) = &snapshot.next_label {
        line.push_str(&format!("  Next: {}", next));
    }
    line.push_str(&format!("  | {}", controls.join(" ")));
    line
}

/// Render a snapshot according to the display mode
pub fn render(snapshot: &Snapshot, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Text => render_text(snapshot),
        DisplayMode::Json => serde_json::to_string(snapshot)
            .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e)),
    }
}

/// Background task that redraws the display after every transition
pub async fn display_task(state: Arc<AppState>, mode: DisplayMode) {
    info!("Starting display task ({:?})", mode);
    write_snapshots(state.subscribe_snapshots(), mode, io::stdout()).await;
}

/// Write the current snapshot and every later one to `out`, one line each.
///
/// Returns the writer once the snapshot channel closes.
pub async fn write_snapshots<W>(mut snapshots: watch::Receiver<Snapshot>, mode: DisplayMode, mut out: W) -> W
where
    W: AsyncWrite + Unpin,
{
    loop {
        let line = {
            let snapshot = snapshots.borrow_and_update();
            render(&snapshot, mode)
        };

        if let Err(e) = write_line(&mut out, &line).await {
            error!("Failed to write display: {}", e);
        }

        if snapshots.changed().await.is_err() {
            break;
        }
    }

    out
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> io::Result<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}

//! Keyboard commands read from stdin

use std::sync::Arc;
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::Notify,
};
use tracing::{error, info, warn};

use crate::state::{AppState, Control};

/// A parsed line of keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Control(Control),
    Quit,
}

/// Parse one input line. Unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<KeyCommand> {
    match line.trim().to_lowercase().as_str() {
        "s" | "start" => Some(KeyCommand::Control(Control::Start)),
        "t" | "stop" => Some(KeyCommand::Control(Control::Stop)),
        "k" | "skip" => Some(KeyCommand::Control(Control::Skip)),
        "r" | "restart" => Some(KeyCommand::Control(Control::Restart)),
        "q" | "quit" | "exit" => Some(KeyCommand::Quit),
        _ => None,
    }
}

/// Background task that turns stdin lines into clock transitions.
///
/// `quit` is notified when the user asks to exit. End of input only ends this
/// task; the clock keeps running.
pub async fn keyboard_task(state: Arc<AppState>, quit: Arc<Notify>) {
    info!("Starting keyboard task (s=start t=stop k=skip r=restart q=quit)");

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(KeyCommand::Control(control)) => {
                        if let Err(e) = state.apply(control) {
                            error!("Failed to apply {}: {}", control.as_str(), e);
                        }
                    }
                    Some(KeyCommand::Quit) => {
                        info!("Quit requested from keyboard");
                        quit.notify_one();
                        break;
                    }
                    None => warn!("Unknown command: {:?}", line.trim()),
                }
            }
            Ok(None) => {
                info!("Keyboard input closed");
                break;
            }
            Err(e) => {
                error!("Failed to read keyboard input: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!(parse_command("s"), Some(KeyCommand::Control(Control::Start)));
        assert_eq!(parse_command(" STOP "), Some(KeyCommand::Control(Control::Stop)));
        assert_eq!(parse_command("k"), Some(KeyCommand::Control(Control::Skip)));
        assert_eq!(parse_command("restart"), Some(KeyCommand::Control(Control::Restart)));
        assert_eq!(parse_command("q"), Some(KeyCommand::Quit));
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!(parse_command("pause"), None);
        assert_eq!(parse_command(""), None);
    }
}

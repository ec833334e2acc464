//! Chime playback

use std::path::PathBuf;
use tokio::{
    io::{self, AsyncWriteExt},
    process::Command,
};
use tracing::debug;

/// Plays the chime either as a terminal bell or through an external player
#[derive(Debug, Clone)]
pub struct ChimePlayer {
    pub sound: Option<PathBuf>,
    pub player: String,
}

impl ChimePlayer {
    pub fn new(sound: Option<PathBuf>, player: impl Into<String>) -> Self {
        Self {
            sound,
            player: player.into(),
        }
    }

    /// Play the chime once
    pub async fn play(&self) -> Result<(), String> {
        match &self.sound {
            None => ring_terminal_bell().await,
            Some(sound) => {
                debug!("Playing {} with {}", sound.display(), self.player);

                let output = Command::new(&self.player)
                    .arg(sound)
                    .output()
                    .await
                    .map_err(|e| format!("Failed to execute {}: {}", self.player, e))?;

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    return Err(format!("{} failed: {}", self.player, stderr.trim()));
                }

                Ok(())
            }
        }
    }
}

/// The bell goes to stderr; stdout carries the display and must stay line-clean
async fn ring_terminal_bell() -> Result<(), String> {
    let mut stderr = io::stderr();
    stderr.write_all(b"\x07")
        .await
        .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;
    stderr.flush()
        .await
        .map_err(|e| format!("Failed to ring terminal bell: {}", e))
}

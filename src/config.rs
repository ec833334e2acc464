//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::{CommandFactory, Parser};

use crate::{services::ChimePlayer, tasks::DisplayMode};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "agenda-clock")]
#[command(about = "A headless meeting timer that counts down through an agenda of timed topics")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Agenda file with one `label,seconds` entry per line
    pub agenda: Option<PathBuf>,

    /// Chime one second before each topic runs out
    #[arg(short, long)]
    pub chime: bool,

    /// Sound file to play for the chime instead of the terminal bell
    #[arg(long, value_name = "PATH")]
    pub chime_sound: Option<PathBuf>,

    /// Program used to play the chime sound file
    #[arg(long, value_name = "CMD", default_value = "paplay")]
    pub chime_player: String,

    /// Port for the HTTP control API
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address for the HTTP control API
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Disable the HTTP control API
    #[arg(long)]
    pub no_http: bool,

    /// Do not read commands from stdin
    #[arg(long)]
    pub no_keyboard: bool,

    /// Print snapshots as JSON lines instead of status text
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// One-line usage, printed when the agenda path is missing
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.json { DisplayMode::Json } else { DisplayMode::Text }
    }

    pub fn chime_player(&self) -> ChimePlayer {
        ChimePlayer::new(self.chime_sound.clone(), self.chime_player.clone())
    }
}

//! External side effects module
//! 
//! This module contains the fire-and-forget chime playback.

pub mod chime;

// Re-export main types
pub use chime::ChimePlayer;

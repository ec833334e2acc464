//! Background tasks module
//! 
//! This module contains the tasks that run alongside the clock: the tick
//! source, the terminal display, keyboard input and chime playback.

pub mod ticker;
pub mod display;
pub mod keyboard;
pub mod chime;

// Re-export main functions
pub use ticker::ticker_task;
pub use display::{display_task, DisplayMode};
pub use keyboard::keyboard_task;
pub use chime::chime_task;

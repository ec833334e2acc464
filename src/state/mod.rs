//! State management module
//! 
//! The agenda clock state machine, the snapshot derived from it, and the
//! shared application state that serializes every transition.

pub mod clock;
pub mod snapshot;
pub mod app_state;

// Re-export main types
pub use clock::{AgendaClock, TickerAction, Transition};
pub use snapshot::{format_time, Controls, Phase, Snapshot, END_LABEL};
pub use app_state::{AppState, ChimeEvent, Control, TickerCommand};

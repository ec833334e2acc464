//! Agenda Clock - A headless meeting timer
//! 
//! This library walks a meeting through an agenda of timed topics. The
//! countdown state machine lives in [`state::AgendaClock`]; everything else
//! feeds it ticks and user commands or shows its snapshots.

pub mod agenda;
pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use agenda::{Agenda, AgendaEntry};
pub use config::Config;
pub use state::{AgendaClock, AppState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;

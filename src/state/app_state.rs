//! Shared application state wrapping the agenda clock

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::agenda::Agenda;
use super::{AgendaClock, Snapshot, TickerAction, Transition};

/// User-triggered clock transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    Skip,
    Restart,
}

impl Control {
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Start => "start",
            Control::Stop => "stop",
            Control::Skip => "skip",
            Control::Restart => "restart",
        }
    }
}

/// Instruction for the ticker task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerCommand {
    Halted,
    /// Tick once per second; ticks must carry this generation to count
    Armed { generation: u64 },
}

/// Raised one second before a topic runs out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChimeEvent {
    pub topic_index: usize,
    pub label: String,
}

/// The clock plus the generation of the tick phase it expects
#[derive(Debug)]
struct ClockCell {
    clock: AgendaClock,
    generation: u64,
}

/// Main application state: one clock, and the channels that fan its changes out
#[derive(Debug)]
pub struct AppState {
    clock: Arc<Mutex<ClockCell>>,
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Snapshot published after every transition
    pub snapshot_tx: watch::Sender<Snapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Snapshot>,
    pub ticker_tx: watch::Sender<TickerCommand>,
    pub _ticker_rx: watch::Receiver<TickerCommand>,
    pub chime_tx: broadcast::Sender<ChimeEvent>,
}

impl AppState {
    /// Create a new AppState with a stopped clock on the first topic
    pub fn new(agenda: Agenda, chime_enabled: bool) -> Self {
        let clock = AgendaClock::load(agenda, chime_enabled);
        let (snapshot_tx, snapshot_rx) = watch::channel(clock.snapshot());
        let (ticker_tx, ticker_rx) = watch::channel(TickerCommand::Halted);
        let (chime_tx, _) = broadcast::channel(16);

        Self {
            clock: Arc::new(Mutex::new(ClockCell { clock, generation: 0 })),
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            ticker_tx,
            _ticker_rx: ticker_rx,
            chime_tx,
        }
    }

    /// Apply a user transition and publish the result
    pub fn apply(&self, control: Control) -> Result<Snapshot, String> {
        let mut cell = self.clock.lock()
            .map_err(|e| format!("Failed to lock agenda clock: {}", e))?;

        let transition = match control {
            Control::Start => cell.clock.start(),
            Control::Stop => cell.clock.stop(),
            Control::Skip => cell.clock.skip(),
            Control::Restart => cell.clock.restart(),
        };
        let snapshot = self.commit(&mut cell, transition);
        drop(cell);

        info!(
            "{}: {} {} (phase={})",
            control.as_str(), snapshot.current_label, snapshot.time, snapshot.phase.as_str()
        );

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(control.as_str().to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    pub fn start(&self) -> Result<Snapshot, String> {
        self.apply(Control::Start)
    }

    pub fn stop(&self) -> Result<Snapshot, String> {
        self.apply(Control::Stop)
    }

    pub fn skip(&self) -> Result<Snapshot, String> {
        self.apply(Control::Skip)
    }

    pub fn restart(&self) -> Result<Snapshot, String> {
        self.apply(Control::Restart)
    }

    /// Deliver one tick from the ticker armed at `generation`.
    ///
    /// Returns `Ok(None)` when the tick is stale, i.e. a transition re-armed
    /// or halted the ticker after this tick was scheduled.
    pub fn tick(&self, generation: u64) -> Result<Option<Snapshot>, String> {
        let mut cell = self.clock.lock()
            .map_err(|e| format!("Failed to lock agenda clock: {}", e))?;

        if cell.generation != generation {
            debug!("Discarding stale tick (generation {} != {})", generation, cell.generation);
            return Ok(None);
        }

        let transition = cell.clock.on_tick();
        let snapshot = self.commit(&mut cell, transition);
        debug!("tick: {} {}", snapshot.current_label, snapshot.time);
        Ok(Some(snapshot))
    }

    /// Carry out a transition's side effects while the clock is still locked,
    /// so ticker commands and snapshots go out in transition order.
    fn commit(&self, cell: &mut ClockCell, transition: Transition) -> Snapshot {
        match transition.ticker {
            TickerAction::Keep => {}
            TickerAction::Arm => {
                cell.generation += 1;
                self.send_ticker(TickerCommand::Armed { generation: cell.generation });
            }
            TickerAction::Halt => {
                cell.generation += 1;
                self.send_ticker(TickerCommand::Halted);
            }
        }

        let snapshot = cell.clock.snapshot();

        if transition.chime {
            let event = ChimeEvent {
                topic_index: snapshot.current_index,
                label: snapshot.current_label.clone(),
            };
            // No subscribers just means nobody plays chimes
            if self.chime_tx.send(event).is_err() {
                debug!("Chime raised with no listeners");
            }
        }

        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to publish snapshot: {}", e);
        }

        snapshot
    }

    fn send_ticker(&self, command: TickerCommand) {
        if let Err(e) = self.ticker_tx.send(command) {
            warn!("Failed to send ticker command: {}", e);
        }
    }

    /// Get the current snapshot
    pub fn get_snapshot(&self) -> Result<Snapshot, String> {
        self.clock.lock()
            .map(|cell| cell.clock.snapshot())
            .map_err(|e| format!("Failed to lock agenda clock: {}", e))
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn subscribe_ticker(&self) -> watch::Receiver<TickerCommand> {
        self.ticker_tx.subscribe()
    }

    pub fn subscribe_chimes(&self) -> broadcast::Receiver<ChimeEvent> {
        self.chime_tx.subscribe()
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

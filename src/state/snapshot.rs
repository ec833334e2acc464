//! Display snapshot derived from the agenda clock

use serde::{Deserialize, Serialize};

use super::AgendaClock;

/// Label shown in place of a topic once the agenda has run out
pub const END_LABEL: &str = "End";

/// Coarse clock state, as the presentation layer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Initial,
    Running,
    Stopped,
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Initial => "initial",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
            Phase::Finished => "finished",
        }
    }
}

/// Which controls should be visible right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub skip: bool,
    pub restart: bool,
}

impl Controls {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Initial => Self { start: true, stop: false, skip: false, restart: false },
            Phase::Running => Self { start: false, stop: true, skip: true, restart: true },
            // Stop only swaps start/stop; skip and restart keep what start gave them
            Phase::Stopped => Self { start: true, stop: false, skip: true, restart: true },
            Phase::Finished => Self { start: false, stop: false, skip: false, restart: true },
        }
    }
}

/// Everything the presentation layer needs after a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub current_index: usize,
    pub total_topics: usize,
    pub current_label: String,
    pub remaining_seconds: Option<u64>,
    /// `MM:SS`, empty once finished
    pub time: String,
    /// `None` once finished
    pub next_label: Option<String>,
    pub controls: Controls,
}

impl Snapshot {
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

impl From<&AgendaClock> for Snapshot {
    fn from(clock: &AgendaClock) -> Self {
        let phase = if clock.is_finished() {
            Phase::Finished
        } else if clock.is_running() {
            Phase::Running
        } else if clock.is_engaged() {
            Phase::Stopped
        } else {
            Phase::Initial
        };

        let (current_label, next_label) = match clock.current_entry() {
            Some(entry) => (
                entry.label.clone(),
                Some(
                    clock
                        .next_entry()
                        .map(|next| next.label.clone())
                        .unwrap_or_else(|| END_LABEL.to_string()),
                ),
            ),
            None => (END_LABEL.to_string(), None),
        };

        let remaining_seconds = clock.remaining_seconds();

        Self {
            phase,
            current_index: clock.current_index(),
            total_topics: clock.agenda().len(),
            current_label,
            remaining_seconds,
            time: remaining_seconds.map(format_time).unwrap_or_default(),
            next_label,
            controls: Controls::for_phase(phase),
        }
    }
}

impl AgendaClock {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }
}

/// Format a second count as zero-padded `MM:SS`. Hours are dropped, so
/// 3600 seconds and up wrap around.
pub fn format_time(seconds: u64) -> String {
    let minutes = (seconds / 60) % 60;
    let seconds = seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

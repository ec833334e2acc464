//! Countdown state machine for walking through an agenda
//!
//! [`AgendaClock`] knows nothing about timers, threads or displays. Each
//! transition mutates the clock and hands back a [`Transition`] telling the
//! embedder what to do with its tick source and whether to raise a chime.

use tracing::debug;

use crate::agenda::{Agenda, AgendaEntry};

/// What the tick source should do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerAction {
    /// Leave the tick source as it is
    Keep,
    /// (Re)start ticking with the next tick exactly one second from now
    Arm,
    /// Stop ticking
    Halt,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub ticker: TickerAction,
    pub chime: bool,
}

impl Transition {
    fn new(ticker: TickerAction) -> Self {
        Self {
            ticker,
            chime: false,
        }
    }

    fn keep() -> Self {
        Self::new(TickerAction::Keep)
    }
}

/// Agenda countdown: current topic, seconds left, and whether it is ticking
#[derive(Debug, Clone)]
pub struct AgendaClock {
    agenda: Agenda,
    current_index: usize,
    /// `None` once the agenda is finished
    remaining_seconds: Option<u64>,
    running: bool,
    /// Set by `start`, cleared by `restart`. Stop leaves it alone, which keeps
    /// skip and restart visible while paused.
    engaged: bool,
    chime_enabled: bool,
}

impl AgendaClock {
    /// Build a stopped clock positioned on the first topic
    pub fn load(agenda: Agenda, chime_enabled: bool) -> Self {
        let mut clock = Self {
            agenda,
            current_index: 0,
            remaining_seconds: None,
            running: false,
            engaged: false,
            chime_enabled,
        };
        clock.load_topic(0);
        clock
    }

    /// Move to `index` and reload its duration. Any index at or past the end
    /// lands in the finished state.
    pub fn load_topic(&mut self, index: usize) {
        if let Some(entry) = self.agenda.get(index) {
            self.current_index = index;
            self.remaining_seconds = Some(entry.duration_seconds);
            debug!("Loaded topic {} ({}s): {}", index, entry.duration_seconds, entry.label);
        } else {
            self.current_index = self.agenda.len();
            self.remaining_seconds = None;
            self.running = false;
            debug!("Agenda finished");
        }
    }

    pub fn start(&mut self) -> Transition {
        if self.is_finished() || self.running {
            return Transition::keep();
        }
        self.running = true;
        self.engaged = true;
        Transition::new(TickerAction::Arm)
    }

    pub fn stop(&mut self) -> Transition {
        self.running = false;
        Transition::new(TickerAction::Halt)
    }

    pub fn restart(&mut self) -> Transition {
        self.running = false;
        self.engaged = false;
        self.load_topic(0);
        Transition::new(TickerAction::Halt)
    }

    pub fn skip(&mut self) -> Transition {
        self.load_topic(self.current_index + 1);
        if self.is_finished() {
            Transition::new(TickerAction::Halt)
        } else if self.running {
            // Phase restarts: the next decrement lands a full second from now
            Transition::new(TickerAction::Arm)
        } else {
            Transition::keep()
        }
    }

    /// Advance the countdown by one second. Ticks that arrive while stopped
    /// are ignored.
    pub fn on_tick(&mut self) -> Transition {
        if !self.running {
            return Transition::keep();
        }

        let chime = self.chime_enabled && self.remaining_seconds == Some(1);

        let ticker = match self.remaining_seconds {
            Some(0) | None => {
                self.load_topic(self.current_index + 1);
                if self.is_finished() {
                    TickerAction::Halt
                } else {
                    TickerAction::Keep
                }
            }
            Some(remaining) => {
                self.remaining_seconds = Some(remaining - 1);
                TickerAction::Keep
            }
        };

        Transition { ticker, chime }
    }

    pub fn agenda(&self) -> &[AgendaEntry] {
        &self.agenda
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_seconds(&self) -> Option<u64> {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.agenda.len()
    }

    pub fn current_entry(&self) -> Option<&AgendaEntry> {
        self.agenda.get(self.current_index)
    }

    pub fn next_entry(&self) -> Option<&AgendaEntry> {
        self.agenda.get(self.current_index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agenda(entries: &[(&str, u64)]) -> Agenda {
        entries
            .iter()
            .map(|(label, secs)| AgendaEntry::new(*label, *secs))
            .collect()
    }

    fn intro_body() -> AgendaClock {
        AgendaClock::load(agenda(&[("Intro", 2), ("Body", 1)]), true)
    }

    #[test]
    fn load_positions_on_first_topic() {
        let clock = intro_body();
        assert_eq!(clock.current_index(), 0);
        assert_eq!(clock.remaining_seconds(), Some(2));
        assert!(!clock.is_running());
        assert!(!clock.is_finished());
    }

    #[test]
    fn empty_agenda_is_finished_immediately() {
        let mut clock = AgendaClock::load(Vec::new(), false);
        assert!(clock.is_finished());
        assert_eq!(clock.remaining_seconds(), None);
        assert_eq!(clock.start(), Transition::keep());
        assert!(!clock.is_running());
    }

    #[test]
    fn load_topic_past_end_finishes_and_skip_is_absorbing() {
        for index in [2, 3, 100] {
            let mut clock = intro_body();
            clock.start();
            clock.load_topic(index);
            assert!(clock.is_finished());
            assert!(!clock.is_running());
            assert_eq!(clock.current_index(), 2);

            assert_eq!(clock.skip().ticker, TickerAction::Halt);
            assert!(clock.is_finished());
            assert_eq!(clock.current_index(), 2);
            assert_eq!(clock.start(), Transition::keep());
            assert_eq!(clock.on_tick(), Transition::keep());
        }
    }

    #[test]
    fn intro_body_trace() {
        let mut clock = intro_body();
        assert_eq!(clock.start().ticker, TickerAction::Arm);

        let t = clock.on_tick();
        assert!(!t.chime);
        assert_eq!(clock.remaining_seconds(), Some(1));

        let t = clock.on_tick();
        assert!(t.chime);
        assert_eq!(clock.remaining_seconds(), Some(0));
        assert_eq!(clock.current_index(), 0);

        let t = clock.on_tick();
        assert!(!t.chime);
        assert_eq!(t.ticker, TickerAction::Keep);
        assert_eq!(clock.current_index(), 1);
        assert_eq!(clock.remaining_seconds(), Some(1));

        // Body starts at 1, so the very next tick chimes
        let t = clock.on_tick();
        assert!(t.chime);
        assert_eq!(clock.remaining_seconds(), Some(0));

        let t = clock.on_tick();
        assert_eq!(t.ticker, TickerAction::Halt);
        assert!(clock.is_finished());
        assert!(!clock.is_running());
    }

    #[test]
    fn topic_shows_every_second_down_to_zero() {
        let duration = 5;
        let mut clock = AgendaClock::load(agenda(&[("Only", duration), ("After", 9)]), false);
        clock.start();

        let mut observed = vec![clock.remaining_seconds().unwrap()];
        while clock.current_index() == 0 {
            clock.on_tick();
            if clock.current_index() == 0 {
                observed.push(clock.remaining_seconds().unwrap());
            }
        }

        assert_eq!(observed, vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(observed.len() as u64, duration + 1);
        assert_eq!(clock.remaining_seconds(), Some(9));
    }

    #[test]
    fn zero_duration_topic_holds_for_one_tick() {
        let mut clock = AgendaClock::load(agenda(&[("Blink", 0), ("Next", 3)]), true);
        clock.start();
        assert_eq!(clock.remaining_seconds(), Some(0));

        let t = clock.on_tick();
        assert!(!t.chime);
        assert_eq!(clock.current_index(), 1);
        assert_eq!(clock.remaining_seconds(), Some(3));
    }

    #[test]
    fn chime_fires_once_per_topic_only_when_enabled() {
        let entries = agenda(&[("A", 3), ("B", 4), ("C", 0)]);

        let mut enabled = AgendaClock::load(entries.clone(), true);
        enabled.start();
        let mut chimes = Vec::new();
        while enabled.is_running() {
            let index = enabled.current_index();
            if enabled.on_tick().chime {
                chimes.push(index);
            }
        }
        // C has no second left to chime on
        assert_eq!(chimes, vec![0, 1]);

        let mut disabled = AgendaClock::load(entries, false);
        disabled.start();
        while disabled.is_running() {
            assert!(!disabled.on_tick().chime);
        }
    }

    #[test]
    fn restart_always_returns_to_first_topic() {
        let mut running = intro_body();
        running.start();
        running.on_tick();

        let mut stopped = intro_body();
        stopped.start();
        stopped.skip();
        stopped.stop();

        let mut finished = intro_body();
        finished.skip();
        finished.skip();

        for mut clock in [running, stopped, finished, intro_body()] {
            assert_eq!(clock.restart().ticker, TickerAction::Halt);
            assert_eq!(clock.current_index(), 0);
            assert_eq!(clock.remaining_seconds(), Some(2));
            assert!(!clock.is_running());
            assert!(!clock.is_engaged());
        }
    }

    #[test]
    fn skip_while_running_rearms_the_ticker() {
        let mut clock = intro_body();
        clock.start();
        clock.on_tick();

        assert_eq!(clock.skip().ticker, TickerAction::Arm);
        assert!(clock.is_running());
        assert_eq!(clock.current_index(), 1);
        assert_eq!(clock.remaining_seconds(), Some(1));
    }

    #[test]
    fn skip_while_stopped_stays_stopped() {
        let mut clock = intro_body();
        clock.start();
        clock.stop();

        assert_eq!(clock.skip().ticker, TickerAction::Keep);
        assert!(!clock.is_running());
        assert_eq!(clock.current_index(), 1);
    }

    #[test]
    fn skip_past_last_topic_halts_a_running_clock() {
        let mut clock = intro_body();
        clock.start();
        clock.skip();
        assert_eq!(clock.skip().ticker, TickerAction::Halt);
        assert!(clock.is_finished());
        assert!(!clock.is_running());
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut clock = intro_body();
        assert_eq!(clock.start().ticker, TickerAction::Arm);
        assert_eq!(clock.start(), Transition::keep());
        assert!(clock.is_running());

        assert_eq!(clock.stop().ticker, TickerAction::Halt);
        assert_eq!(clock.stop().ticker, TickerAction::Halt);
        assert!(!clock.is_running());
        assert_eq!(clock.remaining_seconds(), Some(2));
    }

    #[test]
    fn ticks_while_stopped_are_ignored() {
        let mut clock = intro_body();
        assert_eq!(clock.on_tick(), Transition::keep());
        assert_eq!(clock.remaining_seconds(), Some(2));

        clock.start();
        clock.on_tick();
        clock.stop();
        clock.on_tick();
        assert_eq!(clock.remaining_seconds(), Some(1));
    }
}

//! Periodic tick schedule
//!
//! Single-threaded: the owner polls the ticker from its event loop and runs
//! the tick inline. The first tick is due immediately.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickState {
    /// Waiting for the next tick
    Scheduled { due: Instant },
    /// Executing a tick
    Sampling,
    /// Stopped; no further ticks
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    state: TickState,
    completed: u64,
}

impl Ticker {
    /// Start a schedule whose first tick is due at `now`
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            state: TickState::Scheduled { due: now },
            completed: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> TickState {
        self.state
    }

    /// Number of ticks that ran to completion
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn next_due(&self) -> Option<Instant> {
        match self.state {
            TickState::Scheduled { due } => Some(due),
            TickState::Sampling | TickState::Cancelled => None,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due().is_some_and(|due| now >= due)
    }

    /// How long the owner may block before the next tick; `None` once cancelled
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due().map(|due| due.saturating_duration_since(now))
    }

    /// Run `tick` if it is due and schedule the next one
    ///
    /// The next tick is scheduled whatever `tick` returns. A loop that fell
    /// behind resumes one period after `now` instead of bursting.
    pub fn run_if_due<T>(&mut self, now: Instant, tick: impl FnOnce() -> T) -> Option<T> {
        let due = match self.state {
            TickState::Scheduled { due } if now >= due => due,
            _ => return None,
        };

        self.state = TickState::Sampling;
        let outcome = tick();
        self.completed += 1;

        let mut next = due + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.state = TickState::Scheduled { due: next };

        Some(outcome)
    }

    pub fn cancel(&mut self) {
        self.state = TickState::Cancelled;
    }
}

//! Per-transaction lifecycle tracking.
//!
//! # Responsibility
//! - Model `Idle -> Opened -> Pending* -> Committed | Aborted`.
//! - Emit one `tx_end` log event per transaction with its outcome.
//!
//! # Invariants
//! - `Committed` and `Aborted` are terminal.
//! - `Aborted` is reachable from every non-terminal state.
//! - `Committed` is reachable only once the transaction was opened.

use log::{debug, warn};
use std::time::Instant;

/// Lifecycle state of one logical transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Idle,
    Opened,
    /// One or more per-record requests (insert or cursor advance) issued.
    Pending,
    Committed,
    Aborted,
}

impl TxState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Aborted)
    }

    /// Whether `self -> next` is a legal lifecycle step.
    pub fn can_transition_to(self, next: TxState) -> bool {
        match (self, next) {
            (from, _) if from.is_terminal() => false,
            (_, Self::Aborted) => true,
            (Self::Idle, Self::Opened) => true,
            (Self::Opened | Self::Pending, Self::Pending) => true,
            (Self::Opened | Self::Pending, Self::Committed) => true,
            _ => false,
        }
    }

    fn as_log_value(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Opened => "opened",
            Self::Pending => "pending",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        }
    }
}

/// Access mode requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

impl TxMode {
    fn as_log_value(self) -> &'static str {
        match self {
            Self::ReadOnly => "readonly",
            Self::ReadWrite => "readwrite",
        }
    }
}

/// Tracks one transaction through its lifecycle.
#[derive(Debug)]
pub struct TxTracker {
    op: &'static str,
    mode: TxMode,
    state: TxState,
    requests: usize,
    started_at: Instant,
}

impl TxTracker {
    pub fn new(op: &'static str, mode: TxMode) -> Self {
        Self {
            op,
            mode,
            state: TxState::Idle,
            requests: 0,
            started_at: Instant::now(),
        }
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    /// Number of per-record requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    pub fn opened(&mut self) {
        self.step(TxState::Opened);
    }

    pub fn request(&mut self) {
        if self.step(TxState::Pending) {
            self.requests += 1;
        }
    }

    pub fn committed(&mut self) {
        if self.step(TxState::Committed) {
            debug!(
                "event=tx_end module=repo op={} mode={} state={} requests={} duration_ms={}",
                self.op,
                self.mode.as_log_value(),
                self.state.as_log_value(),
                self.requests,
                self.started_at.elapsed().as_millis()
            );
        }
    }

    pub fn aborted(&mut self) {
        if self.step(TxState::Aborted) {
            warn!(
                "event=tx_end module=repo op={} mode={} state={} requests={} duration_ms={}",
                self.op,
                self.mode.as_log_value(),
                self.state.as_log_value(),
                self.requests,
                self.started_at.elapsed().as_millis()
            );
        }
    }

    fn step(&mut self, next: TxState) -> bool {
        if !self.state.can_transition_to(next) {
            warn!(
                "event=tx_transition module=repo op={} status=rejected from={} to={}",
                self.op,
                self.state.as_log_value(),
                next.as_log_value()
            );
            return false;
        }
        self.state = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{TxMode, TxState, TxTracker};

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [TxState::Committed, TxState::Aborted] {
            for next in [
                TxState::Idle,
                TxState::Opened,
                TxState::Pending,
                TxState::Committed,
                TxState::Aborted,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn abort_is_reachable_from_every_live_state() {
        for from in [TxState::Idle, TxState::Opened, TxState::Pending] {
            assert!(from.can_transition_to(TxState::Aborted));
        }
    }

    #[test]
    fn commit_requires_an_opened_transaction() {
        assert!(!TxState::Idle.can_transition_to(TxState::Committed));
        assert!(TxState::Opened.can_transition_to(TxState::Committed));
        assert!(TxState::Pending.can_transition_to(TxState::Committed));
    }

    #[test]
    fn tracker_counts_requests_and_ignores_steps_after_commit() {
        let mut tracker = TxTracker::new("note_add_many", TxMode::ReadWrite);
        tracker.opened();
        tracker.request();
        tracker.request();
        tracker.committed();
        tracker.request();
        tracker.aborted();

        assert_eq!(tracker.state(), TxState::Committed);
        assert_eq!(tracker.requests(), 2);
    }
}

//! Client-visible reindex lifecycle.
//!
//! ```text
//!   idle ──request──▶ indexing ──succeeded──▶ completed ──(display window)──▶ idle
//!                        │                        │
//!                        └──failed──▶ error        └──request──▶ indexing
//!                                       │
//!                                       └──request──▶ indexing
//! ```
//!
//! The return from `completed` to `idle` is read off an injected [`Clock`]
//! instead of a timer, so it is observed the next time the status is read.

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingStatus {
    Idle,
    Indexing,
    Completed,
    Error,
}

impl fmt::Display for IndexingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Indexing => "indexing",
            Self::Completed => "completed",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexingEvent {
    /// The user asked for a reindex.
    Requested,
    /// The reindex call returned successfully.
    Succeeded,
    /// The reindex call failed.
    Failed,
}

/// Transition table. `None` means the event is not accepted in `from`.
pub fn transition(from: IndexingStatus, event: IndexingEvent) -> Option<IndexingStatus> {
    use IndexingEvent::*;
    use IndexingStatus::*;

    match (from, event) {
        (Idle | Completed | Error, Requested) => Some(Indexing),
        (Indexing, Succeeded) => Some(Completed),
        (Indexing, Failed) => Some(Error),
        _ => None,
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Why a reindex request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReindexBlocked {
    #[error("A reindex is already running")]
    AlreadyIndexing,
    #[error("No channels to reindex")]
    NoChannels,
}

pub struct IndexingMachine {
    status: IndexingStatus,
    completed_at: Option<Instant>,
    display_window: Duration,
    clock: Arc<dyn Clock>,
}

impl IndexingMachine {
    pub fn new(display_window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            status: IndexingStatus::Idle,
            completed_at: None,
            display_window,
            clock,
        }
    }

    /// Current status, with the `completed` display window applied.
    pub fn status(&self) -> IndexingStatus {
        match (self.status, self.completed_at) {
            (IndexingStatus::Completed, Some(at))
                if self.clock.now().saturating_duration_since(at) >= self.display_window =>
            {
                IndexingStatus::Idle
            }
            (status, _) => status,
        }
    }

    /// Whether a reindex may start with `channel_count` channels registered.
    pub fn check_reindex(&self, channel_count: usize) -> Result<(), ReindexBlocked> {
        if self.status() == IndexingStatus::Indexing {
            return Err(ReindexBlocked::AlreadyIndexing);
        }
        if channel_count == 0 {
            return Err(ReindexBlocked::NoChannels);
        }
        Ok(())
    }

    /// Feed an event through the transition table. Returns the new status,
    /// or `None` if the event was ignored.
    pub fn dispatch(&mut self, event: IndexingEvent) -> Option<IndexingStatus> {
        let from = self.status();
        let Some(to) = transition(from, event) else {
            tracing::debug!("Ignoring reindex event {event:?} while {from}");
            return None;
        };

        self.status = to;
        self.completed_at = (to == IndexingStatus::Completed).then(|| self.clock.now());
        tracing::debug!("Reindex status {from} -> {to}");
        Some(to)
    }
}

impl fmt::Debug for IndexingMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexingMachine")
            .field("status", &self.status())
            .field("display_window", &self.display_window)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> (IndexingMachine, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let m = IndexingMachine::new(Duration::from_secs(3), clock.clone());
        (m, clock)
    }

    #[test]
    fn test_success_path_returns_to_idle_after_window() {
        let (mut m, clock) = machine();
        assert_eq!(m.status(), IndexingStatus::Idle);

        assert_eq!(m.dispatch(IndexingEvent::Requested), Some(IndexingStatus::Indexing));
        assert_eq!(m.dispatch(IndexingEvent::Succeeded), Some(IndexingStatus::Completed));

        clock.advance(Duration::from_millis(2_999));
        assert_eq!(m.status(), IndexingStatus::Completed);

        clock.advance(Duration::from_millis(1));
        assert_eq!(m.status(), IndexingStatus::Idle);
    }

    #[test]
    fn test_error_never_auto_resets() {
        let (mut m, clock) = machine();
        m.dispatch(IndexingEvent::Requested);
        assert_eq!(m.dispatch(IndexingEvent::Failed), Some(IndexingStatus::Error));

        clock.advance(Duration::from_secs(3_600));
        assert_eq!(m.status(), IndexingStatus::Error);

        assert_eq!(m.dispatch(IndexingEvent::Requested), Some(IndexingStatus::Indexing));
    }

    #[test]
    fn test_request_refused_while_indexing() {
        let (mut m, _) = machine();
        m.dispatch(IndexingEvent::Requested);
        assert_eq!(m.check_reindex(3), Err(ReindexBlocked::AlreadyIndexing));
        assert_eq!(m.dispatch(IndexingEvent::Requested), None);
        assert_eq!(m.status(), IndexingStatus::Indexing);
    }

    #[test]
    fn test_request_refused_without_channels() {
        let (m, _) = machine();
        assert_eq!(m.check_reindex(0), Err(ReindexBlocked::NoChannels));
        assert_eq!(m.check_reindex(1), Ok(()));
    }

    #[test]
    fn test_stray_responses_are_ignored() {
        let (mut m, _) = machine();
        assert_eq!(m.dispatch(IndexingEvent::Succeeded), None);
        assert_eq!(m.dispatch(IndexingEvent::Failed), None);
        assert_eq!(m.status(), IndexingStatus::Idle);
    }

    #[test]
    fn test_new_request_from_completed_restarts() {
        let (mut m, clock) = machine();
        m.dispatch(IndexingEvent::Requested);
        m.dispatch(IndexingEvent::Succeeded);
        assert_eq!(m.dispatch(IndexingEvent::Requested), Some(IndexingStatus::Indexing));

        // the old completion timestamp must not leak into the new run
        clock.advance(Duration::from_secs(10));
        assert_eq!(m.status(), IndexingStatus::Indexing);
    }

    #[test]
    fn test_transition_table() {
        use IndexingEvent::*;
        use IndexingStatus::*;
        assert_eq!(transition(Idle, Requested), Some(Indexing));
        assert_eq!(transition(Indexing, Requested), None);
        assert_eq!(transition(Completed, Succeeded), None);
        assert_eq!(transition(Error, Failed), None);
    }
}

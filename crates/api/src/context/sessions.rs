//! Per-session selection state.
//!
//! Each browser session owns one [`SelectionState`]. Sessions never see each
//! other's selection; they only share the read-only snapshot. Sessions that
//! go unused for the configured idle time are dropped, and the store never
//! holds more than its configured capacity.

use std::time::Duration;

use moka::ops::compute::{CompResult, Op};
use moka::sync::Cache;
use sectorgrid_domain::constants::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_SECONDS};
use sectorgrid_domain::{Result, SectorGridError, SelectionEvent, SelectionState, ServerConfig};
use tracing::debug;
use uuid::Uuid;

/// Bounded, idle-expiring map of session id to selection.
#[derive(Debug)]
pub struct SessionStore {
    selections: Cache<Uuid, SelectionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(Duration::from_secs(DEFAULT_SESSION_IDLE_SECONDS), DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::with_limits(Duration::from_secs(config.session_idle_seconds), config.max_sessions)
    }

    /// Store whose sessions expire after `idle` without a read or write.
    pub fn with_limits(idle: Duration, max_sessions: u64) -> Self {
        let selections = Cache::builder().max_capacity(max_sessions).time_to_idle(idle).build();
        Self { selections }
    }

    /// Open a session with nothing selected.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.selections.insert(id, SelectionState::Unselected);
        debug!(session = %id, "session created");
        id
    }

    /// Current selection of a session.
    ///
    /// # Errors
    /// Returns `SectorGridError::NotFound` for an unknown or expired session.
    pub fn get(&self, id: Uuid) -> Result<SelectionState> {
        self.selections.get(&id).ok_or_else(|| unknown(id))
    }

    /// Apply an interaction event and return the new selection.
    ///
    /// # Errors
    /// Returns `SectorGridError::NotFound` for an unknown or expired session.
    pub fn apply(&self, id: Uuid, event: SelectionEvent) -> Result<SelectionState> {
        let result = self.selections.entry(id).and_compute_with(|current| match current {
            Some(entry) => Op::Put(entry.into_value().apply(event)),
            None => Op::Nop,
        });

        match result {
            CompResult::ReplacedWith(entry) => {
                let next = entry.into_value();
                debug!(session = %id, selected = next.is_selected(), "selection updated");
                Ok(next)
            }
            _ => Err(unknown(id)),
        }
    }

    /// Current selection, creating the session if it does not exist yet.
    pub fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SelectionState) {
        match id {
            Some(id) => (id, self.selections.get_with(id, SelectionState::default)),
            None => (self.create(), SelectionState::Unselected),
        }
    }

    /// Forget a session. Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.selections.remove(&id).is_some()
    }

    /// Live sessions, after pending expirations are processed.
    pub fn len(&self) -> usize {
        self.selections.run_pending_tasks();
        usize::try_from(self.selections.entry_count()).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn unknown(id: Uuid) -> SectorGridError {
    SectorGridError::NotFound(format!("session {id}"))
}

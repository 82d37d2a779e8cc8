//! Staleness guard.
//!
//! Route fetches complete in any order. The guard decides, for each
//! completion, whether its result may still touch the overlay: only the
//! most recently issued request can commit, and only while the inputs that
//! produced it are still current. Nothing here cancels network work; it
//! only discards effects.

use tracing::warn;

use crate::domain::SequenceId;

/// What to do with a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The result belongs to the newest relevant request.
    Commit,
    /// A newer request was issued, or the inputs were cleared, or this
    /// request already resolved. Not an error.
    Superseded,
}

/// Tracks issued and committed sequence ids.
#[derive(Debug, Default)]
pub struct StalenessGuard {
    last_issued: Option<SequenceId>,
    last_committed: Option<SequenceId>,
    /// The newest request while it is still awaiting a relevant result.
    pending: Option<SequenceId>,
}

impl StalenessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next sequence id. Any older pending request becomes
    /// superseded.
    pub fn issue(&mut self) -> SequenceId {
        let next = SequenceId(self.last_issued.map_or(1, |id| id.0 + 1));
        self.last_issued = Some(next);
        self.pending = Some(next);
        next
    }

    /// Drop interest in the pending request, e.g. because a waypoint was
    /// cleared. Returns the retired id, if any.
    pub fn retire(&mut self) -> Option<SequenceId> {
        self.pending.take()
    }

    /// Judge a completed fetch. A request is committed at most once.
    pub fn resolve(&mut self, id: SequenceId) -> Verdict {
        if self.last_issued.is_none_or(|last| id > last) {
            warn!(seq = %id, "resolution for a request that was never issued");
            return Verdict::Superseded;
        }
        if self.pending == Some(id) {
            self.pending = None;
            Verdict::Commit
        } else {
            Verdict::Superseded
        }
    }

    /// Record that a successful result for `id` is now displayed.
    pub fn record_commit(&mut self, id: SequenceId) {
        self.last_committed = Some(id);
    }

    pub fn last_issued(&self) -> Option<SequenceId> {
        self.last_issued
    }

    pub fn last_committed(&self) -> Option<SequenceId> {
        self.last_committed
    }

    /// The request whose result is still awaited, if any.
    pub fn pending(&self) -> Option<SequenceId> {
        self.pending
    }
}

//! In-memory retry queue
//!
//! Plain ordered storage for [`LogEntry`] values. It carries no locking of its
//! own: the dispatcher keeps it behind a mutex together with the decision to
//! stop the drain worker.

use super::log_entry::{DeliveryStatus, LogEntry};
use super::retry_policy::RetryPolicy;

#[derive(Debug, Default)]
pub struct EntryQueue {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl EntryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, assigning it the next sequence id.
    pub fn push(&mut self, mut entry: LogEntry) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        entry.id = id;
        self.entries.push(entry);
        id
    }

    /// Claim the first pending entry, in insertion order, that the policy
    /// still allows to be attempted this session.
    ///
    /// The entry's attempt counters are bumped before a copy is handed out, so
    /// the caller can perform the network call without holding any lock.
    pub fn claim_next(&mut self, policy: &RetryPolicy) -> Option<LogEntry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.is_pending() && policy.allows_attempt(e.session_attempts))?;
        entry.session_attempts = entry.session_attempts.saturating_add(1);
        entry.total_attempts = entry.total_attempts.saturating_add(1);
        Some(entry.clone())
    }

    /// Mark an entry delivered. Returns `false` if no such entry is queued.
    pub fn mark_delivered(&mut self, id: u64) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.status = DeliveryStatus::Delivered;
                true
            }
            None => false,
        }
    }

    /// Drop every delivered entry, keeping the rest in order.
    ///
    /// Returns the number of entries removed; a second call in a row
    /// always returns 0.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_delivered());
        before - self.entries.len()
    }

    /// Give every remaining entry a fresh per-session attempt budget.
    pub fn reset_session(&mut self) {
        for entry in &mut self.entries {
            entry.session_attempts = 0;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

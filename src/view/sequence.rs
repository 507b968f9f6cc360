//! Request Sequencing
//!
//! Each list screen owns one sequencer. A fetch takes a ticket before it
//! starts; its response may only be applied while that ticket is still the
//! latest one issued and the screen has not been torn down.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed out for one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket counter with cancellation
#[derive(Debug, Default)]
pub struct RequestSequencer {
    /// Last ticket issued
    latest: AtomicU64,
    /// Tickets at or below this value are dead
    floor: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a response carrying `ticket` may still be applied
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest.load(Ordering::SeqCst) && ticket.0 > self.floor.load(Ordering::SeqCst)
    }

    /// Invalidate every outstanding ticket (screen teardown)
    pub fn cancel(&self) {
        let latest = self.latest.load(Ordering::SeqCst);
        self.floor.fetch_max(latest, Ordering::SeqCst);
    }

    /// True once [`cancel`](Self::cancel) has run and no ticket was issued since
    pub fn is_cancelled(&self) -> bool {
        self.floor.load(Ordering::SeqCst) >= self.latest.load(Ordering::SeqCst)
            && self.latest.load(Ordering::SeqCst) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let seq = RequestSequencer::new();
        let first = seq.begin();
        assert!(seq.is_current(first));

        let second = seq.begin();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_outstanding() {
        let seq = RequestSequencer::new();
        let ticket = seq.begin();
        seq.cancel();

        assert!(!seq.is_current(ticket));
        assert!(seq.is_cancelled());
    }

    #[test]
    fn test_fresh_sequencer_not_cancelled() {
        let seq = RequestSequencer::new();
        assert!(!seq.is_cancelled());
        seq.cancel();
        assert!(!seq.is_cancelled());
    }
}

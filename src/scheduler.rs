use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::session::SettleTicket;

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Instant,
    ticket: SettleTicket,
}

/// Deferred settle steps waiting for their transition delay to elapse.
///
/// Entries are not cancelled on reset: a ticket from an older generation is
/// rejected by `Session::settle` when it comes due.
#[derive(Debug)]
pub struct SettleQueue {
    delay: Duration,
    scheduled: VecDeque<Scheduled>,
}

impl SettleQueue {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduled: VecDeque::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, ticket: SettleTicket, now: Instant) {
        let due = now + self.delay;
        // Keep sorted by deadline, FIFO among equal deadlines
        let idx = self.scheduled.partition_point(|s| s.due <= due);
        self.scheduled.insert(idx, Scheduled { due, ticket });
    }

    /// Remove and return every ticket whose deadline is at or before `now`
    pub fn drain_due(&mut self, now: Instant) -> Vec<SettleTicket> {
        let ready = self.scheduled.partition_point(|s| s.due <= now);
        self.scheduled.drain(..ready).map(|s| s.ticket).collect()
    }

    /// Earliest pending deadline, used to bound the event loop's wait
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.front().map(|s| s.due)
    }

    /// When the transition for `ticket` was started, if it is still queued
    pub fn started_at(&self, ticket: SettleTicket) -> Option<Instant> {
        self.scheduled
            .iter()
            .find(|s| s.ticket == ticket)
            .map(|s| s.due - self.delay)
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }
}

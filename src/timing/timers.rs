//! Virtual-time timer queue.
//!
//! Time is a `Duration` since page load, supplied by the host. Timers that
//! share a deadline fire in scheduling order.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Pending one-shot timers carrying a task payload.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_seq: u64,
    entries: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `at`.
    pub fn schedule(&mut self, at: Duration, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((at, seq), task);
        self.deadlines.insert(seq, at);
        TimerId(seq)
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(at) => self.entries.remove(&(at, id.0)).is_some(),
            None => false,
        }
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }

    /// Whether `id` is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: Duration) -> Vec<T> {
        let later = self.entries.split_off(&(now, u64::MAX));
        let due = std::mem::replace(&mut self.entries, later);
        due.into_iter()
            .map(|((_, seq), task)| {
                self.deadlines.remove(&seq);
                task
            })
            .collect()
    }

    /// Remove and return the earliest task due at or before `now`.
    ///
    /// Lets a caller run tasks one at a time so that a task may cancel or
    /// reschedule the ones behind it.
    pub fn pop_next_due(&mut self, now: Duration) -> Option<T> {
        let (&(at, seq), _) = self.entries.first_key_value()?;
        if at > now {
            return None;
        }
        self.deadlines.remove(&seq);
        self.entries.remove(&(at, seq))
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

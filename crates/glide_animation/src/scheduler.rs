//! Timer scheduler
//!
//! One-shot timers keyed by [`TimerId`]. Timers are never fired implicitly:
//! the owner polls [`TimerScheduler::pop_due`] with the current time and
//! handles each expired timer in deadline order. Timers with equal deadlines
//! fire in scheduling order.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

struct Timer<T> {
    deadline: Duration,
    seq: u64,
    payload: T,
}

/// Cancellable one-shot timers carrying a payload
pub struct TimerScheduler<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    next_seq: u64,
}

impl<T> Default for TimerScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for TimerScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerScheduler")
            .field("pending", &self.timers.len())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

impl<T> TimerScheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedule `payload` to fire at `deadline`
    pub fn schedule(&mut self, deadline: Duration, payload: T) -> TimerId {
        let seq = self.bump_seq();
        let id = self.timers.insert(Timer {
            deadline,
            seq,
            payload,
        });
        trace!(?id, ?deadline, "timer scheduled");
        id
    }

    /// Cancel a timer, returning its payload if it was still pending
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|timer| timer.payload)
    }

    /// Move a pending timer to a new deadline
    ///
    /// The timer is ordered as if it had just been scheduled. Returns false
    /// when the timer already fired or was cancelled.
    pub fn reschedule(&mut self, id: TimerId, deadline: Duration) -> bool {
        let seq = self.bump_seq();
        match self.timers.get_mut(id) {
            Some(timer) => {
                timer.deadline = deadline;
                timer.seq = seq;
                true
            }
            None => false,
        }
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerId, Duration, T)> {
        let id = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.seq))
            .map(|(id, _)| id)?;
        let timer = self.timers.remove(id)?;
        Some((id, timer.deadline, timer.payload))
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True when nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

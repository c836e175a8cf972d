//! Single-shot timers driven by the host's event loop.
//!
//! Nothing here spawns threads: the host polls [`TimerQueue::expired`] (through
//! the preview controller) whenever it wakes up, and can use
//! [`TimerQueue::next_deadline`] to schedule its next wake-up.

use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Identity of an armed timer. Ids are never reused by a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug)]
struct Armed {
    id: TimerId,
    deadline: Instant,
}

/// Pending single-shot timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    armed: Vec<Armed>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer firing `delay` after `now`.
    pub fn start(&mut self, now: Instant, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.armed.push(Armed {
            id,
            deadline: now + delay,
        });
        id
    }

    /// Disarm a timer. Returns false if it already fired or was killed.
    pub fn kill(&mut self, id: TimerId) -> bool {
        let before = self.armed.len();
        self.armed.retain(|t| t.id != id);
        self.armed.len() != before
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.armed.iter().any(|t| t.id == id)
    }

    /// Number of timers still armed.
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Remove and return the timers whose deadline is at or before `now`,
    /// earliest first.
    pub fn expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired: Vec<Armed> = Vec::new();
        self.armed.retain(|t| {
            if t.deadline <= now {
                fired.push(*t);
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|t| (t.deadline, t.id));
        fired.into_iter().map(|t| t.id).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.iter().map(|t| t.deadline).min()
    }
}

//! Manually driven virtual clock
//!
//! [`ManualScheduler`] never consults wall-clock time. Timers fire only when
//! [`ManualScheduler::advance`] moves the clock past their deadline, which
//! makes debouncing behavior reproducible in tests.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::scheduler::{Scheduler, Task};

/// Handle to a timer registered with a [`ManualScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    due: Duration,
    seq: u64,
}

impl TimerId {
    /// Virtual time at which the timer fires
    pub fn due(&self) -> Duration {
        self.due
    }
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<TimerId, Task>,
}

/// Virtual clock scheduler
///
/// Clones share one timeline. Timers with equal deadlines fire in the order
/// they were scheduled.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Arc<Mutex<Timeline>>,
}

impl ManualScheduler {
    /// Create a scheduler with its clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.timeline.lock().now
    }

    /// Number of timers waiting to fire
    pub fn pending(&self) -> usize {
        self.timeline.lock().queue.len()
    }

    /// Move the clock forward, firing every timer that comes due
    ///
    /// Timers scheduled by a firing task also fire if their deadline falls
    /// within the window. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            // Tasks run without the lock held so they may schedule more work.
            let next = {
                let mut timeline = self.timeline.lock();
                match timeline.queue.first_entry() {
                    Some(entry) if entry.key().due <= target => {
                        let (id, task) = entry.remove_entry();
                        timeline.now = id.due;
                        Some(task)
                    }
                    _ => {
                        timeline.now = target;
                        None
                    }
                }
            };

            let Some(task) = next else { break };
            task();
            fired += 1;
        }

        fired
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let timeline = self.timeline.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &timeline.now)
            .field("pending", &timeline.queue.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut timeline = self.timeline.lock();
        let id = TimerId {
            due: timeline.now + delay,
            seq: timeline.next_seq,
        };
        timeline.next_seq += 1;
        timeline.queue.insert(id, task);
        id
    }

    fn cancel(&self, handle: TimerId) {
        self.timeline.lock().queue.remove(&handle);
    }
}

//! Host timer abstraction
//!
//! A debouncer only needs two things from its host: run a task after a delay,
//! and cancel a task that has not run yet.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::error::{DebounceError, Result};

/// A unit of deferred work
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Schedule-after-delay / cancel-scheduled timer primitive
pub trait Scheduler: Send + Sync + 'static {
    /// Handle identifying one scheduled task
    type Handle: Send + 'static;

    /// Run `task` once `delay` has elapsed, measured from now
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Prevent a scheduled task from running
    ///
    /// Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Timer backed by a tokio runtime
///
/// Each scheduled task is a spawned future that sleeps until its deadline;
/// cancelling aborts the future.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Use the runtime the calling thread is running inside
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| DebounceError::NoRuntime)
    }

    /// Use an explicit runtime handle
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle {
        // Fix the deadline now rather than on the spawned task's first poll.
        let deadline = Instant::now() + delay;
        self.runtime.spawn(async move {
            sleep_until(deadline).await;
            task();
        })
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}

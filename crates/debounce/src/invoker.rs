//! Trailing-edge debounced callable
//!
//! Every call cancels the pending delivery (if any) and schedules a new one.
//! The callback therefore runs once per quiet period, with the arguments of
//! the last call in the burst.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

use crate::scheduler::{Scheduler, TokioScheduler};

/// Pending-call state of one debouncer
enum State<H> {
    Idle,
    Pending { generation: u64, handle: H },
}

/// Two-state machine holding at most one scheduled call
///
/// Invoking is split into [`take_pending`](Self::take_pending) (cancel step)
/// and [`arm`](Self::arm) (schedule step). A timer that fires reports its
/// generation to [`fire`](Self::fire); only the current generation delivers.
pub(crate) struct PendingSlot<H> {
    state: State<H>,
    generation: u64,
}

impl<H> PendingSlot<H> {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Idle,
            generation: 0,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    /// Move to idle, handing back the handle of the call being displaced
    pub(crate) fn take_pending(&mut self) -> Option<H> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => None,
            State::Pending { handle, .. } => Some(handle),
        }
    }

    /// Reserve the generation for the next scheduled call
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn arm(&mut self, generation: u64, handle: H) {
        debug_assert!(!self.is_pending(), "previous call must be taken first");
        self.state = State::Pending { generation, handle };
    }

    /// Timer for `generation` expired; returns whether it should deliver
    pub(crate) fn fire(&mut self, generation: u64) -> bool {
        match self.state {
            State::Pending { generation: current, .. } if current == generation => {
                self.state = State::Idle;
                true
            }
            _ => false,
        }
    }
}

/// Snapshot of a debouncer's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceStats {
    /// Calls made to the debounced callable
    pub invocations: u64,
    /// Scheduled deliveries superseded by a later call
    pub cancelled: u64,
    /// Deliveries that reached the callback
    pub fired: u64,
}

#[derive(Default)]
struct Counters {
    invocations: AtomicU64,
    cancelled: AtomicU64,
    fired: AtomicU64,
}

struct Inner<A, S: Scheduler> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    scheduler: S,
    slot: Mutex<PendingSlot<S::Handle>>,
    counters: Counters,
}

impl<A, S: Scheduler> Inner<A, S> {
    fn deliver(&self, generation: u64, args: A) {
        if !self.slot.lock().fire(generation) {
            trace!("Skipping superseded debounced call (generation {})", generation);
            return;
        }

        self.counters.fired.fetch_add(1, Ordering::Relaxed);
        debug!("Delivering debounced call (generation {})", generation);
        // Lock released: the callback may call back into this debouncer.
        (self.callback)(args);
    }
}

/// A callable that delays its callback until calls stop for `delay`
///
/// Clones share the same pending call. Dropping every clone does not cancel a
/// call that is already scheduled.
pub struct Debounced<A, S: Scheduler = TokioScheduler> {
    inner: Arc<Inner<A, S>>,
}

impl<A, S: Scheduler> Clone for Debounced<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, S> Debounced<A, S>
where
    A: Send + 'static,
    S: Scheduler,
{
    /// Wrap `callback` using an explicit timer
    ///
    /// Whatever `callback` returns is dropped after each delivery.
    pub fn new<F, R>(callback: F, delay: Duration, scheduler: S) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
        R: 'static,
    {
        Self {
            inner: Arc::new(Inner {
                callback: Box::new(move |args| {
                    callback(args);
                }),
                delay,
                scheduler,
                slot: Mutex::new(PendingSlot::new()),
                counters: Counters::default(),
            }),
        }
    }

    /// Request a delivery of `args`, superseding any pending one
    ///
    /// Returns immediately. The callback runs `delay` after the most recent
    /// call, with that call's arguments.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        inner.counters.invocations.fetch_add(1, Ordering::Relaxed);

        let mut slot = inner.slot.lock();
        if let Some(handle) = slot.take_pending() {
            inner.scheduler.cancel(handle);
            inner.counters.cancelled.fetch_add(1, Ordering::Relaxed);
            trace!("Cancelled pending debounced call");
        }

        let generation = slot.next_generation();
        let target = Arc::clone(inner);
        let handle = inner.scheduler.schedule(
            inner.delay,
            Box::new(move || target.deliver(generation, args)),
        );
        slot.arm(generation, handle);

        debug!(
            "Scheduled debounced call (generation {}, delay: {:?})",
            generation, inner.delay
        );
    }

    /// Convert into a plain closure with the same behavior as [`call`](Self::call)
    pub fn into_fn(self) -> impl Fn(A) + Clone + Send + Sync + 'static {
        move |args| self.call(args)
    }
}

impl<A, S: Scheduler> Debounced<A, S> {
    /// Configured quiet period
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Whether a delivery is scheduled and not yet fired
    pub fn is_pending(&self) -> bool {
        self.inner.slot.lock().is_pending()
    }

    /// Snapshot of the call counters
    pub fn stats(&self) -> DebounceStats {
        let counters = &self.inner.counters;
        DebounceStats {
            invocations: counters.invocations.load(Ordering::Relaxed),
            cancelled: counters.cancelled.load(Ordering::Relaxed),
            fired: counters.fired.load(Ordering::Relaxed),
        }
    }
}

impl<A, S: Scheduler> std::fmt::Debug for Debounced<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.inner.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

use crossbeam_utils::Backoff;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, Thread};
use std::time::Instant;

/// A mechanism for thread synchronization and notification.
///
/// A `Signal` is bound to the thread that created it. Channels release a
/// registered signal whenever their state changes in a way that could make a
/// parked selector runnable. The signal is sticky: once notified it stays
/// notified until [`reset`](Signal::reset).
pub struct Signal {
    state: AtomicUsize,
    thread: Thread,
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}

impl Signal {
    /// Creates a new signal for the current thread.
    pub fn new() -> Self {
        Self {
            state: AtomicUsize::new(0),
            thread: thread::current(),
        }
    }

    /// Waits for the signal to be notified.
    pub fn wait(&self) {
        let backoff = Backoff::new();
        while self.state.load(Ordering::Acquire) == 0 {
            if backoff.is_completed() {
                thread::park();
            } else {
                backoff.snooze();
            }
        }
    }

    /// Waits for the signal until `deadline`.
    ///
    /// Returns true if the signal was notified, false if the deadline passed
    /// first.
    pub fn wait_deadline(&self, deadline: Instant) -> bool {
        let backoff = Backoff::new();
        loop {
            if self.state.load(Ordering::Acquire) != 0 {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            if backoff.is_completed() {
                thread::park_timeout(deadline - now);
            } else {
                backoff.snooze();
            }
        }
    }

    /// Notifies the signal, waking up the waiting thread.
    pub fn notify(&self) {
        self.state.store(1, Ordering::Release);
        self.thread.unpark();
    }

    /// Returns true if the signal has been notified.
    pub fn is_notified(&self) -> bool {
        self.state.load(Ordering::Relaxed) != 0
    }

    /// Clears a previous notification so the signal can be waited on again.
    pub fn reset(&self) {
        self.state.store(0, Ordering::Release);
    }
}

/// An ordered set of signals registered by selectors parked on a channel.
///
/// Lives inside the channel's mutex-guarded state, so the channel lock
/// serializes every mutation.
pub(crate) struct WaiterQueue {
    waiters: Vec<Arc<Signal>>,
}

impl WaiterQueue {
    pub(crate) fn new() -> Self {
        Self {
            waiters: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, signal: Arc<Signal>) {
        self.waiters.push(signal);
    }

    pub(crate) fn unregister(&mut self, signal: &Arc<Signal>) {
        self.waiters.retain(|waiter| !Arc::ptr_eq(waiter, signal));
    }

    /// Releases every registered signal. Registrations stay in place; the
    /// owning selector removes them itself.
    pub(crate) fn notify_all(&self) {
        for waiter in &self.waiters {
            waiter.notify();
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }
}

pub mod after;
pub mod bounded;
pub mod never;
pub mod tick;
pub mod zero;

use std::sync::{Condvar, MutexGuard};
use std::time::Instant;

/// Outcome of a non-blocking receive attempt.
pub(crate) enum RecvPoll<T> {
    /// A message was taken.
    Msg(T),
    /// No message is available right now.
    Empty,
    /// The channel is closed and drained; no message will ever arrive.
    Closed,
}

/// Outcome of a non-blocking send attempt.
pub(crate) enum SendPoll<T> {
    /// The message was accepted.
    Sent,
    /// No capacity right now; the message is handed back.
    Full(T),
    /// The channel is closed; the message is handed back.
    Closed(T),
}

/// Waits on `condvar` until woken or until `deadline` passes.
///
/// `deadline == None` waits indefinitely. Returns the reacquired guard and
/// false iff the deadline had already passed, in which case the condvar was
/// not waited on at all, so the caller's last predicate check still holds.
pub(crate) fn timed_wait<'a, S>(
    condvar: &Condvar,
    guard: MutexGuard<'a, S>,
    deadline: Option<Instant>,
) -> (MutexGuard<'a, S>, bool) {
    match deadline {
        None => (condvar.wait(guard).unwrap(), true),
        Some(deadline) => {
            let now = Instant::now();
            if now >= deadline {
                return (guard, false);
            }
            let (guard, _) = condvar.wait_timeout(guard, deadline - now).unwrap();
            (guard, true)
        }
    }
}

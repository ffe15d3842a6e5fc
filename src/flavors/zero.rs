use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::error::{RecvError, SendError, SendTimeoutError};
use crate::flavors::{timed_wait, RecvPoll, SendPoll};
use crate::signal::{Signal, WaiterQueue};

struct Inner<T> {
    /// At most one value in flight between a sender and a receiver.
    slot: Option<T>,
    /// Ticket of the value currently in the slot. A sender compares it to
    /// tell whether its own handover is still pending.
    ticket: u64,
    next_ticket: u64,
    closed: bool,
    readers: usize,
    writers: usize,
    read_waiters: WaiterQueue,
    write_waiters: WaiterQueue,
}

impl<T> Inner<T> {
    /// A send can complete right now: the slot is free and some receiving
    /// party is committed to taking the value.
    fn receiver_ready(&self) -> bool {
        self.readers > 0 || !self.read_waiters.is_empty()
    }

    fn place(&mut self, msg: T) -> u64 {
        self.next_ticket += 1;
        self.ticket = self.next_ticket;
        self.slot = Some(msg);
        self.ticket
    }

    /// Takes the slot value back iff it still belongs to `ticket`.
    fn reclaim(&mut self, ticket: u64) -> Option<T> {
        if self.ticket == ticket {
            self.slot.take()
        } else {
            None
        }
    }
}

/// A rendezvous channel: no buffer, senders and receivers pair up directly.
pub(crate) struct Channel<T> {
    inner: Mutex<Inner<T>>,
    /// Receivers re-examine the slot.
    not_empty: Condvar,
    /// Senders, and a close draining an in-flight value, re-examine.
    not_full: Condvar,
}

impl<T> Channel<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                slot: None,
                ticket: 0,
                next_ticket: 0,
                closed: false,
                readers: 0,
                writers: 0,
                read_waiters: WaiterQueue::new(),
                write_waiters: WaiterQueue::new(),
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    fn notify_readers(&self, inner: &mut Inner<T>) {
        if inner.readers > 0 {
            self.not_empty.notify_all();
        }
        inner.read_waiters.notify_all();
    }

    fn notify_writers(&self, inner: &mut Inner<T>) {
        if inner.writers > 0 {
            self.not_full.notify_all();
        }
        inner.write_waiters.notify_all();
    }

    pub(crate) fn send(&self, msg: T) -> Result<(), SendError<T>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return Err(SendError(msg));
        }
        inner.writers += 1;
        while inner.slot.is_some() && !inner.closed {
            inner = self.not_full.wait(inner).unwrap();
        }
        if inner.closed {
            inner.writers -= 1;
            return Err(SendError(msg));
        }
        let ticket = inner.place(msg);
        self.notify_readers(&mut inner);
        // Wait for a receiver to take the value. Closure hands the wait over
        // to `close`, which blocks until the slot is drained.
        while inner.slot.is_some() && inner.ticket == ticket && !inner.closed {
            inner = self.not_full.wait(inner).unwrap();
        }
        self.not_full.notify_all();
        inner.writers -= 1;
        Ok(())
    }

    pub(crate) fn send_timeout(&self, msg: T, timeout: Duration) -> Result<(), SendTimeoutError<T>> {
        if timeout.is_zero() {
            return match self.try_send(msg) {
                SendPoll::Sent => Ok(()),
                SendPoll::Full(msg) => Err(SendTimeoutError::Timeout(msg)),
                SendPoll::Closed(msg) => Err(SendTimeoutError::Closed(msg)),
            };
        }
        let deadline = Instant::now().checked_add(timeout);
        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return Err(SendTimeoutError::Closed(msg));
        }
        inner.writers += 1;
        while inner.slot.is_some() && !inner.closed {
            let (guard, waited) = timed_wait(&self.not_full, inner, deadline);
            inner = guard;
            if !waited {
                inner.writers -= 1;
                return Err(SendTimeoutError::Timeout(msg));
            }
        }
        if inner.closed {
            inner.writers -= 1;
            return Err(SendTimeoutError::Closed(msg));
        }
        let ticket = inner.place(msg);
        self.notify_readers(&mut inner);
        loop {
            if inner.slot.is_none() || inner.ticket != ticket {
                break;
            }
            if inner.closed {
                // The value was never taken; reclaim it rather than report a
                // delivery that did not happen.
                let reclaimed = inner.reclaim(ticket);
                if reclaimed.is_some() {
                    self.notify_writers(&mut inner);
                }
                inner.writers -= 1;
                return match reclaimed {
                    Some(msg) => Err(SendTimeoutError::Closed(msg)),
                    None => Ok(()),
                };
            }
            let (guard, waited) = timed_wait(&self.not_full, inner, deadline);
            inner = guard;
            if !waited {
                if let Some(msg) = inner.reclaim(ticket) {
                    self.notify_writers(&mut inner);
                    inner.writers -= 1;
                    return Err(SendTimeoutError::Timeout(msg));
                }
                // Taken right at the deadline.
                break;
            }
        }
        inner.writers -= 1;
        Ok(())
    }

    pub(crate) fn try_send(&self, msg: T) -> SendPoll<T> {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return SendPoll::Closed(msg);
        }
        if inner.slot.is_some() || !inner.receiver_ready() {
            return SendPoll::Full(msg);
        }
        inner.place(msg);
        self.notify_readers(&mut inner);
        SendPoll::Sent
    }

    pub(crate) fn recv(&self) -> Result<T, RecvError> {
        let mut inner = self.inner.lock().unwrap();
        inner.readers += 1;
        if !inner.closed && inner.slot.is_none() {
            // A receiver is now committed: capacity appeared.
            self.notify_writers(&mut inner);
        }
        while !inner.closed && inner.slot.is_none() {
            inner = self.not_empty.wait(inner).unwrap();
        }
        match inner.slot.take() {
            Some(msg) => {
                self.notify_writers(&mut inner);
                inner.readers -= 1;
                Ok(msg)
            }
            None => {
                inner.readers -= 1;
                Err(RecvError)
            }
        }
    }

    pub(crate) fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        if timeout.is_zero() {
            return match self.try_recv() {
                RecvPoll::Msg(msg) => Some(msg),
                _ => None,
            };
        }
        let deadline = Instant::now().checked_add(timeout);
        let mut inner = self.inner.lock().unwrap();
        inner.readers += 1;
        if !inner.closed && inner.slot.is_none() {
            self.notify_writers(&mut inner);
        }
        loop {
            if let Some(msg) = inner.slot.take() {
                self.notify_writers(&mut inner);
                inner.readers -= 1;
                return Some(msg);
            }
            if inner.closed {
                inner.readers -= 1;
                return None;
            }
            let (guard, waited) = timed_wait(&self.not_empty, inner, deadline);
            inner = guard;
            if !waited {
                inner.readers -= 1;
                return None;
            }
        }
    }

    pub(crate) fn try_recv(&self) -> RecvPoll<T> {
        let mut inner = self.inner.lock().unwrap();
        match inner.slot.take() {
            Some(msg) => {
                self.notify_writers(&mut inner);
                RecvPoll::Msg(msg)
            }
            None if inner.closed => RecvPoll::Closed,
            None => RecvPoll::Empty,
        }
    }

    pub(crate) fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return;
        }
        inner.closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
        inner.read_waiters.notify_all();
        inner.write_waiters.notify_all();
        // An in-flight handover must complete before close returns.
        inner.writers += 1;
        while inner.slot.is_some() {
            inner = self.not_full.wait(inner).unwrap();
        }
        inner.writers -= 1;
    }

    pub(crate) fn is_closed(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.closed && inner.slot.is_none()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().slot.is_none()
    }

    pub(crate) fn is_full(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.slot.is_some() || !inner.receiver_ready()
    }

    pub(crate) fn len(&self) -> usize {
        usize::from(self.inner.lock().unwrap().slot.is_some())
    }

    pub(crate) fn capacity(&self) -> usize {
        0
    }

    pub(crate) fn register_read_waiter(&self, signal: &Arc<Signal>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed || inner.slot.is_some() {
            return true;
        }
        inner.read_waiters.register(signal.clone());
        // A registered receive waiter counts as a committed receiver, so
        // capacity appeared.
        self.notify_writers(&mut inner);
        false
    }

    pub(crate) fn register_write_waiter(&self, signal: &Arc<Signal>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed || (inner.slot.is_none() && inner.receiver_ready()) {
            return true;
        }
        inner.write_waiters.register(signal.clone());
        false
    }

    pub(crate) fn unregister_read_waiter(&self, signal: &Arc<Signal>) {
        self.inner.lock().unwrap().read_waiters.unregister(signal);
    }

    pub(crate) fn unregister_write_waiter(&self, signal: &Arc<Signal>) {
        self.inner.lock().unwrap().write_waiters.unregister(signal);
    }
}

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::error::{RecvError, SendError, SendTimeoutError};
use crate::flavors::{timed_wait, RecvPoll, SendPoll};
use crate::signal::{Signal, WaiterQueue};

struct Inner<T> {
    queue: VecDeque<T>,
    closed: bool,
    readers: usize,
    writers: usize,
    read_waiters: WaiterQueue,
    write_waiters: WaiterQueue,
}

/// A buffered FIFO channel with fixed capacity.
pub(crate) struct Channel<T> {
    capacity: usize,
    inner: Mutex<Inner<T>>,
    /// Receivers re-examine the queue.
    not_empty: Condvar,
    /// Senders re-examine free capacity.
    not_full: Condvar,
}

impl<T> Channel<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity >= 1);
        Self {
            capacity,
            inner: Mutex::new(Inner {
                queue: VecDeque::with_capacity(capacity),
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
        while inner.queue.len() == self.capacity && !inner.closed {
            inner = self.not_full.wait(inner).unwrap();
        }
        if inner.closed {
            inner.writers -= 1;
            return Err(SendError(msg));
        }
        inner.queue.push_back(msg);
        self.notify_readers(&mut inner);
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
        inner.writers += 1;
        loop {
            if inner.closed {
                inner.writers -= 1;
                return Err(SendTimeoutError::Closed(msg));
            }
            if inner.queue.len() < self.capacity {
                inner.queue.push_back(msg);
                self.notify_readers(&mut inner);
                inner.writers -= 1;
                return Ok(());
            }
            let (guard, waited) = timed_wait(&self.not_full, inner, deadline);
            inner = guard;
            if !waited {
                inner.writers -= 1;
                return Err(SendTimeoutError::Timeout(msg));
            }
        }
    }

    pub(crate) fn try_send(&self, msg: T) -> SendPoll<T> {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return SendPoll::Closed(msg);
        }
        if inner.queue.len() == self.capacity {
            return SendPoll::Full(msg);
        }
        inner.queue.push_back(msg);
        self.notify_readers(&mut inner);
        SendPoll::Sent
    }

    pub(crate) fn recv(&self) -> Result<T, RecvError> {
        let mut inner = self.inner.lock().unwrap();
        inner.readers += 1;
        while inner.queue.is_empty() && !inner.closed {
            inner = self.not_empty.wait(inner).unwrap();
        }
        let out = match inner.queue.pop_front() {
            Some(msg) => {
                self.notify_writers(&mut inner);
                Ok(msg)
            }
            None => Err(RecvError),
        };
        inner.readers -= 1;
        out
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
        loop {
            if let Some(msg) = inner.queue.pop_front() {
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
        match inner.queue.pop_front() {
            Some(msg) => {
                self.notify_writers(&mut inner);
                RecvPoll::Msg(msg)
            }
            None if inner.closed => RecvPoll::Closed,
            None => RecvPoll::Empty,
        }
    }

    /// Closing never discards buffered messages; receivers drain them until
    /// the queue is empty.
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
    }

    pub(crate) fn is_closed(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.closed && inner.queue.is_empty()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().queue.is_empty()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.inner.lock().unwrap().queue.len() == self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn register_read_waiter(&self, signal: &Arc<Signal>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed || !inner.queue.is_empty() {
            return true;
        }
        inner.read_waiters.register(signal.clone());
        false
    }

    pub(crate) fn register_write_waiter(&self, signal: &Arc<Signal>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed || inner.queue.len() < self.capacity {
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

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{RecvError, SendError, SendTimeoutError, TrySendError};
use crate::flavors::{bounded, zero, RecvPoll, SendPoll};
use crate::signal::Signal;

pub(crate) enum Flavor<T> {
    Bounded(bounded::Channel<T>),
    Zero(zero::Channel<T>),
}

impl<T> Flavor<T> {
    fn send(&self, msg: T) -> Result<(), SendError<T>> {
        match self {
            Flavor::Bounded(chan) => chan.send(msg),
            Flavor::Zero(chan) => chan.send(msg),
        }
    }

    fn send_timeout(&self, msg: T, timeout: Duration) -> Result<(), SendTimeoutError<T>> {
        match self {
            Flavor::Bounded(chan) => chan.send_timeout(msg, timeout),
            Flavor::Zero(chan) => chan.send_timeout(msg, timeout),
        }
    }

    fn try_send(&self, msg: T) -> SendPoll<T> {
        match self {
            Flavor::Bounded(chan) => chan.try_send(msg),
            Flavor::Zero(chan) => chan.try_send(msg),
        }
    }

    fn recv(&self) -> Result<T, RecvError> {
        match self {
            Flavor::Bounded(chan) => chan.recv(),
            Flavor::Zero(chan) => chan.recv(),
        }
    }

    fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        match self {
            Flavor::Bounded(chan) => chan.recv_timeout(timeout),
            Flavor::Zero(chan) => chan.recv_timeout(timeout),
        }
    }

    fn try_recv(&self) -> RecvPoll<T> {
        match self {
            Flavor::Bounded(chan) => chan.try_recv(),
            Flavor::Zero(chan) => chan.try_recv(),
        }
    }

    fn close(&self) {
        match self {
            Flavor::Bounded(chan) => chan.close(),
            Flavor::Zero(chan) => chan.close(),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Flavor::Bounded(chan) => chan.is_closed(),
            Flavor::Zero(chan) => chan.is_closed(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Flavor::Bounded(chan) => chan.is_empty(),
            Flavor::Zero(chan) => chan.is_empty(),
        }
    }

    fn is_full(&self) -> bool {
        match self {
            Flavor::Bounded(chan) => chan.is_full(),
            Flavor::Zero(chan) => chan.is_full(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Flavor::Bounded(chan) => chan.len(),
            Flavor::Zero(chan) => chan.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Flavor::Bounded(chan) => chan.capacity(),
            Flavor::Zero(chan) => chan.capacity(),
        }
    }

    fn register_read_waiter(&self, signal: &Arc<Signal>) -> bool {
        match self {
            Flavor::Bounded(chan) => chan.register_read_waiter(signal),
            Flavor::Zero(chan) => chan.register_read_waiter(signal),
        }
    }

    fn register_write_waiter(&self, signal: &Arc<Signal>) -> bool {
        match self {
            Flavor::Bounded(chan) => chan.register_write_waiter(signal),
            Flavor::Zero(chan) => chan.register_write_waiter(signal),
        }
    }

    fn unregister_read_waiter(&self, signal: &Arc<Signal>) {
        match self {
            Flavor::Bounded(chan) => chan.unregister_read_waiter(signal),
            Flavor::Zero(chan) => chan.unregister_read_waiter(signal),
        }
    }

    fn unregister_write_waiter(&self, signal: &Arc<Signal>) {
        match self {
            Flavor::Bounded(chan) => chan.unregister_write_waiter(signal),
            Flavor::Zero(chan) => chan.unregister_write_waiter(signal),
        }
    }
}

pub(crate) fn bounded<T>(cap: usize) -> (Sender<T>, Receiver<T>) {
    let flavor = if cap == 0 {
        Flavor::Zero(zero::Channel::new())
    } else {
        Flavor::Bounded(bounded::Channel::with_capacity(cap))
    };
    pair(flavor)
}

pub(crate) fn rendezvous<T>() -> (Sender<T>, Receiver<T>) {
    pair(Flavor::Zero(zero::Channel::new()))
}

fn pair<T>(flavor: Flavor<T>) -> (Sender<T>, Receiver<T>) {
    let flavor = Arc::new(flavor);
    (
        Sender {
            flavor: flavor.clone(),
        },
        Receiver { flavor },
    )
}

/// The sending half of a channel.
///
/// Senders can be cloned; every clone operates on the same channel.
pub struct Sender<T> {
    flavor: Arc<Flavor<T>>,
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self {
            flavor: self.flavor.clone(),
        }
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "Sender { .. }".fmt(f)
    }
}

impl<T> Sender<T> {
    /// Sends a message into the channel, blocking until it is delivered.
    ///
    /// On a bounded channel the message is delivered once enqueued; on a
    /// rendezvous channel `send` returns only after a receiver has taken the
    /// value. Fails iff the channel is closed, handing the message back.
    pub fn send(&self, msg: T) -> Result<(), SendError<T>> {
        self.flavor.send(msg)
    }

    /// Attempts to send a message without blocking.
    pub fn try_send(&self, msg: T) -> Result<(), TrySendError<T>> {
        match self.flavor.try_send(msg) {
            SendPoll::Sent => Ok(()),
            SendPoll::Full(msg) => Err(TrySendError::Full(msg)),
            SendPoll::Closed(msg) => Err(TrySendError::Closed(msg)),
        }
    }

    /// Attempts to send a message, giving up after `timeout`.
    ///
    /// A zero timeout behaves like [`try_send`](Sender::try_send). Closure is
    /// reported as an ordinary negative result, never as a panic or a
    /// [`SendError`].
    pub fn send_timeout(&self, msg: T, timeout: Duration) -> Result<(), SendTimeoutError<T>> {
        self.flavor.send_timeout(msg, timeout)
    }

    /// Closes the channel.
    ///
    /// Idempotent. Every blocked sender and receiver is woken. Buffered
    /// messages stay retrievable; on a rendezvous channel `close` blocks
    /// until an in-flight value has been taken by a receiver.
    pub fn close(&self) {
        self.flavor.close();
    }

    /// Returns true iff the channel is closed and fully drained.
    pub fn is_closed(&self) -> bool {
        self.flavor.is_closed()
    }

    /// Returns true if the channel holds no message right now.
    pub fn is_empty(&self) -> bool {
        self.flavor.is_empty()
    }

    /// Returns true if the channel cannot accept a message right now.
    ///
    /// A rendezvous channel is full unless a receiving party is ready.
    pub fn is_full(&self) -> bool {
        self.flavor.is_full()
    }

    /// Returns the number of messages held by the channel.
    pub fn len(&self) -> usize {
        self.flavor.len()
    }

    /// Returns the channel capacity; zero for a rendezvous channel.
    pub fn capacity(&self) -> usize {
        self.flavor.capacity()
    }

    pub(crate) fn poll_send(&self, msg: T) -> SendPoll<T> {
        self.flavor.try_send(msg)
    }

    pub(crate) fn register_write_waiter(&self, signal: &Arc<Signal>) -> bool {
        self.flavor.register_write_waiter(signal)
    }

    pub(crate) fn unregister_write_waiter(&self, signal: &Arc<Signal>) {
        self.flavor.unregister_write_waiter(signal);
    }
}

/// The receiving half of a channel.
///
/// Receivers can be cloned; every clone operates on the same channel.
pub struct Receiver<T> {
    flavor: Arc<Flavor<T>>,
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        Self {
            flavor: self.flavor.clone(),
        }
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "Receiver { .. }".fmt(f)
    }
}

impl<T> Receiver<T> {
    /// Receives a message, blocking until one is available.
    ///
    /// A closed channel keeps yielding buffered messages until drained, and
    /// fails only after that.
    pub fn recv(&self) -> Result<T, RecvError> {
        self.flavor.recv()
    }

    /// Attempts to receive a message without blocking.
    pub fn try_recv(&self) -> Option<T> {
        match self.flavor.try_recv() {
            RecvPoll::Msg(msg) => Some(msg),
            RecvPoll::Empty | RecvPoll::Closed => None,
        }
    }

    /// Attempts to receive a message, giving up after `timeout`.
    ///
    /// A zero timeout behaves like [`try_recv`](Receiver::try_recv). Returns
    /// `None` on closure rather than failing.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        self.flavor.recv_timeout(timeout)
    }

    /// Returns a blocking iterator over received messages.
    ///
    /// The iterator ends when the channel is closed and drained.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { receiver: self }
    }

    /// Closes the channel.
    ///
    /// Idempotent. Every blocked sender and receiver is woken. Buffered
    /// messages stay retrievable; on a rendezvous channel `close` blocks
    /// until an in-flight value has been taken by a receiver.
    pub fn close(&self) {
        self.flavor.close();
    }

    /// Returns true iff the channel is closed and fully drained.
    pub fn is_closed(&self) -> bool {
        self.flavor.is_closed()
    }

    /// Returns true if the channel holds no message right now.
    pub fn is_empty(&self) -> bool {
        self.flavor.is_empty()
    }

    /// Returns true if the channel cannot accept a message right now.
    pub fn is_full(&self) -> bool {
        self.flavor.is_full()
    }

    /// Returns the number of messages held by the channel.
    pub fn len(&self) -> usize {
        self.flavor.len()
    }

    /// Returns the channel capacity; zero for a rendezvous channel.
    pub fn capacity(&self) -> usize {
        self.flavor.capacity()
    }

    pub(crate) fn poll_recv(&self) -> RecvPoll<T> {
        self.flavor.try_recv()
    }

    pub(crate) fn register_read_waiter(&self, signal: &Arc<Signal>) -> bool {
        self.flavor.register_read_waiter(signal)
    }

    pub(crate) fn unregister_read_waiter(&self, signal: &Arc<Signal>) {
        self.flavor.unregister_read_waiter(signal);
    }
}

/// A blocking iterator over messages, created by
/// [`Receiver::iter`](Receiver::iter).
pub struct Iter<'a, T> {
    receiver: &'a Receiver<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.receiver.recv().ok()
    }
}

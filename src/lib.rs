//! Blocking typed channels for cooperating threads, with a multi-way select.
//!
//! This crate provides two channel flavors behind a single pair of handle
//! types, along with a [`Select`](select::Select) primitive and a
//! [`select!`] macro for waiting on several channel operations at once.
//!
//! # Key Features
//!
//! - **Multi-producer Multi-consumer (MPMC)**: both halves of a channel can
//!   be cloned and shared across threads.
//! - **Blocking Support**: `send` blocks while the channel is full and
//!   `recv` blocks while it is empty, with `try_*` and timed variants for
//!   every operation.
//! - **Explicit Closure**: any participant may close a channel once; blocked
//!   parties wake up, buffered messages stay retrievable until drained.
//! - **Select**: wait on a list of send and receive candidates across
//!   distinct channels and commit to exactly one, with round-robin fairness.
//!
//! # Channel Flavors
//!
//! - [`bounded()`]: a channel with fixed capacity. It blocks on send when
//!   full and on receive when empty.
//! - [`rendezvous()`]: a channel with no buffer. A sender and a receiver
//!   synchronize directly; at most one value is ever in flight.
//!
//! # Example
//!
//! ```rust
//! use boru::{bounded, select};
//! use std::thread;
//!
//! let (s1, r1) = bounded::<i32>(4);
//! let (s2, r2) = bounded::<i32>(4);
//!
//! thread::spawn(move || {
//!     s1.send(10).unwrap();
//! });
//!
//! thread::spawn(move || {
//!     s2.send(20).unwrap();
//! });
//!
//! let got = select! {
//!     v1 = r1 => v1,
//!     v2 = r2 => v2,
//! };
//! assert!(got == 10 || got == 20);
//! ```

#![warn(missing_docs)]

/// Error types surfaced by channel and select operations.
pub mod error;
/// Multi-way selection over channel operations.
pub mod select;
/// Signal mechanism for thread synchronization.
pub mod signal;

mod channel;
mod flavors;

pub use channel::{Iter, Receiver, Sender};

/// Creates a channel of bounded capacity.
///
/// This channel has a FIFO buffer of fixed capacity. A capacity of zero is
/// redirected to a [`rendezvous()`] channel.
pub fn bounded<T>(cap: usize) -> (Sender<T>, Receiver<T>) {
    channel::bounded(cap)
}

/// Creates a rendezvous channel.
///
/// This channel has no buffer; a send completes only once a receiver takes
/// the value.
pub fn rendezvous<T>() -> (Sender<T>, Receiver<T>) {
    channel::rendezvous()
}

pub use flavors::after::after;
pub use flavors::never::never;
pub use flavors::tick::tick;

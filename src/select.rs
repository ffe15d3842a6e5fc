use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::channel::{Receiver, Sender};
use crate::error::SelectError;
use crate::flavors::{RecvPoll, SendPoll};
use crate::signal::Signal;

/// Rotates the scan start across select calls so that continuously-ready
/// candidates are picked evenly.
static ROTOR: AtomicUsize = AtomicUsize::new(0);

enum CasePoll<R> {
    Fired(R),
    Pending,
    Dead,
}

trait Case<R> {
    /// Attempts to commit this candidate; runs its handler on success.
    fn poll(&mut self) -> CasePoll<R>;

    /// Registers `signal` with the candidate's channel. Returns true if the
    /// candidate was observed ready instead, in which case nothing was
    /// registered and the caller should rescan.
    fn register(&mut self, signal: &Arc<Signal>) -> bool;

    fn unregister(&mut self, signal: &Arc<Signal>);
}

struct RecvCase<'a, T, F> {
    receiver: &'a Receiver<T>,
    handler: Option<F>,
    dead: bool,
}

impl<T, R, F: FnOnce(T) -> R> Case<R> for RecvCase<'_, T, F> {
    fn poll(&mut self) -> CasePoll<R> {
        if self.dead {
            return CasePoll::Dead;
        }
        match self.handler.take() {
            None => CasePoll::Pending,
            Some(handler) => match self.receiver.poll_recv() {
                RecvPoll::Msg(msg) => CasePoll::Fired(handler(msg)),
                RecvPoll::Empty => {
                    self.handler = Some(handler);
                    CasePoll::Pending
                }
                RecvPoll::Closed => {
                    self.handler = Some(handler);
                    self.dead = true;
                    CasePoll::Dead
                }
            },
        }
    }

    fn register(&mut self, signal: &Arc<Signal>) -> bool {
        if self.dead {
            return false;
        }
        self.receiver.register_read_waiter(signal)
    }

    fn unregister(&mut self, signal: &Arc<Signal>) {
        self.receiver.unregister_read_waiter(signal);
    }
}

struct SendCase<'a, T, F> {
    sender: &'a Sender<T>,
    op: Option<(T, F)>,
    dead: bool,
}

impl<T, R, F: FnOnce() -> R> Case<R> for SendCase<'_, T, F> {
    fn poll(&mut self) -> CasePoll<R> {
        if self.dead {
            return CasePoll::Dead;
        }
        match self.op.take() {
            None => CasePoll::Pending,
            Some((msg, handler)) => match self.sender.poll_send(msg) {
                SendPoll::Sent => CasePoll::Fired(handler()),
                SendPoll::Full(msg) => {
                    self.op = Some((msg, handler));
                    CasePoll::Pending
                }
                SendPoll::Closed(msg) => {
                    self.op = Some((msg, handler));
                    self.dead = true;
                    CasePoll::Dead
                }
            },
        }
    }

    fn register(&mut self, signal: &Arc<Signal>) -> bool {
        if self.dead {
            return false;
        }
        self.sender.register_write_waiter(signal)
    }

    fn unregister(&mut self, signal: &Arc<Signal>) {
        self.sender.unregister_write_waiter(signal);
    }
}

/// Waits on several channel operations and commits to exactly one.
///
/// Candidates are added with [`recv`](Select::recv) and
/// [`send`](Select::send); each carries a handler producing the common
/// result type `R`. Exactly one handler runs per wait; the other candidates
/// observe no state change.
///
/// Candidates on closed channels (for a receive, closed *and* drained) can
/// never become ready and are skipped. Once every candidate is in that
/// state, [`wait`](Select::wait) reports [`SelectError`] and the try/timed
/// forms return `None`.
///
/// # Examples
///
/// ```
/// use boru::bounded;
/// use boru::select::Select;
///
/// let (s, r) = bounded(1);
/// s.send(7).unwrap();
///
/// let doubled = Select::new().recv(&r, |v| v * 2).wait().unwrap();
/// assert_eq!(doubled, 14);
/// ```
pub struct Select<'a, R> {
    cases: Vec<Box<dyn Case<R> + 'a>>,
}

impl<R> Default for Select<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R> Select<'a, R> {
    /// Creates a selection with no candidates.
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Adds a receive candidate; `handler` runs on the received message if
    /// this candidate commits.
    pub fn recv<T, F>(mut self, receiver: &'a Receiver<T>, handler: F) -> Self
    where
        T: 'a,
        F: FnOnce(T) -> R + 'a,
    {
        self.cases.push(Box::new(RecvCase {
            receiver,
            handler: Some(handler),
            dead: false,
        }));
        self
    }

    /// Adds a send candidate delivering `msg`; `handler` runs if this
    /// candidate commits.
    ///
    /// Adding both a send and a receive candidate for the same rendezvous
    /// channel is not supported: the selection may pair up with itself.
    pub fn send<T, F>(mut self, sender: &'a Sender<T>, msg: T, handler: F) -> Self
    where
        T: 'a,
        F: FnOnce() -> R + 'a,
    {
        self.cases.push(Box::new(SendCase {
            sender,
            op: Some((msg, handler)),
            dead: false,
        }));
        self
    }

    /// Blocks until one candidate commits and returns its handler's result.
    ///
    /// Fails iff every candidate is on a closed channel (or there are no
    /// candidates at all).
    pub fn wait(mut self) -> Result<R, SelectError> {
        self.run(None).map_err(|_| SelectError)
    }

    /// Commits a ready candidate without blocking.
    ///
    /// Returns `None` when no candidate is ready right now.
    pub fn try_wait(mut self) -> Option<R> {
        let len = self.cases.len();
        if len == 0 {
            return None;
        }
        let start = ROTOR.fetch_add(1, Ordering::Relaxed) % len;
        scan(&mut self.cases, start).ok()
    }

    /// Blocks until one candidate commits, giving up after `timeout`.
    ///
    /// A zero timeout behaves like [`try_wait`](Select::try_wait). Returns
    /// `None` on timeout and when every candidate is closed.
    pub fn wait_timeout(mut self, timeout: Duration) -> Option<R> {
        if timeout.is_zero() {
            return self.try_wait();
        }
        self.run(Instant::now().checked_add(timeout)).ok()
    }

    fn run(&mut self, deadline: Option<Instant>) -> Result<R, ()> {
        let len = self.cases.len();
        if len == 0 {
            return Err(());
        }
        let signal = Arc::new(Signal::new());
        let mut start = ROTOR.fetch_add(1, Ordering::Relaxed) % len;
        loop {
            match scan(&mut self.cases, start) {
                Ok(result) => return Ok(result),
                Err(dead) if dead == len => return Err(()),
                Err(_) => {}
            }
            start = (start + 1) % len;

            signal.reset();
            let mut registered = 0;
            let mut ready = false;
            while registered < len {
                if self.cases[registered].register(&signal) {
                    ready = true;
                    break;
                }
                registered += 1;
            }
            if ready {
                for case in &mut self.cases[..registered] {
                    case.unregister(&signal);
                }
                continue;
            }

            let notified = match deadline {
                None => {
                    signal.wait();
                    true
                }
                Some(deadline) => signal.wait_deadline(deadline),
            };
            for case in &mut self.cases {
                case.unregister(&signal);
            }
            if !notified {
                // A notification may have raced the deadline; take a ready
                // candidate if one exists, otherwise give up.
                return scan(&mut self.cases, start).map_err(|_| ());
            }
        }
    }
}

/// One fair pass over the candidates starting at `start`. Returns the number
/// of dead candidates if none fired.
fn scan<'a, R>(cases: &mut [Box<dyn Case<R> + 'a>], start: usize) -> Result<R, usize> {
    let len = cases.len();
    let mut dead = 0;
    for offset in 0..len {
        match cases[(start + offset) % len].poll() {
            CasePoll::Fired(result) => return Ok(result),
            CasePoll::Dead => dead += 1,
            CasePoll::Pending => {}
        }
    }
    Err(dead)
}

/// Waits on multiple receive operations, running the body of the one that
/// becomes ready first.
///
/// Desugars to a [`Select`]. The form without a `default` arm blocks and
/// panics if every channel involved is closed; with `default` the macro
/// never blocks.
///
/// # Examples
///
/// ```
/// use boru::{bounded, select};
///
/// let (s1, r1) = bounded::<i32>(1);
/// let (_s2, r2) = bounded::<i32>(1);
///
/// s1.send(10).unwrap();
///
/// select! {
///     v1 = r1 => assert_eq!(v1, 10),
///     _v2 = r2 => panic!("should receive from r1"),
/// }
/// ```
///
/// With a default case:
///
/// ```
/// use boru::{bounded, select};
///
/// let (_s, r) = bounded::<i32>(1);
///
/// select! {
///     _v = r => panic!("no message is available");
///     default => (),
/// }
/// ```
#[macro_export]
macro_rules! select {
    (
        $($name:pat = $rx:expr => $body:expr),* ;
        default => $default_body:expr $(,)?
    ) => {
        match $crate::select::Select::new()
            $(.recv(&$rx, |$name| $body))*
            .try_wait()
        {
            Some(result) => result,
            None => $default_body,
        }
    };
    (
        $($name:pat = $rx:expr => $body:expr),* $(,)?
    ) => {
        match $crate::select::Select::new()
            $(.recv(&$rx, |$name| $body))*
            .wait()
        {
            Ok(result) => result,
            Err(_) => panic!("select!: every channel is closed"),
        }
    };
}

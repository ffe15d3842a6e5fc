use std::thread;
use std::time::{Duration, Instant};

use crate::channel::{bounded, Receiver};

/// Creates a channel that delivers a single message after a specified
/// duration, then closes.
pub fn after(duration: Duration) -> Receiver<Instant> {
    let (sender, receiver) = bounded(1);
    thread::spawn(move || {
        thread::sleep(duration);
        let _ = sender.send(Instant::now());
        sender.close();
    });
    receiver
}

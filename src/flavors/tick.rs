use std::thread;
use std::time::{Duration, Instant};

use crate::channel::{bounded, Receiver};

/// Creates a channel that delivers messages periodically.
///
/// The ticker stops once the channel is closed.
pub fn tick(duration: Duration) -> Receiver<Instant> {
    let (sender, receiver) = bounded(1);
    thread::spawn(move || loop {
        thread::sleep(duration);
        if sender.send(Instant::now()).is_err() {
            break;
        }
    });
    receiver
}

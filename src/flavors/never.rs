use crate::channel::{rendezvous, Receiver};

/// Creates a channel that never delivers a message.
pub fn never<T>() -> Receiver<T> {
    let (_sender, receiver) = rendezvous();
    receiver
}

use boru::error::SendTimeoutError;
use boru::{bounded, rendezvous};
use std::thread;
use std::time::{Duration, Instant};

#[test]
#[cfg_attr(miri, ignore)]
fn test_send_timeout_full_channel() {
    let (s, _r) = bounded(1);
    s.send(1).unwrap();

    let start = Instant::now();
    match s.send_timeout(2, Duration::from_millis(50)) {
        Err(SendTimeoutError::Timeout(v)) => assert_eq!(v, 2),
        other => panic!("expected a timeout, got {:?}", other),
    }
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_recv_timeout_empty() {
    let (_s, r) = bounded::<i32>(1);
    let start = Instant::now();
    assert_eq!(r.recv_timeout(Duration::from_millis(50)), None);
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_recv_timeout_early_value() {
    let (s, r) = bounded(1);

    thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        s.send(9).unwrap();
    });

    let start = Instant::now();
    assert_eq!(r.recv_timeout(Duration::from_secs(5)), Some(9));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_zero_timeout_is_try() {
    let (s, r) = bounded(1);
    assert_eq!(r.recv_timeout(Duration::ZERO), None);
    s.send(3).unwrap();
    assert!(matches!(
        s.send_timeout(4, Duration::ZERO),
        Err(SendTimeoutError::Timeout(4))
    ));
    assert_eq!(r.recv_timeout(Duration::ZERO), Some(3));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_rendezvous_send_timeout_reclaims() {
    let (s, r) = rendezvous();

    let start = Instant::now();
    match s.send_timeout(5, Duration::from_millis(50)) {
        Err(SendTimeoutError::Timeout(v)) => assert_eq!(v, 5),
        other => panic!("expected a timeout, got {:?}", other),
    }
    assert!(start.elapsed() >= Duration::from_millis(50));

    // The in-flight value was reclaimed, not abandoned.
    assert!(r.is_empty());
    assert_eq!(r.try_recv(), None);
}

#[test]
fn test_timed_ops_after_close() {
    let (s, r) = bounded::<i32>(2);
    s.close();
    assert_eq!(r.recv_timeout(Duration::from_millis(10)), None);
    assert!(matches!(
        s.send_timeout(1, Duration::from_millis(10)),
        Err(SendTimeoutError::Closed(1))
    ));
}

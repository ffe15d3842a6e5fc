use boru::bounded;
use boru::error::TrySendError;
use std::thread;
use std::time::Duration;

#[test]
fn test_bounded_simple() {
    let (s, r) = bounded(2);
    s.send(1).unwrap();
    s.send(2).unwrap();

    assert_eq!(r.try_recv(), Some(1));
    assert_eq!(r.try_recv(), Some(2));
    assert_eq!(r.try_recv(), None);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_bounded_capacity() {
    let (s, r) = bounded(1);
    s.send(1).unwrap();

    let s_clone = s.clone();
    let t = thread::spawn(move || {
        s_clone.send(2).unwrap();
    });

    // Give the thread time to block
    thread::sleep(Duration::from_millis(50));

    assert_eq!(r.recv(), Ok(1));

    t.join().unwrap();
    assert_eq!(r.recv(), Ok(2));
}

#[test]
fn test_bounded_burst() {
    let (s, r) = bounded(4);
    for i in 0..4 {
        assert!(s.try_send(i).is_ok());
    }
    match s.try_send(4) {
        Err(TrySendError::Full(v)) => assert_eq!(v, 4),
        other => panic!("expected a full channel, got {:?}", other),
    }

    assert_eq!(r.try_recv(), Some(0));
    assert_eq!(r.try_recv(), Some(1));

    assert!(s.try_send(4).is_ok());
    assert!(s.try_send(5).is_ok());
    assert!(matches!(s.try_send(6), Err(TrySendError::Full(6))));

    for expected in 2..6 {
        assert_eq!(r.recv(), Ok(expected));
    }
}

#[test]
fn test_bounded_zero_is_rendezvous() {
    let (s, r) = bounded(0);
    assert_eq!(s.capacity(), 0);
    assert!(matches!(s.try_send(1), Err(TrySendError::Full(1))));
    assert_eq!(r.try_recv(), None);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_bounded_threads() {
    let (s, r) = bounded(10);
    let s1 = s.clone();
    let s2 = s.clone();

    let t1 = thread::spawn(move || {
        for i in 0..100 {
            s1.send(i).unwrap();
        }
    });

    let t2 = thread::spawn(move || {
        for i in 100..200 {
            s2.send(i).unwrap();
        }
    });

    let mut received = Vec::new();
    for _ in 0..200 {
        received.push(r.recv().unwrap());
    }

    t1.join().unwrap();
    t2.join().unwrap();

    received.sort();
    assert_eq!(received.len(), 200);
    for (i, &item) in received.iter().enumerate() {
        assert_eq!(item, i);
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_receiver_iter() {
    let (s, r) = bounded(4);
    let t = thread::spawn(move || {
        for i in 0..10 {
            s.send(i).unwrap();
        }
        s.close();
    });

    let collected: Vec<i32> = r.iter().collect();
    t.join().unwrap();
    assert_eq!(collected, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_bounded_len() {
    let (s, r) = bounded(3);
    assert!(s.is_empty());
    s.send(1).unwrap();
    s.send(2).unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(r.len(), 2);
    assert!(!s.is_full());
    s.send(3).unwrap();
    assert!(s.is_full());
    assert_eq!(r.capacity(), 3);
}

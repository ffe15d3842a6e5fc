use boru::select::Select;
use boru::{bounded, rendezvous, select};
use std::thread;
use std::time::{Duration, Instant};

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_picks_ready() {
    let (_sa, ra) = rendezvous::<i32>();
    let (sb, rb) = rendezvous::<i32>();

    let t = thread::spawn(move || sb.send(20).unwrap());
    // Let the sender park with its value in flight.
    thread::sleep(Duration::from_millis(50));

    let picked = Select::new()
        .recv(&ra, |v| ("a", v))
        .recv(&rb, |v| ("b", v))
        .wait()
        .unwrap();

    assert_eq!(picked, ("b", 20));
    t.join().unwrap();
    assert_eq!(ra.try_recv(), None);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_blocks_until_ready() {
    let (_sa, ra) = rendezvous::<i32>();
    let (sb, rb) = rendezvous::<i32>();

    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        sb.send(5).unwrap();
    });

    let got = Select::new().recv(&ra, |v| v).recv(&rb, |v| v).wait().unwrap();
    assert_eq!(got, 5);
}

#[test]
fn test_select_send_op() {
    let (s, r) = bounded(1);
    let sent = Select::new().send(&s, 7, || true).try_wait();
    assert_eq!(sent, Some(true));
    assert_eq!(r.try_recv(), Some(7));
}

#[test]
fn test_select_send_prefers_free_capacity() {
    let (s1, _r1) = bounded(1);
    let (s2, r2) = bounded(1);
    s1.send(0).unwrap();

    let picked = Select::new()
        .send(&s1, 1, || 1)
        .send(&s2, 2, || 2)
        .wait()
        .unwrap();

    assert_eq!(picked, 2);
    assert_eq!(r2.try_recv(), Some(2));
}

#[test]
fn test_select_all_closed() {
    let (s, r) = bounded::<i32>(1);
    s.close();

    assert!(Select::new().recv(&r, |v| v).wait().is_err());
    assert!(Select::new().send(&s, 1, || ()).wait().is_err());
    assert_eq!(Select::new().recv(&r, |v| v).try_wait(), None);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_timeout() {
    let (_s, r) = bounded::<i32>(1);
    let start = Instant::now();
    let got = Select::new()
        .recv(&r, |v| v)
        .wait_timeout(Duration::from_millis(50));
    assert_eq!(got, None);
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn test_select_macro_basic() {
    let (s1, r1) = bounded::<i32>(1);
    let (_s2, r2) = bounded::<i32>(1);

    s1.send(10).unwrap();

    select! {
        v1 = r1 => assert_eq!(v1, 10),
        _v2 = r2 => panic!("should receive from r1"),
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_macro_race() {
    let (_s1, r1) = bounded::<i32>(1);
    let (s2, r2) = bounded::<i32>(1);

    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        s2.send(20).unwrap();
    });

    select! {
        _v1 = r1 => panic!("should receive from r2"),
        v2 = r2 => assert_eq!(v2, 20),
    }
}

#[test]
fn test_select_macro_default() {
    let (_s1, r1) = bounded::<i32>(1);
    let (_s2, r2) = bounded::<i32>(1);

    let hit = select! {
        _v1 = r1 => false,
        _v2 = r2 => false;
        default => true,
    };
    assert!(hit);
}

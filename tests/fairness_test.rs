use boru::bounded;
use boru::select::Select;
use std::thread;

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_fairness() {
    let (s1, r1) = bounded(2);
    let (s2, r2) = bounded(2);

    // Keep both channels continuously full until they are closed.
    let p1 = thread::spawn(move || while s1.send(1u8).is_ok() {});
    let p2 = thread::spawn(move || while s2.send(2u8).is_ok() {});

    let mut counts = [0usize; 2];
    for _ in 0..10_000 {
        let which = Select::new()
            .recv(&r1, |v| v)
            .recv(&r2, |v| v)
            .wait()
            .unwrap();
        counts[(which - 1) as usize] += 1;
    }

    r1.close();
    r2.close();
    p1.join().unwrap();
    p2.join().unwrap();

    for &count in &counts {
        assert!(
            (4_500..=5_500).contains(&count),
            "unfair split: {:?}",
            counts
        );
    }
}

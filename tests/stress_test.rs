use boru::bounded;
use rand::Rng;
use std::thread;

#[test]
#[cfg_attr(miri, ignore)]
fn test_mpmc_throughput() {
    let (s, r) = bounded(16);
    let producers = 4;
    let per = 2_500;

    let mut handles = Vec::new();
    for p in 0..producers {
        let s = s.clone();
        handles.push(thread::spawn(move || {
            let mut rng = rand::thread_rng();
            for i in 0..per {
                s.send(p * per + i).unwrap();
                if rng.gen_ratio(1, 64) {
                    thread::yield_now();
                }
            }
        }));
    }

    let mut takers = Vec::new();
    for _ in 0..4 {
        let r = r.clone();
        takers.push(thread::spawn(move || {
            let mut got = Vec::new();
            while let Ok(v) = r.recv() {
                got.push(v);
            }
            got
        }));
    }

    for h in handles {
        h.join().unwrap();
    }
    s.close();

    let mut all: Vec<i32> = Vec::new();
    for t in takers {
        all.extend(t.join().unwrap());
    }

    all.sort();
    assert_eq!(all.len(), (producers * per) as usize);
    for (i, &v) in all.iter().enumerate() {
        assert_eq!(v, i as i32);
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_bounded_back_pressure() {
    let (s, r) = bounded(4);

    let producer = thread::spawn(move || {
        for i in 0..100 {
            s.send(i).unwrap();
        }
    });

    let consumer = thread::spawn(move || {
        let mut received = Vec::new();
        for _ in 0..100 {
            received.push(r.recv().unwrap());
        }
        received
    });

    producer.join().unwrap();
    let received = consumer.join().unwrap();
    assert_eq!(received.len(), 100);

    // Verify FIFO ordering
    for (i, val) in received.iter().enumerate() {
        assert_eq!(*val, i);
    }
}

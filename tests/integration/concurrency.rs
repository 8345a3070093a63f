//! Concurrent access to a shared pool.

use super::test_utils::init_tracing;
use confpool::{sections, Options, Pool, Sections, Strategy};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const KEYS_PER_THREAD: usize = 50;

#[test]
fn test_concurrent_disjoint_merges_all_land() {
    init_tracing();

    let pool = Arc::new(Pool::new(sections! { "shared" => { "seed" => "0" } }));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for k in 0..KEYS_PER_THREAD {
                    let mut incoming = Sections::new();
                    incoming
                        .entry("shared".to_string())
                        .or_default()
                        .insert(format!("t{}-k{}", t, k), k.to_string());
                    pool.merge(&incoming, Strategy::Report).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let shared = pool.section("shared").unwrap();
    assert_eq!(shared.len(), THREADS * KEYS_PER_THREAD + 1);
    assert_eq!(
        pool.int("shared", "t3-k7", &Options::new()).unwrap(),
        Some(7)
    );
}

#[test]
fn test_concurrent_conflicting_merges_one_winner() {
    init_tracing();

    let pool = Arc::new(Pool::new(sections! { "s" => { "other" => "x" } }));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let mut incoming = Sections::new();
                incoming
                    .entry("s".to_string())
                    .or_default()
                    .insert("winner".to_string(), t.to_string());
                pool.merge(&incoming, Strategy::Report).is_ok()
            })
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert!(pool.get("s", "winner").is_some());
}

#[test]
fn test_readers_and_writers_interleave() {
    let pool = Arc::new(Pool::new(sections! { "counters" => { "n" => "0" } }));

    let writer = {
        let pool = Arc::clone(&pool);
        thread::spawn(move || {
            for i in 1..=200 {
                pool.set("counters", "n", i.to_string()).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for _ in 0..200 {
                    let raw = pool.raw();
                    let n: i64 = raw["counters"]["n"].parse().unwrap();
                    assert!((0..=200).contains(&n));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(pool.get("counters", "n").as_deref(), Some("200"));
}

#[test]
fn test_cross_compare_does_not_deadlock() {
    let a = Arc::new(Pool::new(sections! { "s" => { "k" => "a" } }));
    let b = Arc::new(Pool::new(sections! { "s" => { "k" => "b" } }));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let (a, b) = (Arc::clone(&a), Arc::clone(&b));
            thread::spawn(move || {
                for _ in 0..500 {
                    let diff = if i % 2 == 0 { a.compare(&b) } else { b.compare(&a) };
                    assert_eq!(diff.len(), 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

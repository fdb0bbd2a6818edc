//! Concurrency Tests
//!
//! Many threads hammer one shared store with randomized operations; once they
//! stop, capacity and index/recency consistency must still hold.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use storm::ShardedStore;

const THREADS: usize = 16;
const OPS_PER_THREAD: usize = 20_000;

fn key_pool(size: usize) -> Arc<Vec<String>> {
    Arc::new((0..size).map(|i| format!("key_{}", i)).collect())
}

/// Runs `THREADS` workers issuing random put/get/del/put_many calls.
fn stress(store: &Arc<ShardedStore>, keys: &Arc<Vec<String>>) {
    let barrier = Arc::new(Barrier::new(THREADS));
    let counter = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let store = Arc::clone(store);
            let keys = Arc::clone(keys);
            let barrier = Arc::clone(&barrier);
            let counter = Arc::clone(&counter);

            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(worker as u64);
                barrier.wait();

                for _ in 0..OPS_PER_THREAD {
                    let key = &keys[rng.gen_range(0..keys.len())];
                    let op_id = counter.fetch_add(1, Ordering::Relaxed);

                    match rng.gen_range(0..3) {
                        0 if op_id % 10 == 0 => {
                            let batch: Vec<(String, String)> = (0..rng.gen_range(1..8))
                                .map(|_| {
                                    let key = keys[rng.gen_range(0..keys.len())].clone();
                                    (key, format!("val_{}", op_id))
                                })
                                .collect();
                            store.put_many(batch);
                        }
                        0 => {
                            assert!(store.put(key.as_str(), format!("val_{}", op_id)));
                        }
                        1 => {
                            if let Some(value) = store.get(key) {
                                assert!(value.starts_with("val_"));
                            }
                        }
                        _ => {
                            store.del(key);
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

#[test]
fn test_concurrent_mixed_operations_keep_invariants() {
    let store = Arc::new(ShardedStore::new(40, 8).unwrap());
    // More keys than total capacity so eviction runs constantly
    let keys = key_pool(1_000);

    stress(&store, &keys);

    assert!(store.len() <= store.capacity());
    for len in store.shard_lens() {
        assert!(len <= store.shard_capacity());
    }
    assert!(store.is_consistent());

    let live = keys.iter().filter(|key| store.get(key).is_some()).count();
    assert!(live <= store.capacity());
}

#[test]
fn test_concurrent_single_shard_contention() {
    let store = Arc::new(ShardedStore::new(16, 1).unwrap());
    let keys = key_pool(64);

    stress(&store, &keys);

    assert!(store.len() <= 16);
    assert!(store.is_consistent());
}

#[test]
fn test_concurrent_writers_disjoint_keys() {
    let store = Arc::new(ShardedStore::new(1_000, 16).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let pairs: Vec<(String, String)> = (0..500)
                    .map(|i| (format!("w{}_k{}", worker, i), format!("{}", i)))
                    .collect();
                store.put_many(pairs);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer panicked");
    }

    // 4000 keys fit comfortably within 16 * 1000, so nothing is evicted
    assert_eq!(store.len(), 4_000);
    assert_eq!(store.stats().evictions, 0);
    assert_eq!(store.get("w3_k250"), Some("250".to_string()));
    assert!(store.is_consistent());
}

#[test]
fn test_clear_races_with_writers() {
    let store = Arc::new(ShardedStore::new(50, 4).unwrap());
    let keys = key_pool(200);

    let writer = {
        let store = Arc::clone(&store);
        let keys = Arc::clone(&keys);
        thread::spawn(move || {
            for (i, key) in keys.iter().cycle().take(20_000).enumerate() {
                store.put(key.as_str(), i.to_string());
            }
        })
    };

    for _ in 0..200 {
        store.clear();
        let _ = store.list();
    }
    writer.join().expect("writer panicked");

    assert!(store.is_consistent());
    store.clear();
    assert!(store.is_empty());
}

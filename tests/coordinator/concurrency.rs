//! Concurrency Tests
//!
//! One coordinator shared by many tasks. Each transaction's main batch is
//! atomic on its own; compensation runs in a separate batch.

use crate::common::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_commits_all_apply() {
    let h = Arc::new(Harness::new());

    let mut handles = Vec::new();
    for _ in 0..32 {
        let h = Arc::clone(&h);
        handles.push(tokio::spawn(async move {
            h.run(&counters(&["x", "y"])).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_committed());
    }

    assert_eq!(h.store.get_int("x"), Some(32));
    assert_eq!(h.store.get_int("y"), Some(32));
    assert_eq!(h.coordinator.metrics().committed, 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_rollbacks_restore_counters() {
    let h = Arc::new(Harness::new());
    h.store.set("bad", "nan");

    let mut handles = Vec::new();
    for i in 0..16 {
        let h = Arc::clone(&h);
        handles.push(tokio::spawn(async move {
            // Odd tasks touch the bad key and must roll back.
            let keys: &[&str] = if i % 2 == 0 { &["n"] } else { &["n", "bad"] };
            h.run(&counters(keys)).await
        }));
    }

    let mut rolled_back = 0;
    for handle in handles {
        if handle.await.unwrap().is_rolled_back() {
            rolled_back += 1;
        }
    }

    assert_eq!(rolled_back, 8);
    assert_eq!(h.store.get_int("n"), Some(8));

    let metrics = h.coordinator.metrics();
    assert_eq!(metrics.committed, 8);
    assert_eq!(metrics.rolled_back, 8);
    assert!((metrics.commit_rate - 0.5).abs() < f64::EPSILON);
}

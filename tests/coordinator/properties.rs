//! Property Tests
//!
//! For any mix of good and bad counters, the transaction either commits
//! with every increment applied or rolls back to the seeded state, and the
//! compensation batch is exactly the undo of the succeeded steps.

use proptest::prelude::*;

use crate::common::*;

fn run_blocking<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

proptest! {
    #[test]
    fn outcome_is_all_or_nothing(
        seeds in proptest::collection::vec(prop_oneof![
            (-1000i64..1000).prop_map(Value::Int),
            Just(Value::from("not-a-number")),
        ], 0..12)
    ) {
        let h = Harness::new();
        let keys: Vec<String> = (0..seeds.len()).map(|i| format!("k{}", i)).collect();
        for (key, value) in keys.iter().zip(&seeds) {
            h.store.set(key.clone(), value.clone());
        }
        let before = h.store.snapshot();
        let plan = counters(&keys.iter().map(String::as_str).collect::<Vec<_>>());

        let outcome = run_blocking(h.run(&plan));

        let bad: Vec<usize> = seeds
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_int().is_none())
            .map(|(i, _)| i)
            .collect();

        if bad.is_empty() {
            prop_assert!(outcome.is_committed());
            for (key, value) in keys.iter().zip(&seeds) {
                prop_assert_eq!(h.store.get_int(key), value.as_int().map(|n| n + 1));
            }
        } else {
            prop_assert!(outcome.is_rolled_back());
            prop_assert_eq!(failed_indices(&outcome), bad.clone());
            prop_assert_eq!(h.store.snapshot(), before);

            let sent = h.store.submissions();
            let expected: Vec<Instruction> = plan
                .rollback()
                .iter()
                .enumerate()
                .filter(|(i, _)| !bad.contains(i))
                .map(|(_, instr)| instr.clone())
                .collect();
            if expected.is_empty() {
                prop_assert_eq!(sent.len(), 1);
            } else {
                prop_assert_eq!(&sent[1], &expected);
            }
        }
    }
}

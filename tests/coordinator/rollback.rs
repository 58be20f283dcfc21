//! Rollback Tests
//!
//! Some main commands fail. Exactly the succeeded ones are undone, in a
//! second batch, and the failures are reported with their indices.

use crate::common::*;

#[tokio::test]
async fn middle_failure_restores_state() {
    init_tracing();
    let h = Harness::new().abc();

    let outcome = h.run(&incr_abc()).await;

    assert!(outcome.is_rolled_back());
    assert_eq!(failed_indices(&outcome), vec![1]);
    assert_eq!(h.store.get_int("a"), Some(1));
    assert_eq!(h.store.get("b"), Some(Value::from("123e")));
    assert_eq!(h.store.get_int("c"), Some(1));
}

#[tokio::test]
async fn compensation_batch_skips_failed_indices() {
    let h = Harness::new().abc();

    h.run(&incr_abc()).await;

    let sent = h.store.submissions();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1], vec![Instruction::decr("a"), Instruction::decr("c")]);
}

#[tokio::test]
async fn failure_carries_store_error() {
    let h = Harness::new().abc();

    let err = h.run(&incr_abc()).await.into_result().unwrap_err();

    assert!(err.is_retryable());
    assert!(!err.is_fatal());
    let failure = &err.failures()[0];
    assert_eq!(failure.index, 1);
    assert!(failure.error.to_string().contains("not an integer"), "{}", failure.error);
}

#[tokio::test]
async fn every_command_failing_compensates_nothing() {
    let h = Harness::new();
    h.store.set("a", "x");
    h.store.set("b", "y");

    let outcome = h.run(&counters(&["a", "b"])).await;

    assert_eq!(failed_indices(&outcome), vec![0, 1]);
    assert_eq!(h.store.submission_count(), 1);
    assert_eq!(h.store.get("a"), Some(Value::from("x")));
}

#[tokio::test]
async fn wrong_type_failure_is_rolled_back() {
    let h = Harness::new();
    h.store.set("s", "text");

    let plan = TransactionPlan::builder()
        .step(Instruction::set("k", 10), Instruction::del("k"))
        .step(Instruction::rpush("s", "x"), Instruction::rpop("s"))
        .build();

    let outcome = h.run(&plan).await;

    assert_eq!(failed_indices(&outcome), vec![1]);
    assert_eq!(h.store.get("k"), None);
    assert_eq!(h.store.get("s"), Some(Value::from("text")));
}

#[tokio::test]
async fn rejected_compensation_is_reported() {
    // The undo for step 0 hits a non-integer; a rejected compensating
    // command is not a lost compensation batch.
    let h = Harness::new().abc();
    h.store.set("z", "oops");

    let plan = TransactionPlan::new(
        vec![Instruction::incr("a"), Instruction::incr("b")],
        vec![Instruction::decr("z"), Instruction::decr("b")],
    )
    .unwrap();

    match h.run(&plan).await {
        TransactionOutcome::RolledBack {
            failures,
            compensation_errors,
        } => {
            assert_eq!(failures[0].index, 1);
            assert_eq!(compensation_errors.len(), 1);
            assert_eq!(compensation_errors[0].index, 0);
        }
        other => panic!("expected RolledBack, got {:?}", other),
    }
    assert_eq!(h.store.get_int("a"), Some(2));
}

#[tokio::test]
async fn unrestored_rollback_is_not_retryable() {
    let h = Harness::new().abc();
    h.store.set("z", "oops");

    let plan = TransactionPlan::new(
        vec![Instruction::incr("a"), Instruction::incr("b")],
        vec![Instruction::decr("z"), Instruction::decr("b")],
    )
    .unwrap();

    let outcome = h.run(&plan).await;
    assert!(!outcome.is_restored());

    let err = outcome.into_result().unwrap_err();
    assert!(!err.is_retryable());
    assert!(err.is_fatal());
    assert!(err.to_string().contains("not undone"), "{}", err);
    assert_eq!(h.store.get_int("a"), Some(2));
}

#[tokio::test]
async fn clean_rollback_is_restored_and_retryable() {
    let h = Harness::new().abc();

    let outcome = h.run(&incr_abc()).await;
    assert!(outcome.is_restored());

    let err = outcome.into_result().unwrap_err();
    assert!(err.is_retryable());
    assert!(!err.is_fatal());
}

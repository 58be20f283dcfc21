//! Commit Tests
//!
//! Every main command succeeds: one round trip, replies as a direct batch
//! would return them, rollback never sent.

use crate::common::*;

#[tokio::test]
async fn all_succeed_commits_in_one_round_trip() {
    init_tracing();
    let h = Harness::new();

    let outcome = h.run(&incr_abc()).await;

    assert_eq!(
        outcome,
        TransactionOutcome::Committed {
            replies: vec![Reply::from(Value::Int(1)); 3]
        }
    );
    assert_eq!(h.store.submission_count(), 1);
    assert_eq!(h.store.get_int("b"), Some(1));
}

#[tokio::test]
async fn committed_replies_match_direct_batch() {
    let plan = TransactionPlan::builder()
        .step(Instruction::set("k", "v"), Instruction::del("k"))
        .step(Instruction::append("k", "w"), Instruction::set("k", "v"))
        .step(Instruction::rpush("l", "x"), Instruction::rpop("l"))
        .step(Instruction::get("k"), Instruction::get("k"))
        .build();

    let direct = MemoryStore::new();
    let expected = direct.submit_batch(plan.main()).await.unwrap();

    let h = Harness::new();
    let replies = h.run(&plan).await.into_result().unwrap();

    assert_eq!(replies, expected);
    assert_eq!(h.store.snapshot(), direct.snapshot());
}

#[tokio::test]
async fn rollback_sequence_is_never_sent_on_commit() {
    let h = Harness::new().abc();
    let plan = counters(&["a", "c"]);

    h.run(&plan).await;

    let sent = h.store.submissions();
    assert_eq!(sent, vec![plan.main().to_vec()]);
}

// ============================================================================
// Empty plan
// ============================================================================

#[tokio::test]
async fn empty_plan_commits_without_round_trip() {
    let h = Harness::new();

    let outcome = h.run(&TransactionPlan::empty()).await;

    assert_eq!(outcome, TransactionOutcome::Committed { replies: vec![] });
    assert_eq!(h.store.submission_count(), 0);
    assert_eq!(h.coordinator.metrics().committed, 1);
}

#[tokio::test]
async fn empty_plan_round_trips_when_elision_disabled() {
    let h = Harness::with_config(CoordinatorConfig::new().elide_empty_batches(false));

    let outcome = h.run(&TransactionPlan::empty()).await;

    assert!(outcome.is_committed());
    assert_eq!(h.store.submission_count(), 1);
}

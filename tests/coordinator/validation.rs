//! Validation Tests
//!
//! Malformed instructions and plans are rejected before anything reaches
//! the store.

use crate::common::*;

#[test]
fn mismatched_lengths_rejected_at_construction() {
    let err = TransactionPlan::new(
        vec![
            Instruction::incr("a"),
            Instruction::incr("b"),
            Instruction::incr("c"),
        ],
        vec![Instruction::decr("a"), Instruction::decr("b")],
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert!(err.to_string().contains("3 main"), "{}", err);
}

#[test]
fn unsupported_command_rejected() {
    let err = Instruction::parse("FLUSHALL", vec![]).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn wrong_arity_rejected() {
    let err = Instruction::parse("INCR", vec![]).unwrap_err();
    assert!(err.is_validation());

    let err = Instruction::parse("SET", vec![Value::from("k")]).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn wrong_argument_type_rejected() {
    let err = Instruction::parse("INCRBY", vec![Value::from("k"), Value::from("2")]).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn plan_without_natural_inverse_rejected() {
    let err = TransactionPlan::builder()
        .reversible(Instruction::set("k", "v"))
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn oversized_plan_never_reaches_store() {
    let h = Harness::with_config(CoordinatorConfig::new().max_batch_len(2));

    let err = h.coordinator.execute_atomic(&incr_abc()).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(h.store.submission_count(), 0);
}

#[tokio::test]
async fn config_from_toml_applies() {
    let config = CoordinatorConfig::from_toml_str("max_batch_len = 3").unwrap();
    let h = Harness::with_config(config);

    assert!(h.run(&incr_abc()).await.is_committed());
    let err = h
        .coordinator
        .execute_atomic(&counters(&["a", "b", "c", "d"]))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

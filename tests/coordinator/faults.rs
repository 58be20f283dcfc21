//! Transport Fault Tests
//!
//! A lost main batch is a connection error with nothing compensated. A lost
//! compensation batch is a double fault: succeeded commands stay applied.

use std::time::Duration;

use async_trait::async_trait;

use crate::common::*;

/// Delays one submission, by ordinal, before it reaches the store.
struct StallOn {
    store: Arc<MemoryStore>,
    ordinal: usize,
    delay: Duration,
}

#[async_trait]
impl StoreClient for StallOn {
    async fn submit_batch(
        &self,
        batch: &[Instruction],
    ) -> std::result::Result<Vec<Reply>, TransportError> {
        if self.store.submission_count() == self.ordinal {
            tokio::time::sleep(self.delay).await;
        }
        self.store.submit_batch(batch).await
    }
}

// ============================================================================
// Main batch
// ============================================================================

#[tokio::test]
async fn lost_main_batch_is_connection_error() {
    init_tracing();
    let h = Harness::new().abc();
    h.store.fail_next(Fault::DropRequest);

    let err = h.coordinator.execute_atomic(&incr_abc()).await.unwrap_err();

    assert!(matches!(err, Error::Connection(TransportError::Closed(_))));
    assert!(err.is_fatal());
    assert_eq!(h.store.submission_count(), 1);
    assert_eq!(h.store.get_int("a"), Some(1));
}

#[tokio::test]
async fn lost_replies_are_not_compensated() {
    // The batch applied, then its replies were lost.
    let h = Harness::new().abc();
    h.store.fail_next(Fault::DropResponse);

    let err = h.coordinator.execute_atomic(&incr_abc()).await.unwrap_err();

    assert!(matches!(err, Error::Connection(_)));
    assert_eq!(h.store.submission_count(), 1);
    assert_eq!(h.store.get_int("a"), Some(2));
    assert_eq!(h.coordinator.metrics().connection_failures, 1);
}

#[tokio::test]
async fn main_batch_timeout_is_connection_error() {
    let store = Arc::new(MemoryStore::new().with_latency(Duration::from_secs(5)));
    let client = TimeoutClient::new(Arc::clone(&store), Duration::from_millis(20));
    let coordinator = TransactionCoordinator::new(client);

    let err = coordinator.execute_atomic(&incr_abc()).await.unwrap_err();

    assert!(matches!(err, Error::Connection(TransportError::Timeout(_))));
    assert_eq!(store.submission_count(), 1);
}

// ============================================================================
// Compensation batch
// ============================================================================

#[tokio::test]
async fn double_fault_leaves_succeeded_commands_applied() {
    init_tracing();
    let h = Harness::new().abc();
    h.store.fail_submission(1, Fault::DropRequest);

    let outcome = h.run(&incr_abc()).await;

    match &outcome {
        TransactionOutcome::CompensationFailed { failures, error } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].index, 1);
            assert!(matches!(error, TransportError::Closed(_)));
        }
        other => panic!("expected CompensationFailed, got {:?}", other),
    }
    assert_eq!(h.store.get_int("a"), Some(2));
    assert_eq!(h.store.get("b"), Some(Value::from("123e")));
    assert_eq!(h.store.get_int("c"), Some(2));
}

#[tokio::test]
async fn double_fault_error_carries_both_failures() {
    let h = Harness::new().abc();
    h.store.fail_submission(1, Fault::DropRequest);

    let err = h.run(&incr_abc()).await.into_result().unwrap_err();

    assert!(err.is_fatal());
    assert!(!err.is_retryable());
    assert_eq!(err.failures()[0].index, 1);
    let msg = err.to_string();
    assert!(msg.contains("index 1"), "{}", msg);
    assert!(msg.contains("connection closed"), "{}", msg);
}

#[tokio::test]
async fn compensation_timeout_is_compensation_failed() {
    let h = Harness::new().abc();
    let client = TimeoutClient::new(
        StallOn {
            store: Arc::clone(&h.store),
            ordinal: 1,
            delay: Duration::from_secs(5),
        },
        Duration::from_millis(50),
    );
    let coordinator = TransactionCoordinator::new(client);

    let outcome = coordinator.execute_atomic(&incr_abc()).await.unwrap();

    match &outcome {
        TransactionOutcome::CompensationFailed { failures, error } => {
            assert_eq!(failures[0].index, 1);
            assert!(matches!(error, TransportError::Timeout(_)));
        }
        other => panic!("expected CompensationFailed, got {:?}", other),
    }
    assert_eq!(h.store.submission_count(), 1);
    assert_eq!(h.store.get_int("a"), Some(2));
    assert_eq!(h.store.get_int("c"), Some(2));
    assert!(outcome.into_result().unwrap_err().is_fatal());
}

#[tokio::test]
async fn coordinator_never_retries() {
    let h = Harness::new().abc();
    h.store.fail_submission(1, Fault::DropRequest);

    h.run(&incr_abc()).await;

    assert_eq!(h.store.submission_count(), 2);
    assert_eq!(h.coordinator.metrics().compensation_failures, 1);
}

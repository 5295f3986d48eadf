//! Flow store tests

use std::time::Duration;

use cw_core::domain::flows::{AuthFlow, FlowKind};
use cw_core::errors::FlowError;
use uuid::Uuid;

use crate::cache::FlowStore;

#[tokio::test]
async fn test_insert_and_checkout() {
    let store = FlowStore::new(Duration::from_secs(60));
    let id = store.insert(AuthFlow::start(FlowKind::Signup)).await;

    let guard = store.checkout(id).await.unwrap();
    assert_eq!(guard.kind(), FlowKind::Signup);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let store = FlowStore::new(Duration::from_secs(60));
    assert_eq!(
        store.checkout(Uuid::new_v4()).await.unwrap_err(),
        FlowError::NotFound
    );
}

#[tokio::test]
async fn test_concurrent_checkout_is_rejected() {
    let store = FlowStore::new(Duration::from_secs(60));
    let id = store.insert(AuthFlow::start(FlowKind::LoginCode)).await;

    let held = store.checkout(id).await.unwrap();
    assert_eq!(
        store.checkout(id).await.unwrap_err(),
        FlowError::SubmissionInProgress
    );

    drop(held);
    assert!(store.checkout(id).await.is_ok());
}

#[tokio::test]
async fn test_mutations_persist_between_checkouts() {
    let store = FlowStore::new(Duration::from_secs(60));
    let id = store.insert(AuthFlow::start(FlowKind::Signup)).await;

    {
        let mut guard = store.checkout(id).await.unwrap();
        *guard = AuthFlow::start(FlowKind::PasswordReset);
    }

    let guard = store.checkout(id).await.unwrap();
    assert_eq!(guard.kind(), FlowKind::PasswordReset);
}

#[tokio::test]
async fn test_expired_flow_is_not_found() {
    let store = FlowStore::new(Duration::from_millis(20));
    let id = store.insert(AuthFlow::start(FlowKind::Signup)).await;

    tokio::time::sleep(Duration::from_millis(40)).await;

    assert_eq!(store.checkout(id).await.unwrap_err(), FlowError::NotFound);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_sweep_and_remove() {
    let store = FlowStore::new(Duration::from_millis(20));
    store.insert(AuthFlow::start(FlowKind::Signup)).await;
    tokio::time::sleep(Duration::from_millis(40)).await;
    let fresh = store.insert(AuthFlow::start(FlowKind::LoginCode)).await;

    // the insert already swept the stale flow
    assert_eq!(store.len().await, 1);
    assert_eq!(store.sweep_expired().await, 0);

    assert!(store.remove(fresh).await);
    assert!(!store.remove(fresh).await);
}

#[tokio::test]
async fn test_peek_does_not_wait_for_a_submission() {
    let store = FlowStore::new(Duration::from_secs(60));
    let id = store.insert(AuthFlow::start(FlowKind::LoginCode)).await;

    let mut held = store.checkout(id).await.unwrap();
    *held = AuthFlow::start(FlowKind::PasswordReset);

    // the step the submission started from
    let view = store.peek(id).await.unwrap();
    assert_eq!(view.kind, FlowKind::LoginCode);
    assert_eq!(view.step, "email_entry");

    drop(held);
    let view = store.peek(id).await.unwrap();
    assert_eq!(view.kind, FlowKind::PasswordReset);
}

#[tokio::test]
async fn test_peek_does_not_extend_ttl() {
    let store = FlowStore::new(Duration::from_millis(60));
    let id = store.insert(AuthFlow::start(FlowKind::Signup)).await;

    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _ = store.peek(id).await;
    }

    assert_eq!(store.peek(id).await.unwrap_err(), FlowError::NotFound);
    assert_eq!(store.checkout(id).await.unwrap_err(), FlowError::NotFound);
    assert_eq!(
        store.peek(Uuid::new_v4()).await.unwrap_err(),
        FlowError::NotFound
    );
}

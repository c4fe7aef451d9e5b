mod common;

use pointsledger_backend::errors::ErrorKind;
use pointsledger_backend::stores::AccountStore;
use pointsledger_backend::types::internal::{NewAccount, NewTransferRecord, Profile};

fn seeded(email: &str, points: i64) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        member_code: None,
        credential_digest: "seed:00".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        phone: String::new(),
        birthday: String::new(),
        points,
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let (_db, _store, service) = common::setup_ledger().await;

    service
        .register("a@x.com", "pw", Profile::default())
        .await
        .unwrap();

    let token = service.login("a@x.com", "pw").await.unwrap();
    assert_eq!(service.identity(&token).await.unwrap().email, "a@x.com");

    let err = service.login("a@x.com", "wrongpw").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn test_transfer_and_failed_transfer_leave_consistent_ledger() {
    let (db, store, service) = common::setup_ledger().await;
    store.create(seeded("a@x.com", 100)).await.unwrap();
    service
        .register("b@x.com", "pw", Profile::default())
        .await
        .unwrap();

    let record = service.transfer("a@x.com", "b@x.com", 30, "gift").await.unwrap();
    assert_eq!(record.amount, 30);
    assert_eq!(store.get_by_email("a@x.com").await.unwrap().points, 70);
    assert_eq!(store.get_by_email("b@x.com").await.unwrap().points, 30);
    assert_eq!(common::transfer_record_count(&db).await, 1);

    let err = service.transfer("a@x.com", "b@x.com", 1000, "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientPoints);
    assert_eq!(store.get_by_email("a@x.com").await.unwrap().points, 70);
    assert_eq!(store.get_by_email("b@x.com").await.unwrap().points, 30);
    assert_eq!(common::transfer_record_count(&db).await, 1);
}

#[tokio::test]
async fn test_unknown_recipient() {
    let (db, store, service) = common::setup_ledger().await;
    store.create(seeded("a@x.com", 100)).await.unwrap();

    let err = service
        .transfer("a@x.com", "nonexistent-code-or-email", 5, "")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UserNotFound);
    assert_eq!(common::transfer_record_count(&db).await, 0);
}

#[tokio::test]
async fn test_identity_for_missing_account_and_garbage_token() {
    let (_db, _store, service) = common::setup_ledger().await;
    let orphan_token = service.token_service().issue("gone@x.com").unwrap();

    let missing = service.identity(&orphan_token).await.unwrap_err();
    let garbage = service.identity("garbage-token").await.unwrap_err();

    assert_eq!(missing.kind(), ErrorKind::UserNotFound);
    assert_eq!(garbage.kind(), ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn test_failure_after_debit_rolls_back() {
    let (db, store, _service) = common::setup_ledger().await;
    store.create(seeded("a@x.com", 50)).await.unwrap();

    // Debit succeeds, credit finds no row, so the whole unit must roll back
    let err = store
        .apply_transfer(NewTransferRecord {
            from_email: "a@x.com".to_string(),
            to_email: "vanished@x.com".to_string(),
            to_identifier: "vanished@x.com".to_string(),
            amount: 20,
            note: String::new(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UserNotFound);
    assert_eq!(store.get_by_email("a@x.com").await.unwrap().points, 50);
    assert_eq!(common::transfer_record_count(&db).await, 0);
}

#[tokio::test]
async fn test_member_code_round_trip() {
    let (_db, store, service) = common::setup_ledger().await;
    store.create(seeded("a@x.com", 10)).await.unwrap();
    service
        .register("b@x.com", "pw", Profile::default())
        .await
        .unwrap();

    let code = service.assign_member_code("b@x.com").await.unwrap();
    let record = service.transfer("a@x.com", &code, 4, "by code").await.unwrap();

    assert_eq!(record.to_email, "b@x.com");
    assert_eq!(record.to_identifier, code);
    assert_eq!(store.get_by_email("b@x.com").await.unwrap().points, 4);
    let recent = service.recent_recipients("a@x.com", 10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].member_code.as_deref(), Some(code.as_str()));
}

mod common;

use pointsledger_backend::errors::ErrorKind;
use pointsledger_backend::stores::AccountStore;
use pointsledger_backend::types::internal::NewAccount;

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

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_transfers_never_overdraw_sender() {
    let (db, store, service) = common::setup_ledger().await;
    store.create(seeded("a@x.com", 100)).await.unwrap();
    store.create(seeded("b@x.com", 0)).await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.transfer("a@x.com", "b@x.com", 10, "").await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(err) => assert_eq!(err.kind(), ErrorKind::InsufficientPoints),
        }
    }

    assert_eq!(succeeded, 10);
    assert_eq!(store.get_by_email("a@x.com").await.unwrap().points, 0);
    assert_eq!(store.get_by_email("b@x.com").await.unwrap().points, 100);
    assert_eq!(common::transfer_record_count(&db).await, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_opposing_transfers_conserve_total() {
    let (db, store, service) = common::setup_ledger().await;
    store.create(seeded("a@x.com", 50)).await.unwrap();
    store.create(seeded("b@x.com", 50)).await.unwrap();

    let handles: Vec<_> = (0..30)
        .map(|i| {
            let service = service.clone();
            let (from, to) = if i % 2 == 0 {
                ("a@x.com", "b@x.com")
            } else {
                ("b@x.com", "a@x.com")
            };
            tokio::spawn(async move { service.transfer(from, to, 7, "").await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }

    let a = store.get_by_email("a@x.com").await.unwrap().points;
    let b = store.get_by_email("b@x.com").await.unwrap().points;
    assert!(a >= 0 && b >= 0);
    assert_eq!(a + b, 100);
    assert_eq!(common::transfer_record_count(&db).await, succeeded);
}

//! Behaviour every `UserRepository` backend must share.
//!
//! Each backend's test module runs these against a fresh instance.

use std::collections::HashSet;
use std::sync::Arc;
use userbase_core::{to_storage, User, UserRecord, UserRepository, UserbaseError};

pub fn record(first_name: &str, last_name: &str, age: i64) -> UserRecord {
    to_storage(User::new(first_name, last_name, age))
}

pub async fn empty_store_lists_nothing(repo: &dyn UserRepository) {
    let users = repo.list_all().await.unwrap();
    assert!(users.is_empty());
}

pub async fn insert_then_get(repo: &dyn UserRepository) {
    let record = record("Ada", "Lovelace", 36);
    let identifier = record.identifier.clone();

    let stored = repo.insert(record).await.unwrap();
    assert_eq!(stored.identifier, identifier);

    let fetched = repo.get_by_identifier(&identifier).await.unwrap();
    assert_eq!(fetched.identifier, identifier);
    assert_eq!(fetched.first_name, "Ada");
    assert_eq!(fetched.last_name, "Lovelace");
    assert_eq!(fetched.age, 36);
}

pub async fn unknown_identifier_is_not_found(repo: &dyn UserRepository) {
    repo.insert(record("Ada", "Lovelace", 36)).await.unwrap();

    let err = repo.get_by_identifier("never-created").await.unwrap_err();
    assert!(matches!(err, UserbaseError::NotFound(id) if id == "never-created"));
}

pub async fn duplicate_identifier_is_rejected(repo: &dyn UserRepository) {
    let first = record("Ada", "Lovelace", 36);
    let mut second = record("Charles", "Babbage", 79);
    second.identifier = first.identifier.clone();

    repo.insert(first).await.unwrap();
    let err = repo.insert(second).await.unwrap_err();
    assert!(err.is_storage());

    // the original survives untouched
    let users = repo.list_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].first_name, "Ada");
}

pub async fn list_returns_every_record(repo: &dyn UserRepository) {
    let names = [("Ada", "Lovelace"), ("Grace", "Hopper"), ("Alan", "Turing")];
    for (i, (first, last)) in names.iter().enumerate() {
        repo.insert(record(first, last, 30 + i as i64)).await.unwrap();
    }

    let users = repo.list_all().await.unwrap();
    let firsts: HashSet<String> = users.into_iter().map(|u| u.first_name).collect();
    let expected: HashSet<String> = names.iter().map(|(f, _)| f.to_string()).collect();
    assert_eq!(firsts, expected);
}

pub async fn concurrent_inserts(repo: Arc<dyn UserRepository>) {
    let before = repo.list_all().await.unwrap().len();

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.insert(record("User", &format!("Number{}", i), i))
                    .await
                    .unwrap()
                    .identifier
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(ids.len(), 100);

    let users = repo.list_all().await.unwrap();
    assert_eq!(users.len(), before + 100);
    for id in &ids {
        repo.get_by_identifier(id).await.unwrap();
    }
}

//! PostgreSQL repository tests.
//!
//! These need a running database: set `DATABASE_URL` and run
//! `cargo test -- --ignored`.

mod common;

use link_registry::domain::entities::NewLink;
use link_registry::domain::repositories::LinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_if_absent(pool: PgPool) {
    let repo = common::pg_repository(pool);

    let link = repo
        .insert_if_absent(NewLink::new("test123", "https://example.com"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.target_url, "https://example.com");
    assert_eq!(link.total_clicks, 0);
    assert!(link.last_clicked_at.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_if_absent_duplicate(pool: PgPool) {
    common::create_test_link(&pool, "dup123", "https://example.com").await;
    let repo = common::pg_repository(pool);

    let result = repo
        .insert_if_absent(NewLink::new("dup123", "https://other.com"))
        .await
        .unwrap();

    assert!(result.is_none());
    let stored = repo.find_by_code("dup123").await.unwrap().unwrap();
    assert_eq!(stored.target_url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_insert_same_code(pool: PgPool) {
    const N: usize = 20;

    let repo = Arc::new(common::pg_repository(pool));

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let repo = repo.clone();
            let new_link = NewLink::new("race01", format!("https://example.com/{i}"));
            tokio::spawn(async move { repo.insert_if_absent(new_link).await })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        if let Some(link) = handle.await.unwrap().unwrap() {
            winners.push(link);
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(repo.count().await.unwrap(), 1);

    let stored = repo.find_by_code("race01").await.unwrap().unwrap();
    assert_eq!(stored.target_url, winners[0].target_url);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = common::pg_repository(pool);

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_visit(pool: PgPool) {
    common::create_test_link(&pool, "visit1", "https://example.com").await;
    let repo = common::pg_repository(pool);

    let target = repo.record_visit("visit1").await.unwrap();
    assert_eq!(target.as_deref(), Some("https://example.com"));

    let link = repo.find_by_code("visit1").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 1);
    assert!(link.last_clicked_at.is_some());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_visit_missing(pool: PgPool) {
    let repo = common::pg_repository(pool);

    assert!(repo.record_visit("nothere").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_record_visit(pool: PgPool) {
    const N: usize = 50;

    common::create_test_link(&pool, "hot123", "https://example.com").await;
    let repo = Arc::new(common::pg_repository(pool));

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_visit("hot123").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    let link = repo.find_by_code("hot123").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, N as i64);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete(pool: PgPool) {
    common::create_test_link(&pool, "del123", "https://example.com").await;
    let repo = common::pg_repository(pool);

    assert!(repo.delete("del123").await.unwrap());
    assert!(!repo.delete("del123").await.unwrap());
    assert!(repo.find_by_code("del123").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_filter(pool: PgPool) {
    common::create_test_link(&pool, "Promo01", "https://shop.example.com").await;
    common::create_test_link(&pool, "docs001", "https://docs.rs/sqlx").await;
    common::create_test_link(&pool, "pct5000", "https://example.com/50%off").await;
    let repo = common::pg_repository(pool);

    assert_eq!(repo.list(None).await.unwrap().len(), 3);

    let promo = repo.list(Some("PROMO".to_string())).await.unwrap();
    assert_eq!(promo.len(), 1);
    assert_eq!(promo[0].code, "Promo01");

    let docs = repo.list(Some("Docs.RS".to_string())).await.unwrap();
    assert_eq!(docs.len(), 1);

    let literal = repo.list(Some("%".to_string())).await.unwrap();
    assert_eq!(literal.len(), 1);
    assert_eq!(literal[0].code, "pct5000");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = common::pg_repository(pool);
    for code in ["first1", "second", "third3"] {
        repo.insert_if_absent(NewLink::new(code, "https://example.com"))
            .await
            .unwrap();
    }

    let codes: Vec<String> = repo
        .list(None)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.code)
        .collect();

    assert_eq!(codes, vec!["third3", "second", "first1"]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_count_and_ping(pool: PgPool) {
    common::create_test_link(&pool, "count1", "https://example.com").await;
    let repo = common::pg_repository(pool);

    assert!(repo.ping().await.is_ok());
    assert_eq!(repo.count().await.unwrap(), 1);
}

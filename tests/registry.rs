//! Link registry behaviour against the in-memory repository.

mod common;

use link_registry::AppError;
use link_registry::utils::code_generator::validate_code;

#[tokio::test]
async fn test_create_then_resolve_then_get() {
    let service = common::memory_service();

    let link = service
        .create("https://example.com", Some("abcdef"))
        .await
        .unwrap();
    assert_eq!(link.code, "abcdef");
    assert_eq!(link.target_url, "https://example.com");
    assert_eq!(link.total_clicks, 0);
    assert!(link.last_clicked_at.is_none());

    let target = service.resolve("abcdef").await.unwrap();
    assert_eq!(target.as_deref(), Some("https://example.com"));

    let link = service.get("abcdef").await.unwrap();
    assert_eq!(link.total_clicks, 1);
    assert!(link.last_clicked_at.is_some());
}

#[tokio::test]
async fn test_generated_code_is_valid() {
    let service = common::memory_service();

    for _ in 0..50 {
        let link = service.create("https://example.com", None).await.unwrap();
        assert!(validate_code(&link.code));
    }

    assert_eq!(service.count().await.unwrap(), 50);
}

#[tokio::test]
async fn test_invalid_url_creates_nothing() {
    let service = common::memory_service();

    let result = service.create("not-a-url", None).await;

    assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    assert_eq!(service.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_codes_rejected() {
    let service = common::memory_service();

    for code in ["abc", "abcdefghi", "abc_12", "abc 123", "ab-cd-ef", "ñandú1"] {
        let result = service.create("https://example.com", Some(code)).await;
        assert!(
            matches!(result, Err(AppError::InvalidCode { .. })),
            "{code:?} should be rejected"
        );
    }

    assert_eq!(service.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_code_conflicts() {
    let service = common::memory_service();

    service
        .create("https://example.com", Some("abc123"))
        .await
        .unwrap();

    let second = service.create("https://other.com", Some("abc123")).await;
    assert!(matches!(second, Err(AppError::CodeConflict { .. })));

    let link = service.get("abc123").await.unwrap();
    assert_eq!(link.target_url, "https://example.com");
}

#[tokio::test]
async fn test_remove_then_lookups_miss() {
    let service = common::memory_service();
    service
        .create("https://example.com", Some("abc123"))
        .await
        .unwrap();

    assert!(service.remove("abc123").await.unwrap());
    assert!(!service.remove("abc123").await.unwrap());

    assert!(matches!(service.get("abc123").await, Err(AppError::NotFound { .. })));
    assert!(service.resolve("abc123").await.unwrap().is_none());
    assert_eq!(service.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_code_reusable_after_remove() {
    let service = common::memory_service();
    service
        .create("https://example.com", Some("reuse1"))
        .await
        .unwrap();
    service.remove("reuse1").await.unwrap();

    let link = service
        .create("https://new.example.com", Some("reuse1"))
        .await
        .unwrap();
    assert_eq!(link.total_clicks, 0);
    assert_eq!(link.target_url, "https://new.example.com");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_are_all_counted() {
    const N: usize = 200;

    let service = common::memory_service();
    service
        .create("https://example.com", Some("hot123"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.resolve("hot123").await })
        })
        .collect();

    for handle in handles {
        let target = handle.await.unwrap().unwrap();
        assert_eq!(target.as_deref(), Some("https://example.com"));
    }

    let link = service.get("hot123").await.unwrap();
    assert_eq!(link.total_clicks, N as i64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_same_code_single_winner() {
    const N: usize = 32;

    let service = common::memory_service();

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(&format!("https://example.com/{i}"), Some("race01"))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::CodeConflict { .. }) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, N - 1);
}

#[tokio::test]
async fn test_list_filter_and_order() {
    let service = common::memory_service();
    service
        .create("https://docs.rs/tokio", Some("tokio01"))
        .await
        .unwrap();
    service
        .create("https://example.com/shop", Some("Promo01"))
        .await
        .unwrap();
    service
        .create("https://crates.io", Some("crates1"))
        .await
        .unwrap();

    let all: Vec<String> = service
        .list(None)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.code)
        .collect();
    assert_eq!(all, vec!["crates1", "Promo01", "tokio01"]);

    let promo = service.list(Some("promo")).await.unwrap();
    assert_eq!(promo.len(), 1);
    assert_eq!(promo[0].code, "Promo01");

    let by_url = service.list(Some("DOCS.RS")).await.unwrap();
    assert_eq!(by_url.len(), 1);
    assert_eq!(by_url[0].code, "tokio01");

    assert!(service.list(Some("nothing")).await.unwrap().is_empty());
}

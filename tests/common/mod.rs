#![allow(dead_code)]

use axum_test::TestServer;
use link_registry::application::services::LinkService;
use link_registry::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use link_registry::routes::router;
use link_registry::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub fn memory_service() -> Arc<LinkService<MemoryLinkRepository>> {
    Arc::new(LinkService::new(Arc::new(MemoryLinkRepository::new())))
}

pub fn pg_repository(pool: PgPool) -> PgLinkRepository {
    PgLinkRepository::new(Arc::new(pool))
}

pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(MemoryLinkRepository::new()), 5)
}

/// Full route table backed by an in-memory repository.
pub fn create_test_server() -> (TestServer, AppState) {
    let state = create_test_state();
    let server = TestServer::new(router(state.clone())).unwrap();
    (server, state)
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO links (code, target_url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

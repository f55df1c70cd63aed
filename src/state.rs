//! Shared state injected into every HTTP handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Application state cloned into each request.
///
/// The storage handle is passed in explicitly, so the same router runs against
/// PostgreSQL in production and an in-memory repository in tests.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
}

impl AppState {
    /// Builds state around a repository, with the given collision retry budget.
    pub fn new(link_repository: Arc<dyn LinkRepository>, max_code_attempts: usize) -> Self {
        let link_service =
            LinkService::new(link_repository).with_max_code_attempts(max_code_attempts);

        Self {
            link_service: Arc::new(link_service),
        }
    }
}

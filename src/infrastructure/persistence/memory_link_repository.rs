//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    links: HashMap<String, Link>,
}

/// Link storage backed by a mutex-guarded map.
///
/// Each operation holds the lock for its whole duration, which gives the same
/// atomicity guarantees as the single-statement PostgreSQL queries. Intended for
/// tests and local experiments; data does not survive a restart.
#[derive(Default)]
pub struct MemoryLinkRepository {
    store: Mutex<Store>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Option<Link>, AppError> {
        let mut store = self.store();

        if store.links.contains_key(&new_link.code) {
            return Ok(None);
        }

        store.next_id += 1;
        let link = Link::new(
            store.next_id,
            new_link.code,
            new_link.target_url,
            Utc::now(),
            0,
            None,
        );
        store.links.insert(link.code.clone(), link.clone());

        Ok(Some(link))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.store().links.get(code).cloned())
    }

    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut store = self.store();

        Ok(store.links.get_mut(code).map(|link| {
            link.total_clicks += 1;
            link.last_clicked_at = Some(Utc::now());
            link.target_url.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.store().links.remove(code).is_some())
    }

    async fn list(&self, filter: Option<String>) -> Result<Vec<Link>, AppError> {
        let needle = filter.map(|f| f.to_lowercase());

        let mut links: Vec<Link> = self
            .store()
            .links
            .values()
            .filter(|link| match &needle {
                Some(n) => {
                    link.code.to_lowercase().contains(n)
                        || link.target_url.to_lowercase().contains(n)
                }
                None => true,
            })
            .cloned()
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(links)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store().links.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

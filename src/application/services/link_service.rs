//! Link registry: creation, resolution, and lookup of short links.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved_code, validate_code};
use crate::utils::url_validator::is_valid_url;

/// Default number of generated codes tried before giving up on a collision streak.
pub const DEFAULT_CODE_ATTEMPTS: usize = 5;

/// Service mediating every read and write of links.
///
/// Holds no locks and no cache. Uniqueness of codes relies on the repository's
/// atomic insert-if-absent, and visit counting on its atomic
/// increment-and-return, so the service can be shared freely across request
/// handlers.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    max_code_attempts: usize,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self {
            link_repository,
            max_code_attempts: DEFAULT_CODE_ATTEMPTS,
        }
    }

    /// Sets how many generated codes are tried when each one collides.
    ///
    /// Values below 1 are treated as 1.
    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `target_url` - Absolute URL to redirect to, stored as given
    /// - `requested_code` - Caller-chosen code; a random one is generated when `None`
    ///
    /// # Code Allocation
    ///
    /// - A requested code is inserted once. If it is taken the call fails; the code
    ///   is never altered or retried.
    /// - A generated code that collides is replaced by a fresh one, up to the
    ///   configured number of attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL is not absolute with a host.
    /// Returns [`AppError::InvalidCode`] if the requested code is malformed or reserved.
    /// Returns [`AppError::CodeConflict`] if the requested code is taken, or every
    /// generated attempt collided.
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    pub async fn create(
        &self,
        target_url: &str,
        requested_code: Option<&str>,
    ) -> Result<Link, AppError> {
        if !is_valid_url(target_url) {
            return Err(AppError::invalid_url(target_url));
        }

        match requested_code {
            Some(code) => {
                if !validate_code(code) || is_reserved_code(code) {
                    return Err(AppError::invalid_code(code));
                }

                let link = self
                    .link_repository
                    .insert_if_absent(NewLink::new(code, target_url))
                    .await?
                    .ok_or_else(|| AppError::code_conflict(code))?;

                Ok(self.created(link))
            }
            None => self.create_with_generated_code(target_url).await,
        }
    }

    async fn create_with_generated_code(&self, target_url: &str) -> Result<Link, AppError> {
        let mut last_code = String::new();

        for attempt in 1..=self.max_code_attempts {
            let code = generate_code();

            if let Some(link) = self
                .link_repository
                .insert_if_absent(NewLink::new(code.as_str(), target_url))
                .await?
            {
                return Ok(self.created(link));
            }

            metrics::counter!("code_collisions_total").increment(1);
            warn!(code = %code, attempt, "Generated code collided with an existing link");
            last_code = code;
        }

        Err(AppError::code_conflict(last_code))
    }

    fn created(&self, link: Link) -> Link {
        metrics::counter!("links_created_total").increment(1);
        info!(code = %link.code, target_url = %link.target_url, "Link created");
        link
    }

    /// Resolves a code to its target URL, recording the visit.
    ///
    /// The counter increment, the `last_clicked_at` update, and the read of the
    /// target happen in one atomic repository call. Callers that must not lose a
    /// visit when the request is abandoned should drive this future to completion
    /// in a detached task.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the link exists; its counter has been advanced by one
    /// - `Ok(None)` if no link has this code; nothing was modified
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, AppError> {
        let target = self.link_repository.record_visit(code).await?;

        match &target {
            Some(url) => {
                metrics::counter!("links_resolved_total").increment(1);
                debug!(code, target_url = %url, "Link resolved");
            }
            None => debug!(code, "Resolve for unknown code"),
        }

        Ok(target)
    }

    /// Retrieves a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    pub async fn get(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))
    }

    /// Lists links newest first, optionally filtered by a case-insensitive
    /// substring of the code or target URL.
    ///
    /// An empty filter lists everything.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<Link>, AppError> {
        let filter = filter.filter(|f| !f.is_empty()).map(str::to_string);
        self.link_repository.list(filter).await
    }

    /// Permanently deletes a link.
    ///
    /// Returns `true` if a link was removed, `false` if the code did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    pub async fn remove(&self, code: &str) -> Result<bool, AppError> {
        let removed = self.link_repository.delete(code).await?;

        if removed {
            metrics::counter!("links_removed_total").increment(1);
            info!(code, "Link removed");
        }

        Ok(removed)
    }

    /// Counts all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Checks that the underlying storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] if it is not.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

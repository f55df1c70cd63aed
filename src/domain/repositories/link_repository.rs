//! Repository trait for short link storage.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage collaborator for links.
///
/// Every method is a single round-trip. Implementations must make
/// [`insert_if_absent`](Self::insert_if_absent) and [`record_visit`](Self::record_visit)
/// atomic with respect to concurrent callers; the service layer performs no locking.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts the link unless its code is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with storage-assigned fields when the row was created
    /// - `Ok(None)` if a link with the same code already exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Option<Link>, AppError>;

    /// Finds a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Increments the visit counter, stamps `last_clicked_at`, and returns the
    /// target URL, all as one atomic operation.
    ///
    /// Returns `Ok(None)` without mutating anything if the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Hard-deletes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the code did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Lists links newest first.
    ///
    /// When `filter` is present, only links whose code or target URL contain it
    /// (case-insensitively) are returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn list(&self, filter: Option<String>) -> Result<Vec<Link>, AppError>;

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that storage is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}

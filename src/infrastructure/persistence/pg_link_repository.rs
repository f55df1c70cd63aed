//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape shared by every query that returns a whole link.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    target_url: String,
    created_at: DateTime<Utc>,
    total_clicks: i64,
    last_clicked_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.code,
            row.target_url,
            row.created_at,
            row.total_clicks,
            row.last_clicked_at,
        )
    }
}

/// PostgreSQL repository for link storage.
///
/// Uniqueness of `code` is enforced by the `links_code_key` constraint, and the
/// visit counter is advanced by a single `UPDATE ... RETURNING` statement, so no
/// explicit transactions are needed.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, target_url)
            VALUES ($1, $2)
            ON CONFLICT (code) DO NOTHING
            RETURNING id, code, target_url, created_at, total_clicks, last_clicked_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| AppError::storage("insert link", e))?;

        Ok(row.map(Link::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target_url, created_at, total_clicks, last_clicked_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| AppError::storage("find link", e))?;

        Ok(row.map(Link::from))
    }

    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET total_clicks = total_clicks + 1, last_clicked_at = NOW()
            WHERE code = $1
            RETURNING target_url
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| AppError::storage("record visit", e))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| AppError::storage("delete link", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: Option<String>) -> Result<Vec<Link>, AppError> {
        let pattern = filter.map(|f| format!("%{}%", escape_like(&f)));

        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target_url, created_at, total_clicks, last_clicked_at
            FROM links
            WHERE $1::text IS NULL OR code ILIKE $1 OR target_url ILIKE $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| AppError::storage("list links", e))?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| AppError::storage("count links", e))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| AppError::storage("ping", e))?;

        Ok(())
    }
}

/// Escapes `ILIKE` wildcards so the filter is matched literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

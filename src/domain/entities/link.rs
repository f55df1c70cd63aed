//! Link entity representing a short code mapped to a target URL.

use chrono::{DateTime, Utc};

/// A short link together with its visit statistics.
///
/// `code` and `target_url` never change after creation. `total_clicks` and
/// `last_clicked_at` are advanced together by each successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        created_at: DateTime<Utc>,
        total_clicks: i64,
        last_clicked_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            created_at,
            total_clicks,
            last_clicked_at,
        }
    }

    /// Returns true if the link has been resolved at least once.
    pub fn was_visited(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for creating a new link.
///
/// Storage assigns `id` and `created_at`; counters start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

impl NewLink {
    pub fn new(code: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
        }
    }
}

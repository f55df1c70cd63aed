//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    /// Target URL. A missing value is reported as an invalid URL; any length
    /// is accepted.
    pub url: Option<String>,

    /// Optional short code; an empty string counts as absent.
    pub code: Option<String>,
}

impl CreateLinkRequest {
    /// Returns the requested code, treating an empty string as absent.
    pub fn requested_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Query string for `GET /api/links`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListLinksQuery {
    /// Case-insensitive substring matched against code and target URL.
    #[validate(length(max = 256, message = "Search text is too long"))]
    pub q: Option<String>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            created_at: link.created_at,
            total_clicks: link.total_clicks,
            last_clicked_at: link.last_clicked_at,
        }
    }
}

//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkResponse, ListLinksQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "code": "abc123" }
/// ```
///
/// `code` is optional; a random 6-character code is generated when omitted.
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL or code.
/// Returns 409 Conflict if the code is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let url = payload.url.as_deref().unwrap_or_default();

    let link = state
        .link_service
        .create(url, payload.requested_code())
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?q=text`
///
/// `q` filters by a case-insensitive substring of the code or target URL.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    query.validate()?;

    let links = state.link_service.list(query.q.as_deref()).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link with its visit statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get(&code).await?;

    Ok(Json(link.into()))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if !state.link_service.remove(&code).await? {
        return Err(AppError::not_found(code));
    }

    Ok(StatusCode::NO_CONTENT)
}

//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::{is_reserved_code, validate_code};

/// Redirects a short code to its target URL and records the visit.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject malformed and reserved codes without touching storage
/// 2. Resolve the code in a detached task, so a client that disconnects mid-request
///    cannot cancel the counter update
/// 3. Return 302 Found with `Location` set to the target URL
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !validate_code(&code) || is_reserved_code(&code) {
        return Err(AppError::not_found(code));
    }

    let link_service = state.link_service.clone();
    let lookup = code.clone();
    let target = tokio::spawn(async move { link_service.resolve(&lookup).await })
        .await
        .map_err(|e| AppError::storage("resolve task", e))??;

    let Some(target_url) = target else {
        return Err(AppError::not_found(code));
    };

    Ok((StatusCode::FOUND, [(header::LOCATION, location(&target_url)?)]).into_response())
}

/// Builds the `Location` header, falling back to the URL's percent-encoded
/// serialization when the stored text is not plain ASCII.
///
/// A stored target that cannot become a header is a server-side fault: the
/// visit has already been counted.
fn location(target_url: &str) -> Result<HeaderValue, AppError> {
    if target_url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(target_url)
    {
        return Ok(value);
    }

    let url = Url::parse(target_url).map_err(|e| AppError::storage("stored target URL", e))?;
    HeaderValue::from_str(url.as_str()).map_err(|e| AppError::storage("redirect location", e))
}

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Authentication middleware for admin routes
///
/// Expects tokens in the `Authorization` header as `Bearer <token>`.
/// Validates against the tokens configured in `API_TOKENS`.
/// Tokens must be at least 32 characters and contain only alphanumeric characters, hyphens, and underscores.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    match authorize(&headers, &state.api_tokens) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Check the bearer token in `headers` against the configured tokens
pub fn authorize(headers: &HeaderMap, valid_tokens: &[String]) -> Result<(), AppError> {
    let auth_header = headers.get("authorization").ok_or(AppError::Unauthorized(
        "Missing Authorization header. Please provide a Bearer token.",
    ))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header format."))?;

    let provided_token = auth_str
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized(
            "Authorization header must use Bearer scheme (e.g., 'Authorization: Bearer <token>').",
        ))?
        .trim();

    if provided_token.len() < 32
        || !provided_token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::Unauthorized("Invalid token format."));
    }

    if valid_tokens.is_empty() {
        return Err(AppError::Misconfigured("API_TOKENS is empty"));
    }

    if !valid_tokens.iter().any(|t| t == provided_token) {
        return Err(AppError::Unauthorized("Invalid or expired token."));
    }

    Ok(())
}

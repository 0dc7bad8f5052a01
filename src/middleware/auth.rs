use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::AppState;

/// Auth gate for protected routes. The bearer token comes from the
/// Authorization header or from the `jwt` cookie set at login; a missing or
/// invalid token halts the pipeline with the 400 envelope and the wrapped
/// handler is never invoked.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        token_from_headers(request.headers()).ok_or_else(|| ApiError::bad_request("no token found"))?;

    let claims = state
        .tokens
        .verify(&token)
        .map_err(|_| ApiError::bad_request("Unauthorized"))?;

    // Verified claims travel with the request for downstream consumers
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Some(token) = value.to_str().ok().and_then(|s| s.strip_prefix("Bearer ")) {
            if !token.trim().is_empty() {
                return Some(token.to_string());
            }
        }
    }

    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|pair| pair.trim().strip_prefix("jwt="))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

use auth::BearerError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use super::router::AppState;
use crate::domain::account::models::UserId;

/// Extension type to store the authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Bearer credential from the `Authorization` header.
///
/// A header that is not valid visible ASCII counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    auth::extract_bearer(header).map_err(|e| {
        match e {
            BearerError::MissingToken => tracing::debug!("Missing bearer token"),
            BearerError::InvalidScheme => tracing::debug!("Malformed Authorization header"),
        }
        ApiError::Unauthorized
    })
}

/// Middleware that validates access tokens and adds the subject to request
/// extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(req.headers()).map_err(IntoResponse::into_response)?;

    let user_id = state
        .session_service
        .authenticate(token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Middleware that counts every request it wraps
pub async fn count_hits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.hits.record();
    next.run(req).await
}

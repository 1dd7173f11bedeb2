use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::create_user::ParseCredentialsError;
use super::create_user::UserResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UpdateCredentialsCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Replace the caller's email and password. The account is the subject of
/// the access token; the body carries no identifier.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .account_service
        .update_credentials(&authenticated.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for updating credentials (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    email: String,
    password: String,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateCredentialsCommand, ParseCredentialsError> {
        Ok(UpdateCredentialsCommand {
            email: EmailAddress::new(self.email)?,
            password: self.password,
        })
    }
}

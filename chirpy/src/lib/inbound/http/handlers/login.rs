use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .session_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for logging in (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, SessionError> {
        if self.email.trim().is_empty() {
            return Err(SessionError::Validation("email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(SessionError::Validation("password is required".to_string()));
        }

        Ok(LoginCommand {
            email: self.email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub token: String,
    pub refresh_token: String,
}

impl From<&Session> for LoginResponseData {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user.id.to_string(),
            email: session.user.email.as_str().to_string(),
            created_at: session.user.created_at,
            updated_at: session.user.updated_at,
            token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_rejected() {
        let blank_email = LoginRequest {
            email: "  ".to_string(),
            password: "pw".to_string(),
        };
        let blank_password = LoginRequest {
            email: "jesse@pinkman.com".to_string(),
            password: String::new(),
        };

        assert!(matches!(
            blank_email.try_into_command(),
            Err(SessionError::Validation(_))
        ));
        assert!(matches!(
            blank_password.try_into_command(),
            Err(SessionError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_email_reaches_the_service() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "pw".to_string(),
        };

        assert!(request.try_into_command().is_ok());
    }
}

use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsResponseData {
    pub hits: u64,
}

pub async fn metrics(State(state): State<AppState>) -> ApiSuccess<MetricsResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MetricsResponseData {
            hits: state.hits.count(),
        },
    )
}

/// Wipe accounts and refresh tokens and zero the hit counter. Refused
/// outside the dev platform.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<MetricsResponseData>, ApiError> {
    state
        .session_service
        .reset()
        .await
        .map_err(ApiError::from)?;

    let previous = state.hits.reset();
    tracing::info!(previous_hits = previous, "Development state reset");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MetricsResponseData {
            hits: state.hits.count(),
        },
    ))
}

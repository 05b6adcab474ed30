use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Close the current session. Deliberately unguarded: clearing an already
/// absent session is a successful no-op.
pub async fn logout(
    State(state): State<AppState>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    state.auth_service.logout().await;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData { logged_out: true },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub logged_out: bool,
}

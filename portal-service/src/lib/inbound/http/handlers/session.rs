use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::login::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentSession;

/// Who is currently logged in. The session-guard middleware has already
/// rejected anonymous callers with 401.
pub async fn current_session(
    Extension(session): Extension<CurrentSession>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionResponseData {
            user: (&session.user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user: UserData,
}

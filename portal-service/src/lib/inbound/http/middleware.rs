use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::auth::models::PublicUser;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated session's user into handlers.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub user: PublicUser,
}

/// Session guard for protected routes.
///
/// Asks the auth facade for the current session; anonymous requests get a
/// 401 and never reach the handler. An expired session reads as anonymous
/// (and has been purged by the read).
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let user = state.auth_service.current_user().await.ok_or_else(|| {
        tracing::debug!(path = %req.uri().path(), "Rejected anonymous request");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Not authenticated"
            })),
        )
            .into_response()
    })?;

    req.extensions_mut().insert(CurrentSession { user });

    Ok(next.run(req).await)
}

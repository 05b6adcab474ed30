use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::events::AuditEntry;
use crate::domain::auth::models::Role;
use crate::inbound::http::middleware::CurrentSession;
use crate::inbound::http::router::AppState;

const DEFAULT_TAIL: usize = 50;

/// Recent audit entries, admin only.
pub async fn list_audit_entries(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> Result<ApiSuccess<AuditLogResponseData>, ApiError> {
    if session.user.role != Role::Admin {
        return Err(ApiError::Forbidden("Admin role required".to_string()));
    }

    let entries = state.audit_log.recent(DEFAULT_TAIL).await;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuditLogResponseData { entries },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditLogResponseData {
    pub entries: Vec<AuditEntry>,
}

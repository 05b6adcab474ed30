use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::PublicUser;
use crate::domain::auth::models::Role;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let identifier = state.sanitizer.sanitize(&body.identifier);
    if identifier.is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "Identifier is required".to_string(),
        ));
    }

    let user = state
        .auth_service
        .login(LoginCommand {
            identifier,
            password: body.password,
            remember: body.remember,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    identifier: String,
    password: String,
    #[serde(default)]
    remember: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub email: String,
    pub nickname: String,
    pub role: Role,
    pub group: String,
}

impl From<&PublicUser> for UserData {
    fn from(user: &PublicUser) -> Self {
        Self {
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            role: user.role,
            group: user.group.clone(),
        }
    }
}

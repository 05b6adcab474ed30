use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::InviteCodeError;
use crate::domain::auth::errors::NicknameError;
use crate::domain::auth::errors::PasswordPolicyError;
use crate::domain::auth::models::PublicUser;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Role;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::validation::EmailAddress;
use crate::domain::auth::validation::InviteCode;
use crate::domain::auth::validation::Nickname;
use crate::domain::auth::validation::Password;
use crate::domain::sanitize::Sanitizer;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command(&state.sanitizer)?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    nickname: String,
    email: String,
    password: String,
    confirm_password: String,
    invite_code: String,
    #[serde(default)]
    remember: bool,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Form incomplete: {0} is required")]
    Missing(&'static str),

    #[error("Invalid nickname: {0}")]
    Nickname(#[from] NicknameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Unacceptable password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid invite code")]
    InviteCode(#[from] InviteCodeError),
}

impl RegisterRequestBody {
    /// Sanitize the free-text fields, then promote everything to validated
    /// domain values. Passwords are compared, never sanitized.
    fn try_into_command(
        self,
        sanitizer: &Sanitizer,
    ) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let nickname = sanitizer.sanitize(&self.nickname);
        if nickname.is_empty() {
            return Err(ParseRegisterRequestError::Missing("nickname"));
        }
        let email = sanitizer.sanitize(&self.email);
        if email.is_empty() {
            return Err(ParseRegisterRequestError::Missing("email"));
        }
        let invite_code = sanitizer.sanitize(&self.invite_code);
        if invite_code.is_empty() {
            return Err(ParseRegisterRequestError::Missing("invite code"));
        }
        if self.password.is_empty() {
            return Err(ParseRegisterRequestError::Missing("password"));
        }
        if self.password != self.confirm_password {
            return Err(ParseRegisterRequestError::PasswordMismatch);
        }

        let nickname = Nickname::new(nickname)?;
        let email = EmailAddress::new(email)?;
        let password = Password::new(self.password)?;
        let invite = InviteCode::new(&invite_code)?;

        Ok(RegisterCommand {
            nickname,
            email,
            password,
            invite,
            remember: self.remember,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub email: String,
    pub nickname: String,
    pub role: Role,
    pub group: String,
}

impl From<&PublicUser> for RegisterResponseData {
    fn from(user: &PublicUser) -> Self {
        Self {
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            role: user.role,
            group: user.group.clone(),
        }
    }
}

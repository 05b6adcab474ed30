use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;

pub mod audit;
pub mod login;
pub mod logout;
pub mod register;
pub mod session;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    TooManyRequests(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::TooManyRequests(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // One message for both, so responses cannot be used to probe
            // which accounts exist.
            AuthError::UserNotFound(_) | AuthError::WrongPassword => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::DuplicateEmail(_) | AuthError::DuplicateNickname(_) => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::InvalidNickname(_)
            | AuthError::InvalidEmail(_)
            | AuthError::WeakPassword(_)
            | AuthError::InvalidInviteCode
            | AuthError::FormIncomplete(_) => ApiError::UnprocessableEntity(err.to_string()),
            AuthError::TooManyAttempts { .. } => ApiError::TooManyRequests(err.to_string()),
            AuthError::Storage(_) | AuthError::Internal(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_share_one_message() {
        let not_found = ApiError::from(AuthError::UserNotFound("ghost".to_string()));
        let wrong_password = ApiError::from(AuthError::WrongPassword);
        assert_eq!(not_found, wrong_password);
    }

    #[test]
    fn duplicate_identity_maps_to_conflict() {
        let err = ApiError::from(AuthError::DuplicateEmail("a@b.ru".to_string()));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn throttling_maps_to_too_many_requests() {
        let err = ApiError::from(AuthError::TooManyAttempts {
            retry_after_secs: 60,
        });
        assert!(matches!(err, ApiError::TooManyRequests(_)));
    }
}

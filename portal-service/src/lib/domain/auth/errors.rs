use thiserror::Error;

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for Nickname validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NicknameError {
    #[error("Nickname too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Nickname too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password acceptance failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain at least one letter")]
    MissingLetter,

    #[error("Password must contain at least one digit")]
    MissingDigit,
}

/// Error for invite code lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InviteCodeError {
    #[error("Unknown invite code")]
    Unknown,
}

/// Error for session store operations.
///
/// Read-side corruption is not an error: a record that fails to parse or
/// verify is treated as absent and purged.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("Session storage I/O failed: {0}")]
    Io(String),

    #[error("Session record signing failed: {0}")]
    Signing(String),
}

/// Top-level error for all auth facade operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (converted via #[from])
    #[error("Invalid nickname: {0}")]
    InvalidNickname(#[from] NicknameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Unacceptable password: {0}")]
    WeakPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Wrong password")]
    WrongPassword,

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Nickname already taken: {0}")]
    DuplicateNickname(String),

    #[error("Invalid invite code")]
    InvalidInviteCode,

    #[error("Form incomplete: {0} is required")]
    FormIncomplete(&'static str),

    #[error("Too many attempts, retry in {retry_after_secs} seconds")]
    TooManyAttempts { retry_after_secs: i64 },

    // Infrastructure errors
    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<InviteCodeError> for AuthError {
    fn from(_: InviteCodeError) -> Self {
        AuthError::InvalidInviteCode
    }
}

impl From<SessionStoreError> for AuthError {
    fn from(err: SessionStoreError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

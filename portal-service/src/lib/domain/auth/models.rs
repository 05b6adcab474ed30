use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::auth::errors::RoleError;
use crate::domain::auth::validation::EmailAddress;
use crate::domain::auth::validation::InviteCode;
use crate::domain::auth::validation::Nickname;
use crate::domain::auth::validation::Password;

/// Account role, assigned at registration by the invite code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Leader,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Leader => "leader",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "leader" => Ok(Role::Leader),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// User aggregate entity.
///
/// Demo accounts are seeded at startup; self-registered accounts live only in
/// the in-memory repository and disappear on restart.
#[derive(Debug, Clone)]
pub struct User {
    pub email: EmailAddress,
    pub nickname: Nickname,
    pub password_hash: String,
    pub role: Role,
    pub group: String,
    pub created_at: DateTime<Utc>,
}

/// The user fields safe to hand to clients and to persist in a session
/// record. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub email: String,
    pub nickname: String,
    pub role: Role,
    pub group: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            nickname: user.nickname.as_str().to_string(),
            role: user.role,
            group: user.group.clone(),
        }
    }
}

/// The minimal persisted proof of "who is currently logged in".
///
/// `expires_at` is stamped by the session store on persistent saves; volatile
/// sessions carry no expiry and die with the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub user: PublicUser,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Mint a fresh record for a user who just authenticated.
    pub fn new(user: &User) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user: PublicUser::from(user),
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |expires| expires < now)
    }
}

/// Command to authenticate an existing user.
///
/// `identifier` may be an email address or a nickname; the lookup is
/// case-insensitive either way. `remember` selects the durable storage slot.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub identifier: String,
    pub password: String,
    pub remember: bool,
}

/// Command to register a new account, built from already-validated values.
#[derive(Debug)]
pub struct RegisterCommand {
    pub nickname: Nickname,
    pub email: EmailAddress,
    pub password: Password,
    pub invite: InviteCode,
    pub remember: bool,
}

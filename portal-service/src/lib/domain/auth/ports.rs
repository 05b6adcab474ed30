use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::SessionStoreError;
use crate::domain::auth::events::AuditEvent;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::PublicUser;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::SessionRecord;
use crate::domain::auth::models::User;

/// Port for the auth facade: the only surface other components call.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Authenticate by email or nickname and open a fresh session.
    ///
    /// Idempotent under retry with the same correct credentials: every
    /// success re-creates the session record, never errors on "already
    /// logged in". A failure leaves any prior session untouched.
    ///
    /// # Errors
    /// * `FormIncomplete` - identifier or password empty
    /// * `UserNotFound` / `WrongPassword` - bad credentials (callers should
    ///   present both as one generic message)
    /// * `TooManyAttempts` - the identifier is throttled
    /// * `Storage` - the session could not be persisted
    async fn login(&self, command: LoginCommand) -> Result<PublicUser, AuthError>;

    /// Register a new account and open a session for it.
    ///
    /// Role and group come from the invite code. Fails without any state
    /// change when validation or uniqueness checks fail.
    ///
    /// # Errors
    /// * `DuplicateEmail` / `DuplicateNickname` - identity already taken
    /// * `Internal` - password hashing failed
    /// * `Storage` - the session could not be persisted
    async fn register(&self, command: RegisterCommand) -> Result<PublicUser, AuthError>;

    /// Close the current session. Idempotent; a no-op when anonymous.
    async fn logout(&self);

    /// Whether a well-formed, unexpired session currently exists.
    async fn is_authenticated(&self) -> bool;

    /// The current session's user, if any.
    async fn current_user(&self) -> Option<PublicUser>;

    /// Whether the current user holds the given role.
    async fn has_role(&self, role: Role) -> bool;

    /// Whether the current user belongs to the given group.
    async fn is_in_group(&self, group: &str) -> bool;
}

/// Persistence operations for user accounts.
///
/// Lookups are case-insensitive on both email and nickname.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `DuplicateEmail` - email already registered
    /// * `DuplicateNickname` - nickname already taken
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Find a user by nickname.
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, AuthError>;
}

/// The session store: the single slot-pair holding "who is logged in".
///
/// State machine: Anonymous -> (save) -> Authenticated -> (clear, or expiry
/// detected on read) -> Anonymous.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Persist a session record.
    ///
    /// `persistent` selects the durable slot (survives restart, stamped with
    /// an expiry) over the volatile one (dies with the process, no expiry).
    /// Either way the sibling slot is cleared: at most one active session.
    async fn save(&self, record: &SessionRecord, persistent: bool)
        -> Result<(), SessionStoreError>;

    /// Read the current session: volatile slot first, durable as fallback.
    ///
    /// Returns `None` when absent, unparsable, tampered with, or expired.
    /// Invalid records are purged as a side effect, not just skipped.
    async fn read(&self) -> Option<SessionRecord>;

    /// Remove both slots unconditionally. Idempotent.
    async fn clear(&self);
}

/// Audit trail for security-relevant events.
#[async_trait]
pub trait AuditLog: Send + Sync + 'static {
    /// Record one event. Must not fail the calling operation.
    async fn record(&self, event: AuditEvent);
}

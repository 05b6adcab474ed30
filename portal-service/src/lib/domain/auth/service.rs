use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::events::AuditEvent;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::PublicUser;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::SessionRecord;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::AuditLog;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::SessionStore;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::throttle::LoginThrottle;

/// The auth facade: composes the user repository, the session store, and the
/// audit log into login, registration, logout, and session reads.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR, SS, AL>
where
    UR: UserRepository,
    SS: SessionStore,
    AL: AuditLog,
{
    repository: Arc<UR>,
    sessions: Arc<SS>,
    audit: Arc<AL>,
    password_hasher: auth::PasswordHasher,
    throttle: LoginThrottle,
}

impl<UR, SS, AL> AuthService<UR, SS, AL>
where
    UR: UserRepository,
    SS: SessionStore,
    AL: AuditLog,
{
    /// Create a new auth service with injected dependencies.
    pub fn new(
        repository: Arc<UR>,
        sessions: Arc<SS>,
        audit: Arc<AL>,
        throttle: LoginThrottle,
    ) -> Self {
        Self {
            repository,
            sessions,
            audit,
            password_hasher: auth::PasswordHasher::new(),
            throttle,
        }
    }

    /// Look an identifier up as an email first, then as a nickname.
    async fn lookup(&self, identifier: &str) -> Result<Option<User>, AuthError> {
        if let Some(user) = self.repository.find_by_email(identifier).await? {
            return Ok(Some(user));
        }
        self.repository.find_by_nickname(identifier).await
    }
}

#[async_trait]
impl<UR, SS, AL> AuthServicePort for AuthService<UR, SS, AL>
where
    UR: UserRepository,
    SS: SessionStore,
    AL: AuditLog,
{
    async fn login(&self, command: LoginCommand) -> Result<PublicUser, AuthError> {
        let identifier = command.identifier.trim().to_string();
        if identifier.is_empty() {
            return Err(AuthError::FormIncomplete("identifier"));
        }
        if command.password.is_empty() {
            return Err(AuthError::FormIncomplete("password"));
        }

        let throttle_key = identifier.to_lowercase();
        if let Err(retry_after_secs) = self.throttle.check(&throttle_key).await {
            self.audit
                .record(AuditEvent::LoginThrottled {
                    identifier: identifier.clone(),
                })
                .await;
            return Err(AuthError::TooManyAttempts { retry_after_secs });
        }

        let user = match self.lookup(&identifier).await? {
            Some(user) => user,
            None => {
                self.throttle.record_failure(&throttle_key).await;
                self.audit
                    .record(AuditEvent::LoginFailed {
                        identifier: identifier.clone(),
                        reason: "user not found".to_string(),
                    })
                    .await;
                return Err(AuthError::UserNotFound(identifier));
            }
        };

        let password_matches = self
            .password_hasher
            .verify(&command.password, &user.password_hash)
            .map_err(|e| AuthError::Internal(format!("Password verification failed: {}", e)))?;

        if !password_matches {
            self.throttle.record_failure(&throttle_key).await;
            self.audit
                .record(AuditEvent::LoginFailed {
                    identifier,
                    reason: "wrong password".to_string(),
                })
                .await;
            return Err(AuthError::WrongPassword);
        }

        self.throttle.reset(&throttle_key).await;

        let record = SessionRecord::new(&user);
        self.sessions.save(&record, command.remember).await?;

        self.audit
            .record(AuditEvent::LoginSucceeded {
                email: record.user.email.clone(),
            })
            .await;
        tracing::info!(email = %record.user.email, "User logged in");

        Ok(record.user)
    }

    async fn register(&self, command: RegisterCommand) -> Result<PublicUser, AuthError> {
        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User {
            email: command.email,
            nickname: command.nickname,
            password_hash,
            role: command.invite.role(),
            group: command.invite.group().to_string(),
            created_at: Utc::now(),
        };
        let email = user.email.as_str().to_string();

        let created = match self.repository.create(user).await {
            Ok(created) => created,
            Err(err) => {
                self.audit
                    .record(AuditEvent::RegistrationFailed {
                        email,
                        reason: err.to_string(),
                    })
                    .await;
                return Err(err);
            }
        };

        // A successful registration behaves like a successful login.
        let record = SessionRecord::new(&created);
        self.sessions.save(&record, command.remember).await?;

        self.audit
            .record(AuditEvent::RegistrationSucceeded {
                email: record.user.email.clone(),
            })
            .await;
        tracing::info!(
            email = %record.user.email,
            role = %record.user.role,
            "Account registered"
        );

        Ok(record.user)
    }

    async fn logout(&self) {
        if let Some(record) = self.sessions.read().await {
            self.audit
                .record(AuditEvent::LoggedOut {
                    email: record.user.email,
                })
                .await;
        }
        self.sessions.clear().await;
    }

    async fn is_authenticated(&self) -> bool {
        self.sessions.read().await.is_some()
    }

    async fn current_user(&self) -> Option<PublicUser> {
        self.sessions.read().await.map(|record| record.user)
    }

    async fn has_role(&self, role: Role) -> bool {
        self.sessions
            .read()
            .await
            .map_or(false, |record| record.user.role == role)
    }

    async fn is_in_group(&self, group: &str) -> bool {
        self.sessions
            .read()
            .await
            .map_or(false, |record| record.user.group == group)
    }
}

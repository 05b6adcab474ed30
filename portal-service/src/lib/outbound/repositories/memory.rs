use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::validation::EmailAddress;
use crate::domain::auth::validation::Nickname;

/// The demo account table standing in for a real user database.
///
/// Plaintext here is seed input only: passwords are hashed before a user ever
/// reaches the repository.
const DEMO_USERS: [(&str, &str, &str, Role, &str); 3] = [
    (
        "student@uniportal.ru",
        "student123",
        "IvanStudent",
        Role::Student,
        "IT-101",
    ),
    (
        "leader@uniportal.ru",
        "leader123",
        "AnnaLeader",
        Role::Leader,
        "IT-101",
    ),
    (
        "admin@uniportal.ru",
        "admin123",
        "SysAdmin",
        Role::Admin,
        "IT-101",
    ),
];

/// In-memory user store.
///
/// Demo accounts are seeded at construction; self-registered accounts join
/// them for the lifetime of the process and vanish on restart. There is no
/// shared persistence by design.
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// Create a repository seeded with the demo account table.
    ///
    /// # Errors
    /// * `Internal` - seed data failed validation or hashing
    pub fn with_demo_users(hasher: &auth::PasswordHasher) -> Result<Self, AuthError> {
        let mut users = Vec::with_capacity(DEMO_USERS.len());

        for (email, password, nickname, role, group) in DEMO_USERS {
            let user = User {
                email: EmailAddress::new(email.to_string())
                    .map_err(|e| AuthError::Internal(format!("Bad demo email: {}", e)))?,
                nickname: Nickname::new(nickname.to_string())
                    .map_err(|e| AuthError::Internal(format!("Bad demo nickname: {}", e)))?,
                password_hash: hasher
                    .hash(password)
                    .map_err(|e| AuthError::Internal(format!("Demo seed hashing failed: {}", e)))?,
                role,
                group: group.to_string(),
                created_at: Utc::now(),
            };
            users.push(user);
        }

        tracing::info!(count = users.len(), "Demo user table seeded");

        Ok(Self {
            users: RwLock::new(users),
        })
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        // Uniqueness checks and the insert happen under one write lock.
        if users
            .iter()
            .any(|existing| existing.email.as_str().eq_ignore_ascii_case(user.email.as_str()))
        {
            return Err(AuthError::DuplicateEmail(user.email.as_str().to_string()));
        }
        if users.iter().any(|existing| {
            existing.nickname.as_str().to_lowercase() == user.nickname.as_str().to_lowercase()
        }) {
            return Err(AuthError::DuplicateNickname(
                user.nickname.as_str().to_string(),
            ));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.email.as_str().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        let wanted = nickname.to_lowercase();
        Ok(users
            .iter()
            .find(|user| user.nickname.as_str().to_lowercase() == wanted)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::validation::Password;

    fn user(email: &str, nickname: &str) -> User {
        User {
            email: EmailAddress::new(email.to_string()).unwrap(),
            nickname: Nickname::new(nickname.to_string()).unwrap(),
            password_hash: "$argon2id$test".to_string(),
            role: Role::Student,
            group: "IT-101".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_then_find_back() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("someone@example.com", "Someone"))
            .await
            .unwrap();

        let found = repository
            .find_by_email("SOMEONE@example.com")
            .await
            .unwrap();
        assert!(found.is_some());

        let found = repository.find_by_nickname("someone").await.unwrap();
        assert_eq!(found.unwrap().email.as_str(), "someone@example.com");

        assert!(repository
            .find_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("someone@example.com", "First"))
            .await
            .unwrap();

        let result = repository
            .create(user("Someone@Example.Com", "Second"))
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn duplicate_nickname_is_rejected_case_insensitively() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("first@example.com", "Someone"))
            .await
            .unwrap();

        let result = repository.create(user("second@example.com", "SOMEONE")).await;
        assert!(matches!(result, Err(AuthError::DuplicateNickname(_))));
    }

    #[tokio::test]
    async fn demo_seed_passwords_verify() {
        let hasher = auth::PasswordHasher::new();
        let repository = InMemoryUserRepository::with_demo_users(&hasher).unwrap();

        let student = repository
            .find_by_email("student@uniportal.ru")
            .await
            .unwrap()
            .expect("demo student missing");

        assert_eq!(student.role, Role::Student);
        assert!(hasher.verify("student123", &student.password_hash).unwrap());
        // Seed passwords satisfy the registration policy too.
        assert!(Password::new("student123".to_string()).is_ok());
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use portal_service::domain::auth::service::AuthService;
use portal_service::domain::auth::throttle::LoginThrottle;
use portal_service::domain::sanitize::Sanitizer;
use portal_service::inbound::http::router::create_router;
use portal_service::outbound::audit::TracingAuditLog;
use portal_service::outbound::repositories::InMemoryUserRepository;
use portal_service::outbound::storage::FileSlot;
use portal_service::outbound::storage::TokenSessionStore;
use portal_service::outbound::storage::VolatileSlot;

const TEST_SECRET: &[u8] = b"integration_test_secret_32_bytes!!";
const TEST_MAX_ATTEMPTS: u32 = 5;

/// Test application that spawns the real server on an ephemeral port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub durable_path: PathBuf,
}

impl TestApp {
    /// Spawn a fresh application with its own durable session file.
    pub async fn spawn() -> Self {
        let durable_path = std::env::temp_dir()
            .join("portal-service-tests")
            .join(format!("session-{}.json", uuid::Uuid::new_v4()));
        Self::spawn_with_durable_path(durable_path).await
    }

    /// Spawn an application over an existing durable session file, as a
    /// stand-in for a process restart.
    pub async fn spawn_with_durable_path(durable_path: PathBuf) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().expect("No local address").port();
        let address = format!("http://127.0.0.1:{}", port);

        let hasher = auth::PasswordHasher::new();
        let repository =
            Arc::new(InMemoryUserRepository::with_demo_users(&hasher).expect("Demo seed failed"));

        let sessions = Arc::new(TokenSessionStore::new(
            VolatileSlot::new(),
            FileSlot::new(durable_path.clone()),
            TEST_SECRET,
            24,
        ));

        let audit_log = Arc::new(TracingAuditLog::new());
        let throttle = LoginThrottle::new(TEST_MAX_ATTEMPTS, Duration::minutes(15));

        let auth_service = Arc::new(AuthService::new(
            repository,
            sessions,
            Arc::clone(&audit_log),
            throttle,
        ));
        let sanitizer = Arc::new(Sanitizer::new().expect("Sanitizer patterns failed to compile"));

        let application = create_router(auth_service, sanitizer, audit_log);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server crashed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            durable_path,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}

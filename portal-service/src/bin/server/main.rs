use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use portal_service::config::Config;
use portal_service::domain::auth::service::AuthService;
use portal_service::domain::auth::throttle::LoginThrottle;
use portal_service::domain::sanitize::Sanitizer;
use portal_service::inbound::http::router::create_router;
use portal_service::outbound::audit::TracingAuditLog;
use portal_service::outbound::repositories::InMemoryUserRepository;
use portal_service::outbound::storage::FileSlot;
use portal_service::outbound::storage::TokenSessionStore;
use portal_service::outbound::storage::VolatileSlot;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "portal-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_expiration_hours = config.session.expiration_hours,
        durable_path = %config.session.durable_path,
        throttle_max_attempts = config.throttle.max_attempts,
        "Configuration loaded"
    );

    let hasher = auth::PasswordHasher::new();
    let repository = Arc::new(
        InMemoryUserRepository::with_demo_users(&hasher)
            .map_err(|e| anyhow::anyhow!("Demo seed failed: {}", e))?,
    );

    let sessions = Arc::new(TokenSessionStore::new(
        VolatileSlot::new(),
        FileSlot::new(PathBuf::from(&config.session.durable_path)),
        config.session.secret.as_bytes(),
        config.session.expiration_hours,
    ));

    let audit_log = Arc::new(TracingAuditLog::new());

    let throttle = LoginThrottle::new(
        config.throttle.max_attempts,
        Duration::minutes(config.throttle.window_minutes),
    );

    let auth_service = Arc::new(AuthService::new(
        repository,
        sessions,
        Arc::clone(&audit_log),
        throttle,
    ));

    let sanitizer = Arc::new(Sanitizer::new()?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(auth_service, sanitizer, audit_log);
    axum::serve(http_listener, application).await?;

    Ok(())
}

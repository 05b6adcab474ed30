use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::audit::list_audit_entries;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::handlers::session::current_session;
use super::middleware::require_session;
use super::pages;
use crate::domain::auth::service::AuthService;
use crate::domain::sanitize::Sanitizer;
use crate::outbound::audit::TracingAuditLog;
use crate::outbound::repositories::InMemoryUserRepository;
use crate::outbound::storage::FileSlot;
use crate::outbound::storage::TokenSessionStore;
use crate::outbound::storage::VolatileSlot;

/// The concrete facade the HTTP layer is wired to.
pub type PortalAuthService = AuthService<
    InMemoryUserRepository,
    TokenSessionStore<VolatileSlot, FileSlot>,
    TracingAuditLog,
>;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<PortalAuthService>,
    pub sanitizer: Arc<Sanitizer>,
    pub audit_log: Arc<TracingAuditLog>,
}

pub fn create_router(
    auth_service: Arc<PortalAuthService>,
    sanitizer: Arc<Sanitizer>,
    audit_log: Arc<TracingAuditLog>,
) -> Router {
    let state = AppState {
        auth_service,
        sanitizer,
        audit_log,
    };

    // Server-rendered page shells, data-driven from the route table.
    let mut page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login));
    for route in pages::SECTION_ROUTES {
        page_routes = page_routes.route(route.path, get(move || async move { pages::section(&route) }));
    }

    let public_api = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout));

    let protected_api = Router::new()
        .route("/api/auth/session", get(current_session))
        .route("/api/audit/log", get(list_audit_entries))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(page_routes)
        .merge(public_api)
        .merge(protected_api)
        .fallback(pages::not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! Top-level router configuration combining the site, the JSON API and static files.
//!
//! # Route Structure
//!
//! - `/`, `/sobre`, `/metodo`, `/contacto`, `/blog/*` - Public pages (HTML)
//! - `POST /newsletter`, `POST /contacto`           - Site forms
//! - `/admin/*`                                     - Admin panel (browser session)
//! - `GET /health`                                  - Backend reachability
//! - `/api/*`                                       - JSON API (Bearer token for `/api/admin`)
//! - `/static/*`                                    - Static assets
//!
//! Anything else renders the 404 page.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, strict for form posts and admin routes
//! - **Authentication** - Bearer token + admin role (API) or browser session (site)
//! - **Sessions** - Server-side browser sessions for the site (admin and notices)
//! - **Timeout** - Upper bound on request handling
//! - **Path normalization** - Trailing slash handling

use std::time::Duration;

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::handlers::not_found_handler;
use crate::web::middleware::web_auth;
use crate::web::session;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

/// Which rate limiter a group of routes gets, if any.
#[derive(Debug, Clone, Copy)]
enum Limits {
    Off,
    On { behind_proxy: bool },
}

impl Limits {
    fn lenient(self, router: Router<AppState>) -> Router<AppState> {
        match self {
            Limits::Off => router,
            Limits::On { behind_proxy } => router.layer(rate_limit::layer(behind_proxy)),
        }
    }

    fn strict(self, router: Router<AppState>) -> Router<AppState> {
        match self {
            Limits::Off => router,
            Limits::On { behind_proxy } => router.layer(rate_limit::secure_layer(behind_proxy)),
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `request_timeout` - requests still running after this are answered with
///   `408 Request Timeout` and their handler is dropped
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    request_timeout: Duration,
) -> NormalizePath<Router> {
    let router = assemble(state, Limits::On { behind_proxy })
        .layer(TimeoutLayer::new(request_timeout));

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// The same routes and middleware as [`app_router`], without rate limiting,
/// timeout or path normalization.
///
/// The rate limiter keys on the peer address, which in-process test clients do
/// not provide.
pub fn build_router(state: AppState) -> Router {
    assemble(state, Limits::Off)
}

fn assemble(state: AppState, limits: Limits) -> Router {
    let api_admin = limits.strict(
        api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
    );
    let api_session = limits.strict(
        api::routes::session_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
    );
    let api_router = Router::new()
        .merge(limits.lenient(api::routes::public_routes()))
        .merge(limits.strict(api::routes::form_routes()))
        .merge(api_session)
        .nest("/admin", api_admin);

    let web_protected = limits.strict(
        web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::layer,
        )),
    );
    let web_router = Router::new()
        .merge(limits.lenient(web::routes::public_routes()))
        .merge(limits.strict(web::routes::form_routes()))
        .merge(web_protected)
        .fallback(not_found_handler)
        .layer(session::layer(state.cookie_secure));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest_service("/static", ServeDir::new("static"))
        .merge(web_router)
        .with_state(state)
        .layer(tracing::layer())
}

//! HTTP surface for smart-ticket
//!
//! Builds the axum router over a shared [`AppState`]. Transport
//! concerns live here; every rule worth testing is in the identity and
//! engine layers this module delegates to.

mod auth;
mod handlers;
pub mod schemas;

pub use auth::CurrentUser;

use crate::config::Config;
use crate::engine::TicketEngine;
use crate::identity::IdentityService;
use axum::Router;
use axum::routing::{get, patch, post};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on request handling time
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handles available to every handler
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub engine: Arc<TicketEngine>,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(identity: IdentityService, engine: TicketEngine, config: Config) -> Self {
        Self {
            identity: Arc::new(identity),
            engine: Arc::new(engine),
            config: Arc::new(config),
        }
    }
}

/// Build the application router
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route(
            "/tickets",
            get(handlers::list_all_tickets).post(handlers::create_ticket),
        )
        .route("/tickets/me", get(handlers::list_my_tickets))
        .route("/tickets/:id", get(handlers::get_ticket))
        .route(
            "/tickets/:id/admin-update",
            patch(handlers::admin_update_ticket),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}

#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{on, MethodFilter};
use axum::Router;
use navtakniq_api::{HttpMethod, GET_POST, LIST_POSTS, SUBMIT_CONTACT};
use navtakniq_store::ContentStore;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod app;
pub mod config;
mod http;
mod middleware;
pub mod seed;

pub use app::{create_app, create_app_with_store, AppFactory, StartupError};
pub use config::{validate_startup_config, ConfigError, ConfigErrorCode, ServerConfig};
pub use navtakniq_store::{FakeStore, SqliteStore};
pub use seed::{seed_database, SeedOutcome, SEED_POSTS};

pub const CRATE_NAME: &str = "navtakniq-server";

/// Per-process context handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub config: Arc<ServerConfig>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
    }
}

/// Routes are mounted from the contract registry, so method and path cannot
/// drift from what the client builds.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            SUBMIT_CONTACT.path,
            on(
                method_filter(SUBMIT_CONTACT.method),
                http::handlers::submit_contact,
            ),
        )
        .route(
            LIST_POSTS.path,
            on(method_filter(LIST_POSTS.method), http::handlers::list_posts),
        )
        .route(
            GET_POST.path,
            on(method_filter(GET_POST.method), http::handlers::get_post),
        )
        .fallback(http::handlers::route_not_found)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}

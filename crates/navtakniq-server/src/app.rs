// SPDX-License-Identifier: Apache-2.0

use crate::config::{validate_startup_config, ConfigError, ServerConfig};
use crate::http::response_contract::api_error_response;
use crate::seed::{seed_database, SeedOutcome};
use crate::{build_router, AppState};
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use navtakniq_api::ApiError;
use navtakniq_store::{ContentStore, SqliteStore, StoreError, StoreErrorCode};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tower::ServiceExt;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    Config(ConfigError),
    Store(StoreError),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Store(err) => write!(f, "store unavailable: {err}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<StoreError> for StartupError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Opens the configured sqlite store, seeds it and returns the router.
pub async fn create_app(config: &ServerConfig) -> Result<Router, StartupError> {
    validate_startup_config(config)?;
    let url = config.database_url.clone();
    let pool_size = config.db_pool_size;
    let store = tokio::task::spawn_blocking(move || SqliteStore::connect(&url, pool_size))
        .await
        .map_err(|e| {
            StoreError::new(
                StoreErrorCode::Internal,
                format!("store open task failed: {e}"),
            )
        })??;
    Ok(create_app_with_store(Arc::new(store), config.clone()).await)
}

/// Seeding failures are logged and never block startup.
pub async fn create_app_with_store(store: Arc<dyn ContentStore>, config: ServerConfig) -> Router {
    if config.seed_on_start {
        match seed_database(store.as_ref()).await {
            Ok(SeedOutcome::Seeded(count)) => info!(count, "blog posts seeded"),
            Ok(SeedOutcome::AlreadySeeded(count)) => info!(count, "blog posts already seeded"),
            Err(err) => error!(error = %err, "failed to seed database"),
        }
    }
    info!(backend = store.backend_tag(), "navtakniq app ready");
    build_router(AppState::new(store, config))
}

/// Lazily builds one router per process; concurrent first callers wait on the
/// same initialization. A failed build is retried on the next request.
pub struct AppFactory {
    config: ServerConfig,
    router: OnceCell<Router>,
    builds: AtomicU64,
}

impl AppFactory {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: OnceCell::new(),
            builds: AtomicU64::new(0),
        }
    }

    pub async fn router(&self) -> Result<Router, StartupError> {
        self.router
            .get_or_try_init(|| async {
                self.builds.fetch_add(1, Ordering::Relaxed);
                create_app(&self.config).await
            })
            .await
            .cloned()
    }

    /// Dispatches one request through the cached router.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let router = match self.router().await {
            Ok(router) => router,
            Err(err) => {
                error!(error = %err, "app initialization failed");
                return api_error_response(&ApiError::internal());
            }
        };
        match router.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    #[must_use]
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.router.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    fn get(path: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn concurrent_first_requests_share_one_build() {
        let factory = Arc::new(AppFactory::new(ServerConfig::default()));
        let mut tasks = Vec::new();
        for _ in 0..8 {
            let factory = Arc::clone(&factory);
            tasks.push(tokio::spawn(async move {
                factory.handle(get("/api/posts")).await.status()
            }));
        }
        for task in tasks {
            assert_eq!(task.await.expect("join"), StatusCode::OK);
        }
        assert_eq!(factory.build_count(), 1);
        assert!(factory.is_initialized());
    }

    #[tokio::test]
    async fn cached_router_keeps_state_between_requests() {
        let factory = AppFactory::new(ServerConfig::default());
        let first = factory.handle(get("/api/posts")).await;
        let body = to_bytes(first.into_body(), usize::MAX).await.expect("body");
        let posts: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(posts.as_array().map(Vec::len), Some(3));
        let again = factory.handle(get("/api/posts")).await;
        let body = to_bytes(again.into_body(), usize::MAX).await.expect("body");
        let posts_again: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(posts, posts_again);
        assert_eq!(factory.build_count(), 1);
    }

    #[tokio::test]
    async fn failed_initialization_returns_generic_500_and_retries() {
        let factory = AppFactory::new(ServerConfig {
            database_url: "/nonexistent-navtakniq-dir/nested/content.db".to_string(),
            ..ServerConfig::default()
        });
        let response = factory.handle(get("/api/posts")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).expect("json"),
            serde_json::json!({"message": "Internal server error"})
        );
        assert!(!factory.is_initialized());
        let _ = factory.handle(get("/api/posts")).await;
        assert_eq!(factory.build_count(), 2);
    }
}

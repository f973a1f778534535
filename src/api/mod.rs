//! HTTP layer - axum router, shared state and request handlers.
//!
//! Handlers are thin: they extract input, call into [`crate::core`], and let
//! [`crate::errors::Error`]'s `IntoResponse` impl turn failures into JSON error bodies.

/// `IntoResponse` mapping for the crate error type
pub mod error;
/// Extractors whose rejections become validation errors
pub mod extract;
/// Route handlers grouped by resource
pub mod handlers;

use crate::{
    config::settings::{ApiConfig, CorsConfig},
    errors::{Error, Result},
};
use axum::{
    Router,
    http::HeaderValue,
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Database connection pool for all storage operations
    pub database: Arc<DatabaseConnection>,
    /// Upper bound for the `limit` query parameter
    pub max_page_limit: u64,
}

impl ApiState {
    #[must_use]
    pub fn new(database: DatabaseConnection, api: &ApiConfig) -> Self {
        Self {
            database: Arc::new(database),
            max_page_limit: api.max_page_limit,
        }
    }
}

/// Builds the CORS layer from the configured origin list.
///
/// # Errors
/// Returns [`Error::Config`] if an origin is not a valid header value.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| Error::Config {
                message: format!("Invalid CORS origin {origin:?}: {e}"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Routes under `/api/v1`.
fn api_routes() -> Router<ApiState> {
    use handlers::{subscriptions, summary, transactions};

    Router::new()
        .route(
            "/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            "/transactions/summary/total",
            get(transactions::transactions_summary),
        )
        .route(
            "/transactions/:id",
            get(transactions::get_transaction).delete(transactions::delete_transaction),
        )
        .route(
            "/subscriptions",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route(
            "/subscriptions/summary/monthly",
            get(subscriptions::monthly_summary),
        )
        .route(
            "/subscriptions/:id",
            get(subscriptions::get_subscription)
                .put(subscriptions::update_subscription)
                .delete(subscriptions::delete_subscription),
        )
        .route("/summary/overview", get(summary::overview))
}

/// Assembles the full application router.
pub fn router(state: ApiState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::general::root))
        .route("/health", get(handlers::general::health))
        .nest("/api/v1", api_routes())
        .layer(cors)
        .with_state(state)
}

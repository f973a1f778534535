//! Service banner and health check.

use crate::{
    api::ApiState,
    core::health::{self, HealthReport},
};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

/// `GET /` - names the service and points at the health endpoint.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Finance Tracker API",
        "health": "/health",
    }))
}

/// `GET /health` - checks storage. Always answers; 503 when storage is unreachable.
pub async fn health(State(state): State<ApiState>) -> (StatusCode, Json<HealthReport>) {
    let report = health::check(&state.database).await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{send, setup_app_with, setup_test_app};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_root_banner() {
        let app = setup_test_app().await;
        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Finance Tracker API");
    }

    #[tokio::test]
    async fn test_health_reports_connected_storage() {
        let app = setup_test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["storage"]["state"], "connected");
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_storage() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Conn(RuntimeErr::Internal(
                "connection refused".to_string(),
            ))])
            .into_connection();
        let app = setup_app_with(db);

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["storage"]["state"], "disconnected");
        assert_eq!(body["storage"]["kind"], "connection");
    }
}

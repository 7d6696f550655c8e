//! Health check handlers and response types.

use crate::constants::HEALTH_CHECK_STORAGE_KEY;
use crate::state::{DbState, UploadState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use ifshare_storage::Storage;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns "healthy", "timeout", or `failure_status`.
/// The error itself is only logged.
async fn run_check<F, E>(timeout: Duration, f: F, failure_status: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, status = failure_status, "Health check failed");
            failure_status.to_string()
        }
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub database: String,
    pub storage: String,
}

/// Liveness check - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness check - the database answers.
pub async fn readiness_check(State(db): State<DbState>) -> impl IntoResponse {
    let pool = db.pool.clone();
    let database = run_check(
        TIMEOUT,
        async move { sqlx::query("SELECT 1").execute(&pool).await.map(drop) },
        "not_ready",
    )
    .await;

    let (status_code, response) = readiness_response(database);
    (status_code, Json(response))
}

fn readiness_response(database: String) -> (StatusCode, serde_json::Value) {
    if database == "healthy" {
        (
            StatusCode::OK,
            serde_json::json!({ "status": "ready", "database": "ready" }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::json!({ "status": "not_ready", "database": database }),
        )
    }
}

/// Full health check (database and storage). Storage trouble degrades but does not fail it.
pub async fn health_check(
    State(db): State<DbState>,
    State(uploads): State<UploadState>,
) -> impl IntoResponse {
    let pool = db.pool.clone();
    let database = run_check(
        TIMEOUT,
        async move { sqlx::query("SELECT 1").execute(&pool).await.map(drop) },
        "unhealthy",
    )
    .await;

    let storage = uploads.storage.clone();
    let storage = run_check(
        TIMEOUT,
        async move { storage.exists(HEALTH_CHECK_STORAGE_KEY).await.map(drop) },
        "degraded",
    )
    .await;

    let overall_healthy = database == "healthy";
    let response = HealthCheckResponse {
        status: if overall_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database,
        storage,
    };

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_check_reports_status_without_error_text() {
        let status = run_check(
            TIMEOUT,
            async { Err::<(), _>("password authentication failed for user \"ifshare\"") },
            "unhealthy",
        )
        .await;
        assert_eq!(status, "unhealthy");
    }

    #[tokio::test]
    async fn readiness_hides_database_error() {
        let database = run_check(
            TIMEOUT,
            async { Err::<(), _>("error communicating with database: connection refused") },
            "not_ready",
        )
        .await;
        let (status, body) = readiness_response(database);

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            serde_json::json!({ "status": "not_ready", "database": "not_ready" })
        );
    }

    #[test]
    fn readiness_ok_when_database_answers() {
        let (status, body) = readiness_response("healthy".to_string());
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "ready");
    }

    #[tokio::test]
    async fn passing_check_is_healthy() {
        let status = run_check(TIMEOUT, async { Ok::<(), String>(()) }, "degraded").await;
        assert_eq!(status, "healthy");
    }

    #[tokio::test]
    async fn slow_check_times_out() {
        let status = run_check(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<(), String>(())
            },
            "unhealthy",
        )
        .await;
        assert_eq!(status, "timeout");
    }
}

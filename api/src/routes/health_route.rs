//! GET /api/health — process liveness, always succeeds while the server is up.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "Amber AI Dunhuang Explorer";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}

/// Handler: GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_healthy_with_timestamp() {
        let Json(resp) = health().await;
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.service, SERVICE_NAME);
        assert!(resp.timestamp.ends_with('Z'));
    }
}

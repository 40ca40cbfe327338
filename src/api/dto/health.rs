use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "1.2.0",
    "timestamp": "2026-03-01T08:30:00Z",
    "products": 3
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Crate version of the running binary
    #[schema(example = "1.2.0")]
    pub version: String,
    #[schema(value_type = String, format = DateTime, example = "2026-03-01T08:30:00Z")]
    pub timestamp: Timestamp,
    /// Products in the store when the check ran
    #[schema(example = 3)]
    pub products: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// The product store lock is poisoned
    Unhealthy,
}

impl HealthStatus {
    pub fn status_code(self) -> axum::http::StatusCode {
        match self {
            HealthStatus::Healthy => axum::http::StatusCode::OK,
            HealthStatus::Unhealthy => axum::http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

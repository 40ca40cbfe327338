use axum::{extract::State, http::StatusCode, response::Json};
use jiff::Timestamp;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// Liveness check for load balancers. Only an unreadable store is unhealthy.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store readable", body = HealthResponse),
        (status = 503, description = "Store lock poisoned", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, products) = state
        .services
        .products
        .count()
        .map(|count| (HealthStatus::Healthy, count))
        .unwrap_or_else(|error| {
            tracing::warn!(%error, "Product store unreadable during health check");
            (HealthStatus::Unhealthy, 0)
        });

    (
        status.status_code(),
        Json(HealthResponse {
            status,
            version: crate::pkg_version().to_string(),
            timestamp: Timestamp::now(),
            products,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::ErrorLog;
    use crate::models::ProductInput;
    use crate::repositories::Repositories;
    use bigdecimal::BigDecimal;

    fn state() -> AppState {
        AppState::new(Repositories::new(), ErrorLog::disabled())
    }

    #[tokio::test]
    async fn test_health_reports_product_count() {
        let state = state();
        state
            .services
            .products
            .create(ProductInput {
                name: "Pen".to_string(),
                category: "Office".to_string(),
                quantity: 3,
                price: BigDecimal::from(2),
                ..Default::default()
            })
            .unwrap();

        let (code, Json(body)) = health_check(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, HealthStatus::Healthy);
        assert_eq!(body.products, 1);
        assert_eq!(body.version, crate::pkg_version());
    }

    #[tokio::test]
    async fn test_health_on_empty_store() {
        let (code, Json(body)) = health_check(State(state())).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.products, 0);
    }
}

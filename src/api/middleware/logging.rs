//! One `http_request` span per request, with an event on the way in and one
//! on the way out.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

use super::RequestId;

/// Logs the route, status and latency. 5xx responses are raised to `warn`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let id = request
        .extensions()
        .get::<RequestId>()
        .map_or("-", |id| id.0.as_str())
        .to_owned();
    let span = tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = request.uri().path(),
        request_id = %id,
    );

    async move {
        tracing::info!(query = request.uri().query(), "Handling request");
        let started = Instant::now();

        let response = next.run(request).await;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), elapsed_ms, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), elapsed_ms, "Request finished");
        }
        response
    }
    .instrument(span)
    .await
}

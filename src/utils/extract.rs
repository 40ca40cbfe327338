//! Request extractors whose rejections flow through `AppError`.
//!
//! Field validation is left to the service, which has to run the duplicate,
//! price and quantity checks before the field rules.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Json, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// JSON body extractor that rejects with `AppError::BadRequest`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// Query string extractor that rejects with `AppError::BadRequest`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(AppQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        id: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let AppJson(payload) = AppJson::<Payload>::from_request(json_request(r#"{"name":"pen"}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.name, "pen");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result = AppJson::<Payload>::from_request(json_request("{not json"), &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"name":"pen"}"#))
            .unwrap();
        let result = AppJson::<Payload>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_query_parsing() {
        let (mut parts, _) = Request::builder()
            .uri("/test?id=7")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let AppQuery(params) = AppQuery::<Params>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(params.id, 7);
    }

    #[tokio::test]
    async fn test_missing_query_value_is_bad_request() {
        let (mut parts, _) = Request::builder()
            .uri("/test")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let result = AppQuery::<Params>::from_request_parts(&mut parts, &()).await;
        match result {
            Err(AppError::BadRequest { message }) => assert!(message.contains("id")),
            other => panic!("Expected BadRequest, got {:?}", other.map(|_| ())),
        }
    }
}

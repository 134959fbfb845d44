use axum::{
    body::{Body, Bytes},
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use http_body_util::LengthLimitError;
use serde_json::{json, Value};

use crate::ErrorResponse;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Catch-all for requests that match no route and no static asset.
pub async fn unknown_endpoint() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("unknown endpoint")),
    )
}

/// Log one line per request; POST bodies are buffered, logged and handed on intact.
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let at = chrono::Utc::now().to_rfc3339();

    if method != Method::POST {
        tracing::info!("{} {} at {}", method, path, at);
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();
    let bytes: Bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) if exceeds_body_limit(&e) => {
            tracing::warn!("{} {} at {}: body over limit", method, path, at);
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse::new("request body too large")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::warn!("{} {} at {}: failed to read body: {}", method, path, at, e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("invalid request body")),
            )
                .into_response();
        }
    };
    tracing::info!(
        body = %String::from_utf8_lossy(&bytes),
        "{} {} at {}",
        method,
        path,
        at
    );

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// True if the body-limit layer cut the read short; requests without a
/// Content-Length only hit the limit while streaming.
fn exceeds_body_limit(err: &axum::Error) -> bool {
    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = cause {
        if e.is::<LengthLimitError>() {
            return true;
        }
        cause = e.source();
    }
    false
}

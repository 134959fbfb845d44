//! HTTP host for the phonebook: middleware stack, health route, static
//! assets, unknown-endpoint fallback and serve-until-cancelled.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{middleware::from_fn, routing::get, Router};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod assets;
mod config;
pub mod request_id;
pub mod web;

pub use config::{ApiIngressConfig, DEFAULT_BODY_LIMIT_BYTES};

/// Error body produced by the ingress itself
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Owns the HTTP server: wraps module routers in the shared middleware stack
/// and serves them until cancelled.
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Build the full router around `api`, the routes contributed by modules.
    pub fn build_router(&self, api: Router) -> Router {
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(api)
            // a known path with an unsupported method is still an unknown endpoint
            .method_not_allowed_fallback(web::unknown_endpoint);

        router = match &self.config.static_dir {
            Some(dir) => assets::with_static_files(router, dir),
            None => router.fallback(web::unknown_endpoint),
        };

        // Layers are listed innermost first; the last one added runs first:
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
        // -> BodyLimit -> CORS -> Timeout -> request log -> handler
        router = router.layer(from_fn(web::log_request));

        if self.config.timeout_sec > 0 {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(
                self.config.timeout_sec,
            )));
        }

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        let x_request_id = request_id::header();
        router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// Bind the configured address and serve `router` until `cancel` fires.
    /// In-flight requests are drained before returning.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.config.bind_addr))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", addr);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_rejects_invalid_bind_address() {
        let ingress = ApiIngress::new(ApiIngressConfig {
            bind_addr: "not-an-address".into(),
            ..ApiIngressConfig::default()
        });
        let err = ingress
            .serve(Router::new(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid bind address"));
    }

    #[tokio::test]
    async fn serve_returns_after_cancellation() {
        let ingress = ApiIngress::new(ApiIngressConfig {
            bind_addr: "127.0.0.1:0".into(),
            ..ApiIngressConfig::default()
        });
        let cancel = CancellationToken::new();
        cancel.cancel();

        let router = ingress.build_router(Router::new());
        tokio::time::timeout(Duration::from_secs(5), ingress.serve(router, cancel))
            .await
            .expect("server should stop once cancelled")
            .unwrap();
    }
}

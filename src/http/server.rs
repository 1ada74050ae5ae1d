//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the match API and a JSON fallback
//! - Wire up middleware (CORS, tracing, request ID, body limit, timeout, metrics)
//! - Serve on a bound listener until the shutdown signal fires
//!
//! # Layer order (outermost first)
//! ```text
//! cors → set request id → trace → propagate request id → json error bodies
//!     → body limit → timeout → routes
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, response::IntoResponse, Json, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::{self, ErrorBody};
use crate::config::ServiceConfig;
use crate::http::cors::cors_middleware;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::json_error_bodies;
use crate::observability::metrics::track_metrics;
use crate::store::MatchStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
}

/// HTTP server for the match API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: ServiceConfig, store: Arc<dyn MatchStore>) -> Self {
        let state = AppState { store };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        api::routes()
            .fallback(route_not_found)
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(middleware::from_fn(json_error_bodies))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
            .layer(middleware::from_fn(cors_middleware))
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            store = %self.config.store.backend,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "route not found".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::X_REQUEST_ID;
    use crate::store::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::new(ServiceConfig::default(), Arc::new(MemoryStore::new()))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_preflight_is_empty_204() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/matches/1/goals")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400() {
        let response = server()
            .router()
            .oneshot(Request::get("/api/matches/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_request_id_generated_and_echoed() {
        let router = server().router();

        let response = router
            .clone()
            .oneshot(Request::get("/api/matches").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_REQUEST_ID));

        let response = router
            .oneshot(
                Request::get("/api/matches")
                    .header(X_REQUEST_ID, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "abc-123");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = server()
            .router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "route not found");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = ServiceConfig::default();
        config.security.max_body_size = 16;
        let server = HttpServer::new(config, Arc::new(MemoryStore::new()));

        let body = r#"{"homeTeam":"Sevilla","awayTeam":"Betis","matchDate":"2025-04-01"}"#;
        let response = server
            .router()
            .oneshot(
                Request::post("/api/matches")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await["error"], "request body too large");
    }

    #[tokio::test]
    async fn test_oversized_body_without_length_is_413() {
        let mut config = ServiceConfig::default();
        config.security.max_body_size = 16;
        let server = HttpServer::new(config, Arc::new(MemoryStore::new()));

        let body = r#"{"homeTeam":"Sevilla","awayTeam":"Betis","matchDate":"2025-04-01"}"#;
        let response = server
            .router()
            .oneshot(
                Request::post("/api/matches")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(json_body(response).await["error"].is_string());
    }
}

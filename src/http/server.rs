//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with a single catch-all dispatcher
//! - Wire up middleware (tracing, limits, timeout, request ID)
//! - Bind server to listener
//! - Dispatch requests through the task route table
//! - Observability (metrics, correlation IDs)

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderName, Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{RequestContext, X_REQUEST_ID};
use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::routing::{PatternError, Router as RouteTable};
use crate::storage::Database;
use crate::tasks::{task_routes, Endpoint};

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable<Endpoint>>,
    pub db: Arc<Database>,
}

/// HTTP server for the task API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an opened store.
    pub fn new(config: &ServiceConfig, db: Arc<Database>) -> Result<Self, PatternError> {
        let state = AppState {
            routes: Arc::new(task_routes()?),
            db,
        };

        let router = Self::build_router(config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// The assembled axum router, for driving the service without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main dispatcher.
/// Looks up the route, builds the request context, and runs the handler.
async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let path = uri.path();

    let Some(matched) = state.routes.find(&method, path) else {
        tracing::warn!(method = %method, path = %path, "No route matched");
        let response = ApiError::NoRoute.into_response();
        metrics::record_request(method.as_str(), "none", response.status().as_u16(), start_time);
        return response;
    };

    let endpoint = *matched.handler;
    tracing::debug!(
        method = %method,
        path = %path,
        route = endpoint.name(),
        "Dispatching request"
    );

    let ctx = RequestContext::new(matched.params, query, body);
    let response = match endpoint.call(&state.db, &ctx).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(route = endpoint.name(), error = %e, "Request rejected");
            e.into_response()
        }
    };

    metrics::record_request(
        method.as_str(),
        endpoint.name(),
        response.status().as_u16(),
        start_time,
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn app(config: ServiceConfig) -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let db = Arc::new(Database::open(dir.path().join("db.json")).await);
        let router = HttpServer::new(&config, db).unwrap().into_router();
        (dir, router)
    }

    fn post_task(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/tasks")
            .header("content-type", "application/json")
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_through_router() {
        let (_dir, app) = app(ServiceConfig::default()).await;

        let res = app
            .clone()
            .oneshot(post_task(r#"{"title":"A","description":"B"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/tasks?search=a")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let tasks: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(tasks.as_array().unwrap().len(), 1);
        assert_eq!(tasks[0]["title"], "A");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = ServiceConfig::default();
        config.limits.max_body_bytes = 16;
        let (_dir, app) = app(config).await;

        let res = app
            .oneshot(post_task(r#"{"title":"a long title","description":"and more"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_no_route_is_404_with_message() {
        let (_dir, app) = app(ServiceConfig::default()).await;

        let res = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let err: crate::http::response::ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.message, "Route not found");
    }
}

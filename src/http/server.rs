//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, request ID, admin gate)
//! - Dispatch requests through the route table to handlers
//! - Map routing failures to 404 / 405
//! - Serve with graceful shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http_body_util::LengthLimitError;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::admin::auth::admin_auth_middleware;
use crate::config::ApiConfig;
use crate::customers;
use crate::error::{ApiError, ApiResult};
use crate::http::request::{
    decode_path, propagate_request_id_layer, request_id, set_request_id_layer, RouteRequest,
};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::routing::{Resolution, RouteError, Router as RouteTable};
use crate::store::Store;

/// A route handler. Store operations are synchronous, so handlers are too.
pub type Handler = fn(&AppState, RouteRequest) -> ApiResult<Response>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub routes: Arc<RouteTable<Handler>>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Register every route and freeze the table.
    pub fn new(config: ApiConfig, store: Arc<Store>) -> Result<Self, RouteError> {
        let mut routes = RouteTable::new();
        customers::register_routes(&mut routes)?;
        admin::register_routes(&mut routes)?;

        tracing::info!(routes = routes.routes().len(), "Route table built");

        Ok(Self {
            store,
            routes: Arc::new(routes),
            config: Arc::new(config),
        })
    }
}

/// HTTP server for the customer API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with an empty store.
    pub fn new(config: ApiConfig) -> Result<Self, RouteError> {
        Self::with_store(config, Arc::new(Store::new()))
    }

    /// Create a new HTTP server over an existing store.
    pub fn with_store(config: ApiConfig, store: Arc<Store>) -> Result<Self, RouteError> {
        let state = AppState::new(config, store)?;
        let router = Self::build_router(state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let timeout = Duration::from_secs(state.config.timeouts.request_secs);

        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                admin_auth_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(timeout))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered application, for in-process testing.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request against the route table and invoke the bound handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method;
    let request_id = request_id(&parts.headers).to_string();
    let path = match decode_path(parts.uri.path()) {
        Ok(path) => path,
        Err(e) => {
            let response = e.into_response();
            metrics::record_request(method.as_str(), response.status().as_u16(), "none", start_time);
            return response;
        }
    };

    let (handler, params, route) = match state.routes.resolve(&method, &path) {
        Resolution::Dispatch { route, params } => {
            (route.handler, params, route.pattern.as_str().to_string())
        }
        Resolution::MethodNotAllowed { allowed } => {
            tracing::debug!(request_id = %request_id, method = %method, path = %path, allowed = ?allowed, "Method not allowed");
            let response = ApiError::MethodNotAllowed { allowed }.into_response();
            metrics::record_request(method.as_str(), response.status().as_u16(), "none", start_time);
            return response;
        }
        Resolution::NotFound => {
            tracing::debug!(request_id = %request_id, method = %method, path = %path, "No route matched");
            let response = ApiError::NotFound("404 page not found".into()).into_response();
            metrics::record_request(method.as_str(), response.status().as_u16(), "none", start_time);
            return response;
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        route = %route,
        params = ?params.as_slice(),
        "Route matched"
    );

    let limit = state.config.security.max_body_size;
    let response = match axum::body::to_bytes(body, limit).await {
        Ok(body) => {
            let request = RouteRequest {
                method: method.clone(),
                path: path.clone(),
                params,
                headers: parts.headers,
                body,
            };
            handler(&state, request).unwrap_or_else(IntoResponse::into_response)
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            body_error(e, limit).into_response()
        }
    };

    let status = response.status();
    if status.is_server_error() {
        tracing::error!(request_id = %request_id, status = %status, route = %route, "Request failed");
    } else {
        tracing::debug!(request_id = %request_id, status = %status, route = %route, "Request handled");
    }
    metrics::record_request(method.as_str(), status.as_u16(), &route, start_time);

    response
}

/// Only an exceeded limit is a 413. Anything else is a broken request body.
fn body_error(err: axum::Error, limit: usize) -> ApiError {
    let too_large = std::iter::successors(Some(&err as &dyn StdError), |&e| e.source())
        .any(|e| e.is::<LengthLimitError>());
    if too_large {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::BadRequest(format!("failed to read request body: {err}"))
    }
}

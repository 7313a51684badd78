//! Axum-based API server.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, State},
    handler::Handler,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{debug, info};

use crate::handlers::{add_log, add_user, check_user, delete_user, get_logs, get_users};
use crate::uploads::UPLOADS_ROUTE;
use crate::{ApiError, AppState};

/// Default request body limit; bounds photo uploads.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Filesystem locations and limits the router needs.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Directory holding the static frontend bundle and its `index.html`.
    pub frontend_dir: PathBuf,
    /// Directory uploaded photos are written to and served from.
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl ApiConfig {
    fn index_html(&self) -> PathBuf {
        self.frontend_dir.join("index.html")
    }
}

/// Build the full application router.
///
/// API routes live under `/api`, uploaded photos under `/uploads`, and any
/// other path is looked up in the frontend bundle. Anything left unmatched,
/// whatever its method, gets the frontend's `index.html` with a 404 status.
pub fn router(state: AppState, config: &ApiConfig) -> Router {
    let not_found = frontend_not_found.with_state(config.index_html());
    let frontend = ServeDir::new(&config.frontend_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.clone());
    let uploads = ServeDir::new(&config.uploads_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/api/logs",
            get(get_logs)
                .post(add_log)
                .fallback_service(not_found.clone()),
        )
        .route(
            "/api/users",
            get(get_users)
                .post(add_user)
                .fallback_service(not_found.clone()),
        )
        .route(
            "/api/users/:name",
            delete(delete_user).fallback_service(not_found.clone()),
        )
        .route(
            "/api/checkUser",
            post(check_user).fallback_service(not_found),
        )
        .nest_service(UPLOADS_ROUTE, uploads)
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the frontend entry document with a 404 status.
async fn frontend_not_found(State(index): State<PathBuf>) -> Response {
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            debug!(path = %index.display(), error = %e, "frontend index unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub struct ApiServer {
    pub host: String,
    pub port: u16,
}

impl ApiServer {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Bind and serve `app` until `shutdown` resolves, then drain
    /// in-flight requests.
    pub async fn start<F>(&self, app: Router, shutdown: F) -> Result<(), ApiError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::Server(format!("failed to bind {addr}: {e}")))?;
        info!("API server listening on http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ApiError::Server(e.to_string()))?;

        info!("API server stopped");
        Ok(())
    }
}

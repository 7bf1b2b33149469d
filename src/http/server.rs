//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the console as fallback handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Bridge each request into a `BufferedEnvironment` and run the adapter
//! - Answer unmatched requests with 404, failures with 500
//! - Observability (metrics, correlation IDs)

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, Request, StatusCode,
    },
    response::{IntoResponse, Response},
    Router,
};
use futures_util::future::BoxFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ConsoleConfig;
use crate::console::Console;
use crate::environment::{BufferedEnvironment, ConsoleAdapter, ConsoleError, Downstream, Environment};
use crate::http::request::{request_id_of, MakeRequestUuidV4, X_REQUEST_ID};
use crate::observability::metrics;
use crate::scheduler::Scheduler;

const NOT_FOUND_BODY: &[u8] = b"Not Found";

/// Downstream handler for requests no console route matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl<E> Downstream<E> for NotFound
where
    E: Environment + ?Sized,
{
    fn call<'a>(&'a self, env: &'a mut E) -> BoxFuture<'a, Result<(), ConsoleError>> {
        Box::pin(async move {
            env.set_status(StatusCode::NOT_FOUND);
            env.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
            env.set_header(CONTENT_LENGTH, HeaderValue::from(NOT_FOUND_BODY.len()));
            let body = env.response_body();
            body.write_all(NOT_FOUND_BODY).await?;
            body.flush().await?;
            Ok(())
        })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<ConsoleAdapter<NotFound>>,
}

/// HTTP server hosting the scheduler console.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    config: ConsoleConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ConsoleConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        let routes = Arc::new(Console::new(scheduler).route_table());
        tracing::debug!(routes = ?routes.keys().collect::<Vec<_>>(), "Route table built");

        let state = AppState {
            adapter: Arc::new(ConsoleAdapter::new(routes, NotFound)),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ConsoleConfig, state: AppState) -> Router {
        Router::new()
            .fallback(console_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}

/// Fallback handler: every request goes through the console adapter.
async fn console_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id_of(&request);
    let method = request.method().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %request.uri().path(),
        "Console request"
    );

    let mut env = BufferedEnvironment::from_request(&request);
    let response = match state.adapter.call(&mut env).await {
        Ok(()) => env.into_response(),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Console request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{InMemoryScheduler, JobDetail, JobKey};
    use axum::http::header::{HOST, LOCATION};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let scheduler = InMemoryScheduler::new();
        scheduler.add_job(JobDetail {
            key: JobKey::new("reports", "daily"),
            description: Some("Daily report".into()),
            job_type: "ReportJob".into(),
            interruptible: false,
        });
        HttpServer::new(ConsoleConfig::default(), Arc::new(scheduler))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(HOST, "localhost:8080")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_job_group_page() {
        let response = server().router().oneshot(get("/jobgroup?group=reports")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
        assert!(response.headers().contains_key(X_REQUEST_ID));
        let body = body_text(response).await;
        assert!(body.contains("Daily report"));
    }

    #[tokio::test]
    async fn test_redirect() {
        let response = server()
            .router()
            .oneshot(get("/pausejobgroup?group=reports"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "jobgroup?group=reports");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = server().router().oneshot(get("/unknown")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not Found");
    }

    #[tokio::test]
    async fn test_handler_failure_is_server_error() {
        let response = server().router().oneshot(get("/jobgroup")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_request_id_is_preserved() {
        let request = Request::builder()
            .uri("/index")
            .header(HOST, "localhost")
            .header(X_REQUEST_ID, "req-42")
            .body(Body::empty())
            .unwrap();
        let response = server().router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "req-42");
    }
}

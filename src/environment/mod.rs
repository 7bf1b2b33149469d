//! Host environment integration.
//!
//! # Data Flow
//! ```text
//! Host request environment
//!     → adapter.rs (reconstruct URI from scheme/host/path base/path/query)
//!     → RouteTable::dispatch
//!     → Some(Response): adapter.rs renders into the environment's output
//!     → None: downstream handler receives the untouched environment
//!
//! Environments:
//!     buffered.rs (axum request in, buffered status/headers/body out)
//! ```
//!
//! # Design Decisions
//! - The console never sees the transport, only the `Environment` trait
//! - Output writes are awaited in order: headers, body, flush
//! - Malformed environment fields fail the request; nothing here logs

pub mod adapter;
pub mod buffered;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use futures_util::future::BoxFuture;
use tokio::io::AsyncWrite;

use crate::routing::HandlerError;

pub use adapter::{render, request_uri, ConsoleAdapter};
pub use buffered::BufferedEnvironment;

/// Request fields and response sinks supplied by the host.
pub trait Environment: Send {
    /// Request scheme, e.g. `http` or `https`.
    fn request_scheme(&self) -> &str;

    /// Value of a request header, looked up case-insensitively.
    fn request_header(&self, name: &str) -> Option<&str>;

    /// Path the application is mounted under (may be empty).
    fn request_path_base(&self) -> &str;

    /// Request path relative to the path base.
    fn request_path(&self) -> &str;

    /// Raw query string, without or with a leading `?`.
    fn request_query_string(&self) -> &str;

    fn set_status(&mut self, status: StatusCode);

    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Writable response body.
    fn response_body(&mut self) -> &mut (dyn AsyncWrite + Unpin + Send);
}

/// Handler that receives requests no route matched.
pub trait Downstream<E: ?Sized>: Send + Sync {
    fn call<'a>(&'a self, env: &'a mut E) -> BoxFuture<'a, Result<(), ConsoleError>>;
}

/// Errors surfaced to the host while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("missing Host header")]
    MissingHost,

    #[error("invalid port in Host header: {0}")]
    InvalidPort(String),

    #[error("cannot build request URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("invalid response header value: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error("failed to write response: {0}")]
    Io(#[from] std::io::Error),
}

//! Scheduler Console Library
//!
//! Routes requests from a host environment to read-mostly job scheduler views
//! and renders their responses back through the environment.

// Core
pub mod environment;
pub mod response;
pub mod routing;

// Console
pub mod console;
pub mod scheduler;

// Host integration and cross-cutting concerns
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ConsoleConfig;
pub use console::Console;
pub use environment::{ConsoleAdapter, ConsoleError, Downstream, Environment};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use response::Response;
pub use routing::RouteTable;

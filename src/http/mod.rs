//! HTTP host integration.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → BufferedEnvironment::from_request
//!     → ConsoleAdapter (route, render or fall through to NotFound)
//!     → BufferedEnvironment::into_response
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{request_id_of, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{HttpServer, NotFound};

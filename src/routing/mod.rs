//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming URI (path + query)
//!     → matcher.rs (strip at first '.', case-insensitive suffix test)
//!     → dispatcher.rs (first matching route, invoke handler)
//!     → Return: Some(Response) or None
//!
//! Route Table (at startup):
//!     RouteTable::builder().route(key, handler)...
//!     → Freeze as immutable RouteTable
//!     → Shared via Arc
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - No regex in hot path (suffix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod dispatcher;
pub mod matcher;
pub mod table;

pub use matcher::{routable_path, SuffixMatcher};
pub use table::{Handler, HandlerError, Route, RouteTable, RouteTableBuilder};

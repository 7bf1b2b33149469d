//! Route table.
//!
//! # Responsibilities
//! - Hold the ordered `(key, handler)` list
//! - Expose it read-only once built
//!
//! # Design Decisions
//! - Built once through [`RouteTableBuilder`], no mutation afterwards
//! - Shared via `Arc` across requests without locks
//! - Order is significant: first match wins

use std::fmt;
use std::sync::Arc;
use url::Url;

use crate::response::Response;
use crate::routing::matcher::SuffixMatcher;
use crate::scheduler::SchedulerError;

/// Errors a handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("missing required query parameter '{0}'")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// A request handler: full request URI in, response out.
pub type Handler = Arc<dyn Fn(&Url) -> Result<Response, HandlerError> + Send + Sync>;

/// A single route entry.
#[derive(Clone)]
pub struct Route {
    matcher: SuffixMatcher,
    handler: Handler,
}

impl Route {
    pub fn key(&self) -> &str {
        self.matcher.key()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    pub fn handle(&self, uri: &Url) -> Result<Response, HandlerError> {
        (self.handler)(uri)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("key", &self.key()).finish()
    }
}

/// Immutable ordered route list.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Route keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(Route::key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Collects routes in registration order.
#[derive(Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    /// Append a route. Earlier routes take precedence over later ones.
    pub fn route<F>(mut self, key: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Url) -> Result<Response, HandlerError> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            matcher: SuffixMatcher::new(key),
            handler: Arc::new(handler),
        });
        self
    }

    pub fn build(self) -> RouteTable {
        RouteTable {
            routes: self.routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let table = RouteTable::builder()
            .route("b", |_: &Url| Ok(Response::redirect("/b")))
            .route("a", |_: &Url| Ok(Response::redirect("/a")))
            .build();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_route_debug_shows_key() {
        let table = RouteTable::builder()
            .route("jobgroup", |_: &Url| Ok(Response::redirect("/")))
            .build();
        assert!(format!("{:?}", table).contains("jobgroup"));
    }
}

//! Request dispatch.
//!
//! # Responsibilities
//! - Find the first route whose key matches the request path
//! - Invoke its handler with the full URI (query included)
//! - Report no-match as `None`, not as an error
//!
//! # Design Decisions
//! - Stateless: everything per-request lives on the stack
//! - Parameter validation belongs to handlers

use url::Url;

use crate::response::Response;
use crate::routing::table::{HandlerError, Route, RouteTable};

impl RouteTable {
    /// First route matching `path`, in table order.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.iter().find(|route| route.matches(path))
    }

    /// Route `uri` and run the matching handler.
    ///
    /// Returns `Ok(None)` when no route matches.
    pub fn dispatch(&self, uri: &Url) -> Result<Option<Response>, HandlerError> {
        match self.find(uri.path()) {
            Some(route) => route.handle(uri).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn echo(name: &'static str) -> impl Fn(&Url) -> Result<Response, HandlerError> {
        move |uri: &Url| Ok(Response::content(format!("{}:{}", name, uri), "text/plain"))
    }

    fn body(response: Option<Response>) -> String {
        match response {
            Some(Response::Content(c)) => c.content,
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::builder()
            .route("group", echo("first"))
            .route("jobgroup", echo("second"))
            .build();
        let response = table.dispatch(&url("http://h/jobgroup")).unwrap();
        assert!(body(response).starts_with("first:"));
    }

    #[test]
    fn test_overlapping_keys_follow_table_order() {
        let table = RouteTable::builder()
            .route("job", echo("job"))
            .route("jobgroup", echo("jobgroup"))
            .build();
        // "jobgroup" does not end with "job", so the second route is reached
        let response = table.dispatch(&url("http://h/jobgroup")).unwrap();
        assert!(body(response).starts_with("jobgroup:"));

        let table = RouteTable::builder()
            .route("jobgroup", echo("jobgroup"))
            .route("pausejobgroup", echo("pause"))
            .build();
        let response = table.dispatch(&url("http://h/pausejobgroup")).unwrap();
        assert!(body(response).starts_with("jobgroup:"));
    }

    #[test]
    fn test_extension_and_query_are_passed_through() {
        let table = RouteTable::builder().route("jobgroup", echo("jg")).build();
        let response = table
            .dispatch(&url("http://h/jobgroup.xml?group=Default"))
            .unwrap();
        assert_eq!(body(response), "jg:http://h/jobgroup.xml?group=Default");
    }

    #[test]
    fn test_case_insensitive_dispatch() {
        let table = RouteTable::builder().route("jobgroup", echo("jg")).build();
        assert!(table.dispatch(&url("http://h/JobGroup")).unwrap().is_some());
    }

    #[test]
    fn test_no_match_is_none() {
        let table = RouteTable::builder().route("jobgroup", echo("jg")).build();
        assert!(table.dispatch(&url("http://h/unknown")).unwrap().is_none());
        assert!(RouteTable::default().dispatch(&url("http://h/")).unwrap().is_none());
    }

    #[test]
    fn test_handler_error_propagates() {
        let table = RouteTable::builder()
            .route("jobgroup", |_: &Url| Err(HandlerError::MissingParameter("group")))
            .build();
        let err = table.dispatch(&url("http://h/jobgroup")).unwrap_err();
        assert!(matches!(err, HandlerError::MissingParameter("group")));
    }
}

//! Buffered environment backed by an axum request.

use axum::body::Body;
use axum::http::header::HOST;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode};
use axum::response::Response as HttpResponse;
use tokio::io::AsyncWrite;

use crate::environment::Environment;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Environment that records status, headers and body in memory.
///
/// The host turns it into an HTTP response once the adapter is done.
#[derive(Debug)]
pub struct BufferedEnvironment {
    scheme: String,
    request_headers: HeaderMap,
    path_base: String,
    path: String,
    query: String,
    status: StatusCode,
    response_headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedEnvironment {
    pub fn new(
        scheme: impl Into<String>,
        path_base: impl Into<String>,
        path: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            request_headers: HeaderMap::new(),
            path_base: path_base.into(),
            path: path.into(),
            query: query.into(),
            status: StatusCode::OK,
            response_headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Capture the routing-relevant parts of an incoming request.
    ///
    /// The scheme comes from the first `X-Forwarded-Proto` entry when it names
    /// `http` or `https`. HTTP/2 requests carry no `Host` header, so the URI
    /// authority stands in.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let uri = request.uri();
        let scheme = request
            .headers()
            .get(X_FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(forwarded_scheme)
            .or_else(|| uri.scheme_str())
            .unwrap_or("http");

        let mut env = Self::new(scheme, "", uri.path(), uri.query().unwrap_or_default());
        env.request_headers = request.headers().clone();
        if !env.request_headers.contains_key(HOST) {
            if let Some(authority) = uri.authority() {
                if let Ok(value) = HeaderValue::from_str(authority.as_str()) {
                    env.request_headers.insert(HOST, value);
                }
            }
        }
        env
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.request_headers.insert(name, value);
        self
    }

    pub fn with_path_base(mut self, path_base: impl Into<String>) -> Self {
        self.path_base = path_base.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> HttpResponse {
        let mut response = HttpResponse::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.response_headers;
        response
    }
}

fn forwarded_scheme(value: &str) -> Option<&str> {
    let first = value.split(',').next()?.trim();
    if first.eq_ignore_ascii_case("https") {
        Some("https")
    } else if first.eq_ignore_ascii_case("http") {
        Some("http")
    } else {
        None
    }
}

impl Environment for BufferedEnvironment {
    fn request_scheme(&self) -> &str {
        &self.scheme
    }

    fn request_header(&self, name: &str) -> Option<&str> {
        self.request_headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn request_path_base(&self) -> &str {
        &self.path_base
    }

    fn request_path(&self) -> &str {
        &self.path
    }

    fn request_query_string(&self) -> &str {
        &self.query
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.response_headers.insert(name, value);
    }

    fn response_body(&mut self) -> &mut (dyn AsyncWrite + Unpin + Send) {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[test]
    fn test_from_request() {
        let request = Request::builder()
            .uri("/jobgroup?group=Default")
            .header("Host", "example.com:8080")
            .body(Body::empty())
            .unwrap();
        let env = BufferedEnvironment::from_request(&request);
        assert_eq!(env.request_scheme(), "http");
        assert_eq!(env.request_header("host"), Some("example.com:8080"));
        assert_eq!(env.request_path(), "/jobgroup");
        assert_eq!(env.request_query_string(), "group=Default");
        assert_eq!(env.request_path_base(), "");
    }

    #[test]
    fn test_from_request_forwarded_proto_and_authority() {
        let request = Request::builder()
            .uri("http://example.com/index")
            .header(X_FORWARDED_PROTO, "https")
            .body(Body::empty())
            .unwrap();
        let env = BufferedEnvironment::from_request(&request);
        assert_eq!(env.request_scheme(), "https");
        assert_eq!(env.request_header("Host"), Some("example.com"));
    }

    #[test]
    fn test_from_request_forwarded_proto_is_sanitised() {
        for (header, expected) in [
            ("https, http", "https"),
            ("HTTP", "http"),
            ("gopher", "http"),
            ("https, http://evil", "https"),
            ("", "http"),
        ] {
            let request = Request::builder()
                .uri("/index")
                .header("Host", "example.com")
                .header(X_FORWARDED_PROTO, header)
                .body(Body::empty())
                .unwrap();
            let env = BufferedEnvironment::from_request(&request);
            assert_eq!(env.request_scheme(), expected, "header {:?}", header);
        }
    }

    #[test]
    fn test_into_response() {
        let mut env = BufferedEnvironment::new("http", "", "/", "");
        env.set_status(StatusCode::FOUND);
        env.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        env.body.extend_from_slice(b"hi");
        let response = env.into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    }
}

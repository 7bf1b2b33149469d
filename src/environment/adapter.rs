//! Environment adapter.
//!
//! # Responsibilities
//! - Reconstruct the request URI from environment fields
//! - Dispatch through the route table
//! - Render the response into the environment's output
//! - Fall through to the downstream handler on no match
//!
//! # Design Decisions
//! - Default port from scheme: 80 for `http`, 443 otherwise
//! - `Content-Length` is the encoded byte length
//! - Redirects write no body

use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST, LOCATION};
use axum::http::{HeaderValue, StatusCode};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::environment::{ConsoleError, Downstream, Environment};
use crate::response::{ContentResponse, DocumentResponse, RedirectResponse, Response};
use crate::routing::RouteTable;

/// Routes requests from a host environment to the console handlers.
#[derive(Debug)]
pub struct ConsoleAdapter<D> {
    routes: Arc<RouteTable>,
    downstream: D,
}

impl<D> ConsoleAdapter<D> {
    pub fn new(routes: Arc<RouteTable>, downstream: D) -> Self {
        Self { routes, downstream }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Handle one request.
    ///
    /// Renders the matched route's response, or hands the environment to the
    /// downstream handler unchanged when nothing matches.
    pub async fn call<E>(&self, env: &mut E) -> Result<(), ConsoleError>
    where
        E: Environment + ?Sized,
        D: Downstream<E>,
    {
        let uri = request_uri(env)?;
        match self.routes.dispatch(&uri)? {
            Some(response) => render(env, response).await,
            None => self.downstream.call(env).await,
        }
    }
}

/// Rebuild the absolute request URI from environment fields.
pub fn request_uri<E>(env: &E) -> Result<Url, ConsoleError>
where
    E: Environment + ?Sized,
{
    let scheme = env.request_scheme();
    let host_header = env
        .request_header(HOST.as_str())
        .filter(|h| !h.is_empty())
        .ok_or(ConsoleError::MissingHost)?;

    let (host, port) = split_host(host_header);
    let port = match port {
        Some(port) => port
            .parse::<u16>()
            .map_err(|_| ConsoleError::InvalidPort(port.to_string()))?,
        None => default_port(scheme),
    };

    let mut uri = Url::parse(&format!("{}://{}", scheme, host))?;
    uri.set_port(Some(port))
        .map_err(|_| ConsoleError::InvalidUri(url::ParseError::InvalidPort))?;
    uri.set_path(&format!("{}{}", env.request_path_base(), env.request_path()));

    let query = env.request_query_string();
    let query = query.strip_prefix('?').unwrap_or(query);
    uri.set_query(if query.is_empty() { None } else { Some(query) });

    Ok(uri)
}

fn default_port(scheme: &str) -> u16 {
    if scheme.eq_ignore_ascii_case("http") {
        80
    } else {
        443
    }
}

/// Split a `Host` header into host and optional port, keeping IPv6 brackets.
fn split_host(value: &str) -> (&str, Option<&str>) {
    if value.starts_with('[') {
        return match value.find(']') {
            Some(end) => {
                let (host, rest) = value.split_at(end + 1);
                (host, rest.strip_prefix(':'))
            }
            None => (value, None),
        };
    }
    match value.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (value, None),
    }
}

/// Write `response` into the environment.
pub async fn render<E>(env: &mut E, response: Response) -> Result<(), ConsoleError>
where
    E: Environment + ?Sized,
{
    response
        .fold(
            env,
            |env, content| render_content(env, content),
            |env, document| render_document(env, document),
            |env, redirect| render_redirect(env, redirect),
        )
        .await
}

async fn render_content<E>(env: &mut E, response: ContentResponse) -> Result<(), ConsoleError>
where
    E: Environment + ?Sized,
{
    set_content_type(env, &response.content_type)?;
    write_body(env, response.content.as_bytes()).await
}

async fn render_document<E>(env: &mut E, response: DocumentResponse) -> Result<(), ConsoleError>
where
    E: Environment + ?Sized,
{
    set_content_type(env, &response.content_type)?;
    let content = response.content.to_string();
    write_body(env, content.as_bytes()).await
}

async fn render_redirect<E>(env: &mut E, response: RedirectResponse) -> Result<(), ConsoleError>
where
    E: Environment + ?Sized,
{
    let location = HeaderValue::from_str(&response.location)?;
    env.set_status(StatusCode::FOUND);
    env.set_header(LOCATION, location);
    Ok(())
}

fn set_content_type<E>(env: &mut E, content_type: &str) -> Result<(), ConsoleError>
where
    E: Environment + ?Sized,
{
    if content_type.is_empty() {
        return Ok(());
    }
    env.set_header(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
    Ok(())
}

async fn write_body<E>(env: &mut E, bytes: &[u8]) -> Result<(), ConsoleError>
where
    E: Environment + ?Sized,
{
    env.set_header(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
    let body = env.response_body();
    body.write_all(bytes).await?;
    body.flush().await?;
    Ok(())
}

//! Console request handlers.
//!
//! Each handler is a function of the request URI and the scheduler. Query
//! parameters are parsed and validated here, never by the dispatcher.

use url::Url;

use crate::console::views::{self, GroupSummary, JobRow};
use crate::response::Response;
use crate::routing::HandlerError;
use crate::scheduler::Scheduler;

/// Query string parameters of a request URI (first value wins).
#[derive(Debug)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(uri: &Url) -> Self {
        Self {
            pairs: uri.query_pairs().into_owned().collect(),
        }
    }

    /// Value of `name`, treating an empty value as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn required(&self, name: &'static str) -> Result<&str, HandlerError> {
        self.get(name).ok_or(HandlerError::MissingParameter(name))
    }
}

fn path_and_query(uri: &Url) -> String {
    match uri.query() {
        Some(query) => format!("{}?{}", uri.path(), query),
        None => uri.path().to_string(),
    }
}

/// Resolve a `next` target against the request URI.
///
/// Only targets on the request's own origin are followed; the redirect uses
/// the resolved path and query, so the browser never re-parses the raw value.
fn local_target(uri: &Url, target: &str) -> Option<String> {
    if target.chars().any(|c| c.is_ascii_control()) {
        return None;
    }
    let resolved = uri.join(target).ok()?;
    if resolved.origin() != uri.origin() {
        return None;
    }
    Some(path_and_query(&resolved))
}

fn redirect_after_action(uri: &Url, query: &QueryParams, group: &str) -> Response {
    match query.get("next").and_then(|next| local_target(uri, next)) {
        Some(next) => Response::redirect(next),
        None => Response::redirect(views::action_link("jobgroup", &[("group", group)])),
    }
}

/// Overview of all job groups.
pub fn index(scheduler: &dyn Scheduler, _uri: &Url) -> Result<Response, HandlerError> {
    let mut groups = Vec::new();
    for name in scheduler.job_group_names()? {
        groups.push(GroupSummary {
            paused: scheduler.is_job_group_paused(&name)?,
            job_count: scheduler.job_keys(&name)?.len(),
            name,
        });
    }
    Ok(Response::document(views::index(&groups)))
}

/// Jobs of one group: `?group=G[&highlight=J]`.
pub fn job_group(scheduler: &dyn Scheduler, uri: &Url) -> Result<Response, HandlerError> {
    let query = QueryParams::parse(uri);
    let group = query.required("group")?;

    let keys = scheduler.job_keys(group)?;
    let running = scheduler.currently_executing()?;
    let mut jobs = Vec::with_capacity(keys.len());
    for key in keys {
        if let Some(detail) = scheduler.job_detail(&key)? {
            let running = running.iter().find(|r| r.key == key).cloned();
            jobs.push(JobRow { detail, running });
        }
    }
    let paused = scheduler.is_job_group_paused(group)?;

    let view = views::job_group(
        group,
        paused,
        query.get("highlight"),
        &path_and_query(uri),
        &jobs,
    );
    Ok(Response::document(view))
}

/// Pause a job group, then redirect: `?group=G[&next=U]`.
pub fn pause_job_group(scheduler: &dyn Scheduler, uri: &Url) -> Result<Response, HandlerError> {
    let query = QueryParams::parse(uri);
    let group = query.required("group")?;
    scheduler.pause_job_group(group)?;
    Ok(redirect_after_action(uri, &query, group))
}

/// Resume a job group, then redirect: `?group=G[&next=U]`.
pub fn resume_job_group(scheduler: &dyn Scheduler, uri: &Url) -> Result<Response, HandlerError> {
    let query = QueryParams::parse(uri);
    let group = query.required("group")?;
    scheduler.resume_job_group(group)?;
    Ok(redirect_after_action(uri, &query, group))
}

/// Console stylesheet.
pub fn stylesheet(_uri: &Url) -> Result<Response, HandlerError> {
    Ok(Response::content(views::STYLESHEET, "text/css"))
}

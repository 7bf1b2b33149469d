//! Console pages.
//!
//! Pure functions from scheduler data to XHTML documents.

use url::form_urlencoded;

use crate::response::{Document, Element, Node};
use crate::scheduler::{ExecutingJob, JobDetail};

/// Stylesheet served by the `style` route.
pub const STYLESHEET: &str = "body { font-family: sans-serif; margin: 2em; }\n\
table { border-collapse: collapse; }\n\
th, td { border: 1px solid #ccc; padding: 0.3em 0.6em; text-align: left; }\n\
tr.highlight { background: #ffd; }\n\
.paused { color: #a00; }\n\
.running { color: #070; }\n";

/// Summary row on the index page.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub name: String,
    pub paused: bool,
    pub job_count: usize,
}

/// A job plus its running instance, if any.
#[derive(Debug, Clone)]
pub struct JobRow {
    pub detail: JobDetail,
    pub running: Option<ExecutingJob>,
}

/// Relative link to an action taking a group and optional extra parameters.
pub fn action_link(action: &str, params: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{}?{}", action, query)
}

fn page(title: &str, body: Vec<Node>) -> Document {
    Document::xhtml(
        Element::new("html")
            .child(
                Element::new("head")
                    .child(Element::new("title").text(title))
                    .child(
                        Element::new("link")
                            .attr("rel", "stylesheet")
                            .attr("type", "text/css")
                            .attr("href", "style.css"),
                    ),
            )
            .child(Element::new("body").children(body)),
    )
}

fn status_label(paused: bool) -> Element {
    if paused {
        Element::new("span").attr("class", "paused").text("paused")
    } else {
        Element::new("span").attr("class", "running").text("active")
    }
}

fn cell(text: impl Into<String>) -> Element {
    Element::new("td").text(text)
}

/// Index page: every job group with its state.
pub fn index(groups: &[GroupSummary]) -> Document {
    let header = Element::new("tr").children(
        ["Group", "Jobs", "State"]
            .into_iter()
            .map(|h| Element::new("th").text(h)),
    );

    let rows = groups.iter().map(|group| {
        Element::new("tr")
            .child(
                Element::new("td").child(
                    Element::new("a")
                        .attr("href", action_link("jobgroup", &[("group", group.name.as_str())]))
                        .text(group.name.as_str()),
                ),
            )
            .child(cell(group.job_count.to_string()))
            .child(Element::new("td").child(status_label(group.paused)))
    });

    let body: Vec<Node> = if groups.is_empty() {
        vec![
            Element::new("h1").text("Scheduler").into(),
            Element::new("p").text("No job groups registered.").into(),
        ]
    } else {
        vec![
            Element::new("h1").text("Scheduler").into(),
            Element::new("table")
                .child(header)
                .children(rows)
                .into(),
        ]
    };

    page("Scheduler", body)
}

/// Job group page.
///
/// `current` is the path and query of this page; pause/resume links carry it
/// as `next` so the action redirects back here.
pub fn job_group(
    group: &str,
    paused: bool,
    highlight: Option<&str>,
    current: &str,
    jobs: &[JobRow],
) -> Document {
    let toggle = if paused {
        Element::new("a")
            .attr(
                "href",
                action_link("resumejobgroup", &[("group", group), ("next", current)]),
            )
            .text("Resume")
    } else {
        Element::new("a")
            .attr(
                "href",
                action_link("pausejobgroup", &[("group", group), ("next", current)]),
            )
            .text("Pause")
    };

    let header = Element::new("tr").children(
        ["Name", "Description", "Type", "State", "Interruptible"]
            .into_iter()
            .map(|h| Element::new("th").text(h)),
    );

    let rows = jobs.iter().map(|job| {
        let name = job.detail.key.name.as_str();
        let highlighted = highlight.is_some_and(|h| h == name);
        let state = match &job.running {
            Some(running) => format!("running ({})", running.fire_instance_id),
            None => "idle".to_string(),
        };
        Element::new("tr")
            .attr_opt("class", highlighted.then_some("highlight"))
            .child(cell(name))
            .child(cell(job.detail.description.clone().unwrap_or_default()))
            .child(cell(job.detail.job_type.as_str()))
            .child(cell(state))
            .child(cell(if job.detail.interruptible { "yes" } else { "no" }))
    });

    let title = format!("Job group {}", group);
    let body: Vec<Node> = vec![
        Element::new("p")
            .child(Element::new("a").attr("href", "index").text("All groups"))
            .into(),
        Element::new("h1").text(title.as_str()).into(),
        Element::new("p")
            .text("State: ")
            .child(status_label(paused))
            .text(" ")
            .child(toggle)
            .into(),
        Element::new("table")
            .child(header)
            .children(rows)
            .into(),
    ];

    page(&title, body)
}
